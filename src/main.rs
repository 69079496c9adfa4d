// ==========================================
// 견적 공정 그룹 엔진 - 명령행 도구
// ==========================================
// 사용:
//   estimate-sections <입력.xlsx|입력.xls|입력.csv> [출력.xlsx|출력.csv] [--save-template 제목]
//
// 입력을 가져와 공정 목록을 출력하고, 출력 경로가 있으면 정리된 견적서로 다시 쓴다.
// 설정/템플릿은 사용자 데이터 디렉터리의 DB 를 쓴다.
// ==========================================

use estimate_sections::config::{ConfigManager, EngineConfig};
use estimate_sections::db::{default_db_path, init_schema, open_sqlite_connection};
use estimate_sections::domain::EstimateDraft;
use estimate_sections::engine::GroupingOptions;
use estimate_sections::exporter::{CsvRenderer, EstimateExporter, XlsxRenderer};
use estimate_sections::importer::{EstimateImporter, EstimateImporterImpl, ImportError};
use estimate_sections::repository::{TemplateRepository, TemplateStore};
use estimate_sections::{i18n, logging};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

struct CliArgs {
    input: PathBuf,
    output: Option<PathBuf>,
    template_title: Option<String>,
}

fn parse_args() -> Option<CliArgs> {
    let mut positional = Vec::new();
    let mut template_title = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--save-template" {
            template_title = Some(args.next()?);
        } else {
            positional.push(PathBuf::from(arg));
        }
    }

    let mut positional = positional.into_iter();
    Some(CliArgs {
        input: positional.next()?,
        output: positional.next(),
        template_title,
    })
}

fn open_store() -> Result<Arc<Mutex<Connection>>, Box<dyn std::error::Error>> {
    let db_path = default_db_path();
    if let Some(dir) = db_path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let conn = open_sqlite_connection(&db_path.to_string_lossy())?;
    init_schema(&conn)?;
    Ok(Arc::new(Mutex::new(conn)))
}

fn load_config(conn: &Arc<Mutex<Connection>>) -> EngineConfig {
    ConfigManager::from_connection(conn.clone())
        .and_then(|manager| manager.load_engine_config())
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "설정 읽기 실패, 기본값 사용");
            EngineConfig::default()
        })
}

fn write_output(
    exporter: &EstimateExporter,
    parsed: &estimate_sections::ParsedEstimate,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let grid = exporter.export(&parsed.meta, &parsed.items, &parsed.process_order);
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        CsvRenderer.save(&grid, path)?;
    } else {
        XlsxRenderer.save(&grid, path)?;
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    let Some(args) = parse_args() else {
        eprintln!(
            "{} {}\n사용: estimate-sections <입력.xlsx|입력.xls|입력.csv> [출력.xlsx|출력.csv] [--save-template 제목]",
            estimate_sections::APP_NAME,
            estimate_sections::VERSION
        );
        return ExitCode::from(2);
    };

    let store = match open_store() {
        Ok(store) => Some(store),
        Err(e) => {
            tracing::warn!(error = %e, "DB 열기 실패, 기본 설정으로 진행");
            None
        }
    };
    let config = store.as_ref().map(load_config).unwrap_or_default();

    let importer = EstimateImporterImpl::new(config.import.clone());
    let parsed = match importer.import_file(&args.input).await {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return match e {
                ImportError::FormatUnrecognized { .. } => ExitCode::from(1),
                _ => ExitCode::from(3),
            };
        }
    };

    let draft = EstimateDraft::from_parts(parsed.items.clone(), parsed.process_order.clone());
    for group in draft.display_groups(GroupingOptions::editing()) {
        let subtotal = group.subtotal();
        let name = if group.key.is_pending() {
            "(새 공정)"
        } else if group.key.is_blank() {
            "(공정 없음)"
        } else {
            group.display_name
        };
        println!("{}\t{}개 항목\t{}원", name, group.rows.len(), subtotal.supply);
    }
    let totals = draft.totals();
    println!("공급가액 {}원 / 부가세 {}원 / 합계 {}원", totals.supply, totals.vat, totals.total);

    if let Some(output) = &args.output {
        let exporter = EstimateExporter::new(config.export.clone());
        if let Err(e) = write_output(&exporter, &parsed, output) {
            eprintln!("내보내기 실패: {}", e);
            return ExitCode::from(3);
        }
    }

    if let Some(title) = &args.template_title {
        let Some(conn) = store else {
            eprintln!("템플릿 저장소를 열 수 없습니다");
            return ExitCode::from(3);
        };
        match TemplateRepository::new(conn).save(title, &draft) {
            Ok(template_id) => println!("{} ({})", i18n::t("template.saved"), template_id),
            Err(e) => {
                eprintln!("{}", e.user_message());
                return ExitCode::from(3);
            }
        }
    }

    ExitCode::SUCCESS
}
