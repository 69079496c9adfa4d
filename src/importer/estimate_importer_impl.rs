// ==========================================
// 견적 공정 그룹 엔진 - 가져오기 구현
// ==========================================
// 흐름:
//   1) 확장자로 디코더 선택
//   2) 파일 읽기 (tokio::fs)
//   3) 격자 디코딩 (spawn_blocking)
//   4) 행 분류 + 항목/순서 생성
// 취소: ImportTask::cancel 후에는 결과를 버린다
// ==========================================

use crate::config::engine_config::ImportConfig;
use crate::domain::estimate::{EstimateDraft, ParsedEstimate};
use crate::domain::grid::Grid;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::estimate_parser::EstimateSheetParser;
use crate::importer::grid_reader::UniversalGridReader;
use crate::importer::importer_trait::EstimateImporter;
use async_trait::async_trait;
use futures::future::{abortable, AbortHandle, Aborted};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

// ==========================================
// EstimateImporterImpl
// ==========================================
pub struct EstimateImporterImpl {
    config: ImportConfig,
    parser: EstimateSheetParser,
}

impl EstimateImporterImpl {
    pub fn new(config: ImportConfig) -> Self {
        let parser = EstimateSheetParser::new(config.clone());
        Self { config, parser }
    }

    /// 가져온 결과를 작성 중인 견적에 반영
    ///
    /// 실패하면 draft 는 그대로 둔다.
    pub async fn import_into<P: AsRef<Path> + Send>(
        &self,
        draft: &mut EstimateDraft,
        file_path: P,
    ) -> ImportResult<ParsedEstimate> {
        let parsed = self.import_file(file_path).await?;
        draft.apply_import(parsed.clone());
        Ok(parsed)
    }

    async fn read_grid(&self, path: &Path) -> ImportResult<Grid> {
        let reader = UniversalGridReader.reader_for_path(path, &self.config)?;

        let bytes = tokio::fs::read(path).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(path.display().to_string()),
            _ => ImportError::from(e),
        })?;
        debug!(bytes = bytes.len(), "파일 읽기 완료");

        tokio::task::spawn_blocking(move || reader.read_grid(&bytes))
            .await
            .map_err(|e| ImportError::InternalError(format!("디코딩 작업 실패: {}", e)))?
    }
}

impl Default for EstimateImporterImpl {
    fn default() -> Self {
        Self::new(ImportConfig::default())
    }
}

#[async_trait]
impl EstimateImporter for EstimateImporterImpl {
    #[instrument(skip(self, file_path))]
    async fn import_file<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ParsedEstimate> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "견적서 가져오기 시작");

        let grid = self.read_grid(path).await.map_err(|e| {
            warn!(error = %e, "파일 디코딩 실패");
            e
        })?;
        debug!(rows = grid.len(), "격자 디코딩 완료");

        let parsed = self.import_grid(&grid)?;
        info!(
            items = parsed.items.len(),
            groups = parsed.process_order.len(),
            "견적서 가져오기 완료"
        );
        Ok(parsed)
    }

    fn import_grid(&self, grid: &Grid) -> ImportResult<ParsedEstimate> {
        self.parser.try_parse(grid).map_err(|e| {
            warn!(error = %e, "견적서 양식 인식 실패");
            e
        })
    }
}

// ==========================================
// ImportTask - 취소 가능한 가져오기
// ==========================================
pub struct ImportTask {
    abort_handle: AbortHandle,
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<Result<ImportResult<ParsedEstimate>, Aborted>>,
}

impl ImportTask {
    /// 백그라운드에서 가져오기 시작 (tokio 런타임 안에서 호출)
    pub fn start<I>(importer: Arc<I>, file_path: PathBuf) -> Self
    where
        I: EstimateImporter + 'static,
    {
        let (future, abort_handle) =
            abortable(async move { importer.import_file(file_path).await });
        let handle = tokio::spawn(future);

        Self {
            abort_handle,
            cancelled: Arc::new(AtomicBool::new(false)),
            handle,
        }
    }

    /// 진행 중인 가져오기 포기
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.abort_handle.abort();
        debug!("가져오기 취소 요청");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// 결과 대기
    ///
    /// 취소된 작업은 완료 여부와 상관없이 Cancelled 를 돌려준다.
    pub async fn finish(self) -> ImportResult<ParsedEstimate> {
        let joined = self.handle.await;
        if self.cancelled.load(Ordering::SeqCst) {
            return Err(ImportError::Cancelled);
        }
        match joined {
            Ok(Ok(result)) => result,
            Ok(Err(Aborted)) => Err(ImportError::Cancelled),
            Err(e) => Err(ImportError::InternalError(format!("가져오기 작업 실패: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::text_row;
    use crate::domain::types::GroupKey;
    use std::io::Write;
    use tempfile::Builder;

    const SAMPLE_CSV: &str = "\
고객명,홍길동
,
no,품목,규격,단위,수량,재료비단가,노무비단가,비고
가설철거,,,,,,,
1,철거,,식,1,\"10,000\",5000,
목공,,,,,,,
1,몰딩,,m,20,3000,2000,
";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_import_csv_file() {
        let file = write_csv(SAMPLE_CSV);
        let importer = EstimateImporterImpl::default();

        let parsed = importer.import_file(file.path()).await.unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(
            parsed.process_order,
            vec![GroupKey::named("가설철거"), GroupKey::named("목공")]
        );
        assert_eq!(parsed.items[0].material_unit_price, 10000);
        assert_eq!(parsed.meta.customer_name, "홍길동");
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let importer = EstimateImporterImpl::default();
        let result = importer.import_file("/nonexistent/estimate.csv").await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_import_unrecognized_leaves_draft_untouched() {
        let file = write_csv("아무 내용\n없음\n");
        let importer = EstimateImporterImpl::default();
        let mut draft = EstimateDraft::new();
        let key = draft.append_new_section();
        draft.append_item_to_group(&key);

        let result = importer.import_into(&mut draft, file.path()).await;
        assert!(matches!(result, Err(ImportError::FormatUnrecognized { .. })));
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.order, vec![key]);
    }

    #[tokio::test]
    async fn test_import_into_replaces_draft() {
        let file = write_csv(SAMPLE_CSV);
        let importer = EstimateImporterImpl::default();
        let mut draft = EstimateDraft::new();
        draft.append_new_section();

        importer.import_into(&mut draft, file.path()).await.unwrap();
        assert_eq!(draft.items.len(), 2);
        assert_eq!(draft.order.len(), 2);
    }

    #[tokio::test]
    async fn test_cancelled_task_discards_result() {
        let file = write_csv(SAMPLE_CSV);
        let importer = Arc::new(EstimateImporterImpl::default());

        let task = ImportTask::start(importer, file.path().to_path_buf());
        task.cancel();
        assert!(task.is_cancelled());
        assert!(matches!(task.finish().await, Err(ImportError::Cancelled)));
    }

    #[tokio::test]
    async fn test_task_completes_without_cancel() {
        let file = write_csv(SAMPLE_CSV);
        let importer = Arc::new(EstimateImporterImpl::default());

        let task = ImportTask::start(importer, file.path().to_path_buf());
        let parsed = task.finish().await.unwrap();
        assert_eq!(parsed.items.len(), 2);
    }
}
