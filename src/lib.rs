// ==========================================
// 견적 공정 그룹 엔진 - 핵심 라이브러리
// ==========================================
// 견적 항목 → 공정 그룹 (표시 순서는 공정 순서 목록이 결정)
// 엑셀 가져오기 (휴리스틱 분류) / 내보내기 (가져오기의 역방향)
// 기술 스택: Rust + SQLite + calamine / rust_xlsxwriter
// ==========================================

// 다국어 초기화
rust_i18n::i18n!("locales", fallback = "ko");

// ==========================================
// 모듈 선언
// ==========================================

// 도메인 계층 - 항목 / 공정 키 / 셀 격자
pub mod domain;

// 엔진 계층 - 그룹화 / 공정 순서 편집
pub mod engine;

// 가져오기 계층 - 스프레드시트 → 항목
pub mod importer;

// 내보내기 계층 - 항목 → 스프레드시트
pub mod exporter;

// 저장소 계층 - 템플릿
pub mod repository;

// 설정 계층
pub mod config;

// DB 기반 (연결 초기화 / PRAGMA / 스키마)
pub mod db;

// 로그
pub mod logging;

// 다국어
pub mod i18n;

// ==========================================
// 핵심 타입 재노출
// ==========================================

pub use domain::{
    Cell, EstimateDraft, EstimateMeta, EstimateTotals, Grid, GroupKey, LineItem, ParsedEstimate,
    PersistedRecord,
};

pub use engine::{DisplayGroup, DisplayRow, GroupingEngine, GroupingOptions};

pub use importer::{EstimateImporter, EstimateImporterImpl, EstimateSheetParser, ImportError, ImportTask};

pub use exporter::{CsvRenderer, EstimateExporter, ExportError, StyledGrid, XlsxRenderer};

pub use repository::{RepositoryError, TemplateRepository, TemplateStore};

pub use config::{ConfigManager, EngineConfig};

// ==========================================
// 상수
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "견적 공정 그룹 엔진";
