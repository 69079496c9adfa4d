// ==========================================
// 견적 공정 그룹 엔진 - 가져오기 계층
// ==========================================
// 책임: 스프레드시트 파일 → 항목 + 공정 순서
// 지원: Excel (.xlsx), CSV
// ==========================================

// 모듈 선언
pub mod data_cleaner;
pub mod error;
pub mod estimate_importer_impl;
pub mod estimate_parser;
pub mod grid_reader;
pub mod importer_trait;
pub mod row_classifier;
pub mod sheet_layout;

// 핵심 타입 재수출
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use estimate_importer_impl::{EstimateImporterImpl, ImportTask};
pub use estimate_parser::{EstimateSheetParser, UnrecognizedReason};
pub use grid_reader::{CsvGridReader, ExcelGridReader, UniversalGridReader};
pub use row_classifier::{classify, ClassifyContext, RowKind, RowView};
pub use sheet_layout::SheetLayout;

// Trait 인터페이스 재수출
pub use importer_trait::{EstimateImporter, GridReader};
