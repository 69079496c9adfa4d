// ==========================================
// 견적 공정 그룹 엔진 - 내보내기 계층
// ==========================================
// 책임: 견적 → 서식 있는 격자 → xlsx / csv
// 원칙: 가져오기가 다시 읽을 수 있는 배치로만 쓴다
// ==========================================

pub mod csv_renderer;
pub mod error;
pub mod estimate_exporter;
pub mod styled_grid;
pub mod xlsx_renderer;

pub use csv_renderer::CsvRenderer;
pub use error::{ExportError, ExportResult};
pub use estimate_exporter::EstimateExporter;
pub use styled_grid::{CellStyle, RowRole, StyledGrid, StyledRow};
pub use xlsx_renderer::XlsxRenderer;
