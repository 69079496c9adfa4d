// ==========================================
// 견적 공정 그룹 엔진 - 도메인 모델 계층
// ==========================================
// 책임: 견적 항목, 공정 키, 셀 격자, 세션 상태/저장 레코드 정의
// 레드라인: 데이터 접근 로직 없음, 엔진 로직 없음
// ==========================================

pub mod estimate;
pub mod grid;
pub mod lenient;
pub mod line_item;
pub mod sheet_format;
pub mod types;

// 핵심 타입 재노출
pub use estimate::{EstimateDraft, EstimateMeta, ParsedEstimate, PersistedRecord};
pub use grid::{text_row, Cell, Grid};
pub use line_item::{EstimateTotals, LineItem, VAT_RATE_PERCENT};
pub use types::GroupKey;
