// ==========================================
// 견적 공정 그룹 엔진 - 엔진 계층
// ==========================================
// 책임: 그룹화(표시 투영), 공정 순서 편집
// 원칙: 모든 변환은 순수/전역 함수로 실패하지 않는다
// ==========================================

pub mod grouping;
pub mod process_order;

pub use grouping::{first_seen_order, DisplayGroup, DisplayRow, GroupingEngine, GroupingOptions};
