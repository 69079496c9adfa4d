// ==========================================
// 견적 공정 그룹 엔진 - 저장소 계층
// ==========================================
// 책임: 견적 템플릿 {items, processOrder} 보관
// 레드라인: 저장소는 비즈니스 규칙을 포함하지 않는다
// ==========================================

pub mod error;
pub mod template_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use template_repo::{EstimateTemplate, TemplateRepository, TemplateStore};
