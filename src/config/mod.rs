// ==========================================
// 견적 공정 그룹 엔진 - 설정 계층
// ==========================================
// 책임: 엔진 설정 기본값 + config_kv 표 덮어쓰기
// ==========================================

pub mod config_manager;
pub mod engine_config;

pub use config_manager::{config_keys, ConfigManager};
pub use engine_config::{EngineConfig, ExportConfig, ImportConfig};
