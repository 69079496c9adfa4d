// ==========================================
// 견적 공정 그룹 엔진 - 엔진 설정
// ==========================================
// 책임: 가져오기/내보내기 설정 값과 기본값
// 저장: config_kv 표 (ConfigManager 가 덮어쓰기)
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub import: ImportConfig,
    pub export: ExportConfig,
}

// ==========================================
// ImportConfig - 가져오기 설정
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 열 머리 행을 찾을 때 살펴보는 위쪽 행 수
    pub header_scan_rows: usize,
    /// 열 머리를 못 찾았을 때 가정하는 행 (0부터)
    pub default_header_row: usize,
    /// 여러 시트 중 견적 시트를 고를 때 살펴보는 행 수
    pub sheet_probe_rows: usize,
    /// 단위 칸이 비었을 때 채울 값 (None 이면 비워 둔다)
    pub default_unit: Option<String>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            header_scan_rows: 20,
            default_header_row: 7,
            sheet_probe_rows: 15,
            default_unit: None,
        }
    }
}

// ==========================================
// ExportConfig - 내보내기 설정
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub sheet_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "견적서".to_string(),
        }
    }
}
