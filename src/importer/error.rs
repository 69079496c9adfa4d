// ==========================================
// 견적 공정 그룹 엔진 - 가져오기 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// ==========================================

use thiserror::Error;

/// 가져오기 모듈 오류
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 양식 인식 =====
    #[error("견적서 양식을 인식하지 못했습니다: {reason}")]
    FormatUnrecognized { reason: String },

    // ===== 파일 관련 =====
    #[error("파일이 없습니다: {0}")]
    FileNotFound(String),

    #[error("지원하지 않는 파일 형식: {0} (.xlsx/.xls/.csv 만 지원)")]
    UnsupportedFormat(String),

    #[error("파일 읽기 실패: {0}")]
    FileReadError(String),

    #[error("Excel 해석 실패: {0}")]
    ExcelParseError(String),

    #[error("CSV 해석 실패: {0}")]
    CsvParseError(String),

    #[error("시트가 없습니다")]
    NoWorksheet,

    // ===== 실행 제어 =====
    #[error("가져오기가 취소되었습니다")]
    Cancelled,

    // ===== 공통 =====
    #[error("내부 오류: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ImportError {
    /// 사용자에게 보여 줄 현지화 메시지
    pub fn user_message(&self) -> String {
        match self {
            ImportError::FormatUnrecognized { .. } => crate::i18n::t("import.format_unrecognized"),
            ImportError::FileNotFound(path) => {
                crate::i18n::t_with_args("import.file_not_found", &[("path", path.as_str())])
            }
            ImportError::UnsupportedFormat(ext) => {
                crate::i18n::t_with_args("import.unsupported_format", &[("ext", ext.as_str())])
            }
            ImportError::Cancelled => crate::i18n::t("import.cancelled"),
            ImportError::NoWorksheet => crate::i18n::t("import.no_worksheet"),
            _ => crate::i18n::t("import.read_failed"),
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => ImportError::FileNotFound(err.to_string()),
            _ => ImportError::FileReadError(err.to_string()),
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 별칭
pub type ImportResult<T> = Result<T, ImportError>;
