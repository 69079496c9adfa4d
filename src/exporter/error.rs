// ==========================================
// 견적 공정 그룹 엔진 - 내보내기 오류 타입
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("xlsx 쓰기 실패: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV 쓰기 실패: {0}")]
    CsvWriteError(String),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
