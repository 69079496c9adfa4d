// ==========================================
// 견적 공정 그룹 엔진 - 저장소 오류 타입
// ==========================================
// 도구: thiserror 파생 매크로
// 엔진은 재시도하지 않고 호출 측으로 그대로 전달한다
// ==========================================

use thiserror::Error;

/// 저장소 오류
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 데이터베이스 =====
    #[error("레코드 없음: {entity} id={id}")]
    NotFound { entity: String, id: String },

    #[error("DB 잠금 획득 실패: {0}")]
    LockError(String),

    #[error("DB 조회 실패: {0}")]
    DatabaseQueryError(String),

    #[error("유일 제약 위반: {0}")]
    UniqueConstraintViolation(String),

    // ===== 직렬화 =====
    #[error("JSON 직렬화 실패: {0}")]
    SerializationError(String),

    // ===== 공통 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 사용자에게 보여 줄 현지화 메시지
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::NotFound { id, .. } => {
                crate::i18n::t_with_args("template.not_found", &[("id", id.as_str())])
            }
            other => other.to_string(),
        }
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                if msg.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(msg)
                } else {
                    RepositoryError::DatabaseQueryError(msg)
                }
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// Result 별칭
pub type RepositoryResult<T> = Result<T, RepositoryError>;
