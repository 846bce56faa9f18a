//! 클리닉 백엔드 공통 에러 타입.
//!
//! 저장소, 설정, 도메인 검증 전반에서 사용하는 에러를 정의합니다.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum ClinicError {
    /// 설정 에러
    #[error("configuration error: {0}")]
    Config(String),

    /// 잘못된 입력
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// 찾을 수 없음
    #[error("not found: {0}")]
    NotFound(String),

    /// 고유 제약 위반 (예: 중복 이메일)
    #[error("conflict: {0}")]
    Conflict(String),

    /// 데이터베이스 에러
    #[error("database error: {0}")]
    Database(String),

    /// 내부 에러
    #[error("internal error: {0}")]
    Internal(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type ClinicResult<T> = Result<T, ClinicError>;

impl ClinicError {
    /// 저장소 계층의 일시적 장애인지 확인합니다.
    pub fn is_storage_failure(&self) -> bool {
        matches!(self, ClinicError::Database(_) | ClinicError::Internal(_))
    }
}

#[cfg(feature = "sqlx-support")]
impl From<sqlx::Error> for ClinicError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ClinicError::Conflict(db.message().to_string())
            }
            sqlx::Error::RowNotFound => ClinicError::NotFound("row not found".to_string()),
            _ => ClinicError::Database(err.to_string()),
        }
    }
}
