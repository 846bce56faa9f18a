//! 통합 API 에러 타입.
//!
//! 모든 엔드포인트는 [`ApiError`]를 반환하고, 응답 본문은 항상
//! [`ApiErrorResponse`] 형식입니다.
//!
//! 인증 관련 에러는 실패 원인과 관계없이 고정된 메시지만 내보냅니다.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use clinic_core::ClinicError;

use crate::auth::{JwtError, PasswordError};

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Patient with ID 9 not found",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "INVALID_CREDENTIALS", "FORBIDDEN", "NOT_FOUND")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 추가 에러 상세 정보 (검증 실패 필드 등)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// 에러 발생 타임스탬프 (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

    /// 상세 정보 포함 에러 생성.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            details: Some(details),
            ..Self::new(code, message)
        }
    }

    /// 타임스탬프 없는 간단한 에러.
    ///
    /// 인증 실패 응답은 이 형식을 사용해 어떤 경로로 실패했든 본문이 바이트 단위로 같습니다.
    pub fn simple(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            timestamp: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 에러.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 로그인 실패 (미등록 이메일, 비밀번호 불일치 구분 없음)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// 토큰 없음/형식 오류/서명 불일치/만료
    #[error("Authentication required")]
    Unauthenticated,

    /// 인증은 되었으나 역할이 허용되지 않음
    #[error("Insufficient role")]
    Forbidden,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    /// 내부 실패. 상세 내용은 로그에만 남깁니다.
    #[error("internal error: {0}")]
    Internal(String),
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// HTTP 상태 코드.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 에러 코드.
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidCredentials => "INVALID_CREDENTIALS",
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::Forbidden => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 응답 본문.
    pub fn to_response_body(&self) -> ApiErrorResponse {
        match self {
            ApiError::InvalidCredentials | ApiError::Unauthenticated | ApiError::Forbidden => {
                ApiErrorResponse::simple(self.code(), self.to_string())
            }
            ApiError::Validation(errors) => ApiErrorResponse::with_details(
                self.code(),
                self.to_string(),
                serde_json::to_value(errors).unwrap_or(Value::Null),
            ),
            ApiError::Internal(_) => ApiErrorResponse::new(self.code(), "Internal server error"),
            other => ApiErrorResponse::new(other.code(), other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(detail) = &self {
            error!(detail = %detail, "request failed with internal error");
        }

        (self.status(), Json(self.to_response_body())).into_response()
    }
}

impl From<ClinicError> for ApiError {
    fn from(err: ClinicError) -> Self {
        match err {
            ClinicError::NotFound(msg) => ApiError::NotFound(msg),
            ClinicError::Conflict(msg) => ApiError::Conflict(msg),
            ClinicError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ClinicError::Config(msg) | ClinicError::Database(msg) | ClinicError::Internal(msg) => {
                ApiError::Internal(msg)
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
