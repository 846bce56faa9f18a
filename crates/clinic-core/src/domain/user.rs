//! 사용자(자격증명) 레코드와 공개 projection.
//!
//! [`UserRecord`]는 비밀번호 해시를 포함하므로 직렬화하지 않습니다.
//! 외부로 나가는 값은 항상 [`UserResponse`] 또는 [`AuthenticatedUser`]를 거칩니다.

use chrono::{DateTime, Utc};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::Role;

/// 저장된 사용자 레코드.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    /// Argon2id PHC 문자열
    #[cfg_attr(feature = "sqlx-support", sqlx(try_from = "String"))]
    pub password_hash: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 사용자 입력 (비밀번호는 이미 해싱됨).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
}

/// 사용자 공개 정보 (비밀번호 해시 제외).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&UserRecord> for UserResponse {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            phone: record.phone.clone(),
            role: record.role,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// 로그인 응답에 포함되는 사용자 정보.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl From<&UserRecord> for AuthenticatedUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email.clone(),
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            role: record.role,
        }
    }
}

/// 이메일 정규화 (공백 제거 + 소문자).
///
/// 저장과 조회 모두 이 함수를 거쳐야 고유성이 유지됩니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
