//! 사용자 관리 서비스.

use std::sync::Arc;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use clinic_core::{normalize_email, ClinicError, NewUser, Role, UserResponse};

use super::validation::{validate_password, validate_phone};
use crate::auth::hash_password_blocking;
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_user_created;
use crate::repository::UserStore;

/// 사용자 생성 요청.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    /// 최소 8자, 영문자와 숫자 포함
    #[validate(custom(function = "validate_password"))]
    #[schema(value_type = String, format = Password)]
    pub password: SecretString,
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone: Option<String>,
    /// 생략 시 `user`. 회원가입 경로에서는 무시됩니다.
    #[serde(default)]
    pub role: Option<Role>,
}

/// 삭제 결과 메시지.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// 사용자 서비스.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// 사용자 생성. `role_override`가 있으면 요청의 role보다 우선합니다.
    pub async fn create(
        &self,
        request: CreateUserRequest,
        role_override: Option<Role>,
    ) -> ApiResult<UserResponse> {
        request.validate()?;

        let email = normalize_email(&request.email);
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(duplicate_email());
        }

        let role = role_override.or(request.role).unwrap_or_default();
        let password_hash = hash_password_blocking(request.password).await?;

        let record = self
            .users
            .insert(NewUser {
                email,
                password_hash,
                first_name: request.first_name,
                last_name: request.last_name,
                phone: request.phone,
                role,
            })
            .await
            .map_err(|e| match e {
                ClinicError::Conflict(_) => duplicate_email(),
                other => other.into(),
            })?;

        record_user_created(role.as_str());
        info!(user_id = record.id, role = %record.role, email = %record.email, "user created");

        Ok(UserResponse::from(&record))
    }

    /// 공개 회원가입. 역할은 항상 `user`.
    pub async fn register(&self, request: CreateUserRequest) -> ApiResult<UserResponse> {
        self.create(request, Some(Role::User)).await
    }

    pub async fn list(&self) -> ApiResult<Vec<UserResponse>> {
        let records = self.users.list().await?;
        Ok(records.iter().map(UserResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> ApiResult<UserResponse> {
        self.users
            .find_by_id(id)
            .await?
            .map(|record| UserResponse::from(&record))
            .ok_or_else(user_not_found)
    }

    pub async fn delete(&self, id: i64) -> ApiResult<MessageResponse> {
        if !self.users.delete(id).await? {
            return Err(user_not_found());
        }

        info!(user_id = id, "user deleted");
        Ok(MessageResponse {
            message: "User deleted successfully".to_string(),
        })
    }
}

fn duplicate_email() -> ApiError {
    ApiError::Conflict("User with this email already exists".to_string())
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}
