//! 로그인 흐름.
//!
//! 이메일 조회 → 비밀번호 검증 → 토큰 발급.
//! 미등록 이메일과 비밀번호 불일치는 같은 [`ApiError::InvalidCredentials`]로 끝나며,
//! 미등록 이메일도 더미 해시 검증 비용을 한 번 지불합니다.

use std::sync::Arc;

use tracing::{info, warn};

use clinic_core::{normalize_email, AuthenticatedUser, LoginRequest, LoginResponse};

use crate::auth::{burn_verification_blocking, verify_password_blocking, TokenService};
use crate::error::{ApiError, ApiResult};
use crate::metrics::{record_login, LoginOutcome};
use crate::repository::UserStore;

/// 로그인 서비스.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// 자격증명을 확인하고 토큰을 발급합니다.
    pub async fn login(&self, request: LoginRequest) -> ApiResult<LoginResponse> {
        let email = normalize_email(&request.email);
        let LoginRequest { password, .. } = request;

        let Some(user) = self.users.find_by_email(&email).await? else {
            burn_verification_blocking(password).await;
            return Err(self.reject());
        };

        if !verify_password_blocking(password, user.password_hash.clone()).await {
            return Err(self.reject());
        }

        let access_token = self.tokens.issue(user.id, &user.email, user.role)?;

        record_login(LoginOutcome::Success);
        info!(user_id = user.id, role = %user.role, email = %user.email, "login succeeded");

        Ok(LoginResponse {
            access_token,
            user: AuthenticatedUser::from(&user),
        })
    }

    /// 실패 원인을 남기지 않는 공통 거부 경로.
    fn reject(&self) -> ApiError {
        record_login(LoginOutcome::Failure);
        warn!("login failed: invalid credentials");
        ApiError::InvalidCredentials
    }
}
