//! 로그인 요청/응답과 클라이언트 세션.
//!
//! [`Session`]은 로그인 응답에서 만들어지는 명시적인 클라이언트 측 세션 값입니다.
//! 클라이언트는 이 값을 요청 컨텍스트로 전달하고, 필요하면 직렬화해 보관합니다.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use super::{AuthenticatedUser, Role};

/// 로그인 요청.
#[derive(Debug, Clone, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub email: String,
    #[cfg_attr(feature = "utoipa-support", schema(value_type = String, format = Password))]
    pub password: SecretString,
}

/// 로그인 성공 응답.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    /// Bearer 토큰
    pub access_token: String,
    /// 로그인한 사용자
    pub user: AuthenticatedUser,
}

/// 클라이언트 세션.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    user: AuthenticatedUser,
}

impl Session {
    /// 로그인 응답에서 세션 생성.
    pub fn from_login(response: LoginResponse) -> Self {
        Self {
            token: response.access_token,
            user: response.user,
        }
    }

    /// 보관된 토큰.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// 로그인한 사용자.
    pub fn user(&self) -> &AuthenticatedUser {
        &self.user
    }

    /// `Authorization` 헤더 값.
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }

    /// 특정 역할인지 확인.
    pub fn has_role(&self, role: Role) -> bool {
        self.user.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn is_user(&self) -> bool {
        self.has_role(Role::User)
    }
}
