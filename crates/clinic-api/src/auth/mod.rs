//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어(RBAC)를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenService`]: 토큰 발급/검증 (서명 키와 TTL은 생성 시 주입)
//! - [`AllowedRoles`], [`authorize`]: 라우트별 허용 역할 판단
//! - [`require_roles`], [`guarded`]: 라우트에 붙이는 인증 미들웨어
//! - [`CurrentUser`]: 핸들러에서 인증된 호출자 추출
//! - 비밀번호 해싱/검증 함수

mod jwt;
mod middleware;
mod password;
mod roles;

pub use jwt::{Claims, InvalidToken, JwtError, TokenService};
pub use middleware::{bearer_token, guarded, require_roles, CurrentUser, RouteGuard};
pub use password::{
    burn_verification, burn_verification_blocking, hash_password, hash_password_blocking,
    validate_password_strength, verify_password, verify_password_blocking, PasswordError,
};
pub use roles::{authorize, AllowedRoles, Role};
