//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! | 경로 | 허용 역할 |
//! |------|-----------|
//! | `GET /health`, `GET /health/ready` | 공개 |
//! | `POST /auth/login` | 공개 |
//! | `GET /auth/me` | admin, user |
//! | `POST /users/register` | 공개 (역할은 항상 user) |
//! | `POST/GET /users`, `GET/DELETE /users/{id}` | admin |
//! | `GET /patients`, `GET /patients/{id}` | admin, user |
//! | `POST /patients`, `PATCH/DELETE /patients/{id}` | admin |

pub mod auth;
pub mod health;
pub mod patients;
pub mod users;

pub use auth::{auth_router, MeResponse};
pub use health::{
    health_router, ComponentHealth, ComponentState, ComponentStatus, HealthResponse,
};
pub use patients::patients_router;
pub use users::users_router;

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 보호된 라우트의 가드는 `state`의 토큰 서비스를 캡처합니다.
pub fn create_api_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .merge(health_router())
        .merge(auth_router(state))
        .merge(users_router(state))
        .merge(patients_router(state))
}
