//! 인증 endpoint.
//!
//! - `POST /auth/login`: 공개. 자격증명 확인 후 Bearer 토큰 발급
//! - `GET /auth/me`: 인증된 호출자의 토큰 클레임

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use clinic_core::{LoginRequest, LoginResponse, Role};

use crate::auth::{guarded, AllowedRoles, CurrentUser};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 현재 호출자 정보 (토큰 클레임 projection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    /// 토큰 만료 시각 (Unix timestamp)
    pub expires_at: i64,
}

/// 로그인.
///
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 401, description = "자격증명 불일치", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state.auth_service().login(request).await?;
    Ok(Json(response))
}

/// 현재 호출자 조회.
///
/// GET /auth/me
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "토큰 클레임", body = MeResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(CurrentUser(claims): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
        expires_at: claims.exp,
    })
}

/// 인증 라우터 생성.
pub fn auth_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", guarded(get(me), state, AllowedRoles::ANY))
}
