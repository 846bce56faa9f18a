//! 헬스 체크 endpoint.
//!
//! - `GET /health`: 프로세스 생존 여부 (항상 200)
//! - `GET /health/ready`: 저장소까지 확인, 실패 시 503

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// 컴포넌트 상태 값.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ComponentState {
    Up,
    Down,
    NotConfigured,
}

/// 개별 컴포넌트 상태.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComponentStatus {
    pub status: ComponentState,
    /// 백엔드 종류나 실패 사유
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ComponentStatus {
    fn new(status: ComponentState, detail: Option<&str>) -> Self {
        Self {
            status,
            detail: detail.map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    /// PostgreSQL 연결 (인메모리 모드면 not_configured)
    pub database: ComponentStatus,
    /// users/patients 저장소
    pub store: ComponentStatus,
}

/// readiness 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// "healthy" | "unhealthy"
    pub status: String,
    pub version: String,
    pub uptime_secs: i64,
    /// RFC 3339
    pub timestamp: String,
    pub components: ComponentHealth,
}

/// 저장소 ping 결과로 컴포넌트 상태를 만듭니다.
fn component_health(has_database: bool, store_healthy: bool) -> ComponentHealth {
    use ComponentState::*;

    let backend = if has_database { "postgres" } else { "in-memory" };
    let (database, store) = match (has_database, store_healthy) {
        (true, true) => (
            ComponentStatus::new(Up, None),
            ComponentStatus::new(Up, Some(backend)),
        ),
        (true, false) => (
            ComponentStatus::new(Down, Some("connection failed")),
            ComponentStatus::new(Down, Some("ping failed")),
        ),
        (false, healthy) => (
            ComponentStatus::new(NotConfigured, None),
            ComponentStatus::new(if healthy { Up } else { Down }, Some(backend)),
        ),
    };

    ComponentHealth { database, store }
}

/// Liveness probe.
///
/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "서버 응답 가능", body = String)),
    tag = "health"
)]
pub async fn health_check() -> &'static str {
    "OK"
}

/// Readiness probe.
///
/// GET /health/ready
#[utoipa::path(
    get,
    path = "/health/ready",
    responses(
        (status = 200, description = "모든 컴포넌트 정상", body = HealthResponse),
        (status = 503, description = "저장소 연결 실패", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_ready(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthResponse>) {
    let store_healthy = state.is_store_healthy().await;
    let (status, code) = if store_healthy {
        ("healthy", StatusCode::OK)
    } else {
        ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
    };

    let response = HealthResponse {
        status: status.to_string(),
        version: state.version.clone(),
        uptime_secs: state.uptime_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        components: component_health(state.has_database(), store_healthy),
    };

    (code, Json(response))
}

/// 헬스 체크 라우터 생성.
pub fn health_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(health_ready))
}
