//! Axum용 JWT 인증/역할 미들웨어.
//!
//! 보호된 라우트마다 [`guarded`]로 [`require_roles`] 레이어를 붙입니다.
//! 미들웨어는 토큰을 검증(401)한 뒤 역할을 확인(403)하고,
//! 통과하면 [`CurrentUser`]를 요청 extensions에 넣습니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! Router::new().route(
//!     "/patients",
//!     guarded(get(list_patients), &state, AllowedRoles::ANY),
//! )
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};
use tracing::{debug, Span};

use super::{authorize, AllowedRoles, Claims, TokenService};
use crate::error::ApiError;
use crate::metrics::{record_access_denied, DenialReason};
use crate::state::AppState;

/// 라우트별 가드 설정.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    pub tokens: Arc<TokenService>,
    pub allowed: AllowedRoles,
}

impl RouteGuard {
    pub fn new(tokens: Arc<TokenService>, allowed: AllowedRoles) -> Self {
        Self { tokens, allowed }
    }
}

/// 인증된 호출자.
///
/// [`require_roles`]가 통과시킨 요청에서만 추출됩니다.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Claims);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(ApiError::Unauthenticated)
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 추출.
///
/// 스킴 이름은 대소문자를 구분하지 않습니다 (RFC 7235).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    Some(token.trim()).filter(|token| !token.is_empty())
}

/// 토큰 검증 후 역할을 확인하는 미들웨어.
///
/// 헤더 없음, 형식 오류, 서명 불일치, 만료는 모두 같은 401 응답입니다.
/// 역할 검사는 토큰이 유효할 때만 수행되므로 401이 403보다 우선합니다.
pub async fn require_roles(
    State(guard): State<RouteGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = match bearer_token(req.headers()).map(|token| guard.tokens.verify(token)) {
        Some(Ok(claims)) => claims,
        _ => {
            record_access_denied(DenialReason::Unauthenticated);
            return Err(ApiError::Unauthenticated);
        }
    };

    if !authorize(Some(claims.role), &guard.allowed) {
        debug!(
            user_id = claims.sub,
            role = %claims.role,
            allowed = %guard.allowed,
            "access denied: role not allowed"
        );
        record_access_denied(DenialReason::Forbidden);
        return Err(ApiError::Forbidden);
    }

    Span::current().record("user_id", claims.sub);
    req.extensions_mut().insert(CurrentUser(claims));

    Ok(next.run(req).await)
}

/// 메서드 라우터에 역할 가드를 붙입니다.
pub fn guarded(
    method_router: MethodRouter<Arc<AppState>>,
    state: &AppState,
    allowed: AllowedRoles,
) -> MethodRouter<Arc<AppState>> {
    let guard = RouteGuard::new(state.tokens.clone(), allowed);
    method_router.route_layer(middleware::from_fn_with_state(guard, require_roles))
}
