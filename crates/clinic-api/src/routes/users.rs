//! 사용자 관리 endpoint.
//!
//! `POST /users/register`만 공개이고 나머지는 관리자 전용입니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use clinic_core::UserResponse;

use crate::auth::{guarded, AllowedRoles};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::services::{CreateUserRequest, MessageResponse};
use crate::state::AppState;

/// 공개 회원가입. 역할은 항상 `user`.
///
/// POST /users/register
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "가입 완료", body = UserResponse),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 409, description = "이메일 중복", body = ApiErrorResponse)
    ),
    tag = "users"
)]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service().register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 사용자 생성 (역할 지정 가능).
///
/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "생성 완료", body = UserResponse),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "관리자 전용", body = ApiErrorResponse),
        (status = 409, description = "이메일 중복", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state.user_service().create(request, None).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// 사용자 목록.
///
/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "사용자 목록", body = Vec<UserResponse>),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "관리자 전용", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    Ok(Json(state.user_service().list().await?))
}

/// 사용자 조회.
///
/// GET /users/{id}
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "사용자 ID")),
    responses(
        (status = 200, description = "사용자", body = UserResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    Ok(Json(state.user_service().get(id).await?))
}

/// 사용자 삭제.
///
/// DELETE /users/{id}
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "사용자 ID")),
    responses(
        (status = 200, description = "삭제 완료", body = MessageResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MessageResponse>> {
    Ok(Json(state.user_service().delete(id).await?))
}

/// 사용자 라우터 생성.
pub fn users_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .route("/users/register", post(register_user))
        .route(
            "/users",
            guarded(post(create_user).get(list_users), state, AllowedRoles::ADMIN),
        )
        .route(
            "/users/{id}",
            guarded(get(get_user).delete(delete_user), state, AllowedRoles::ADMIN),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request},
        response::Response,
    };
    use clinic_core::Role;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::state::create_test_state;

    struct TestApp {
        router: Router,
        admin_token: String,
        user_token: String,
    }

    fn test_app() -> TestApp {
        let state = create_test_state();
        let admin_token = state.tokens.issue(100, "root@clinic.test", Role::Admin).unwrap();
        let user_token = state.tokens.issue(200, "staff@clinic.test", Role::User).unwrap();
        let router = users_router(&state).with_state(Arc::new(state));

        TestApp {
            router,
            admin_token,
            user_token,
        }
    }

    fn request(
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn signup(email: &str, role: &str) -> Value {
        json!({
            "email": email,
            "password": "Welcome123",
            "firstName": "Sam",
            "lastName": "Lee",
            "role": role
        })
    }

    #[tokio::test]
    async fn test_register_is_public_and_forces_user_role() {
        let app = test_app();
        let response = app
            .router
            .oneshot(request(
                Method::POST,
                "/users/register",
                None,
                Some(signup("new@clinic.test", "admin")),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["role"], "user");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
    }

    #[tokio::test]
    async fn test_admin_routes_reject_user_role() {
        let app = test_app();

        let cases = [
            (Method::GET, "/users"),
            (Method::GET, "/users/1"),
            (Method::DELETE, "/users/1"),
        ];

        for (method, uri) in cases {
            let response = app
                .router
                .clone()
                .oneshot(request(method, uri, Some(&app.user_token), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::FORBIDDEN, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_admin_routes_reject_missing_token() {
        let app = test_app();
        let response = app
            .router
            .oneshot(request(Method::GET, "/users", None, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_admin_create_list_get_delete() {
        let app = test_app();
        let admin = Some(app.admin_token.as_str());

        let response = app
            .router
            .clone()
            .oneshot(request(
                Method::POST,
                "/users",
                admin,
                Some(signup("doc@clinic.test", "admin")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = json_body(response).await;
        assert_eq!(created["role"], "admin");
        let id = created["id"].as_i64().unwrap();

        let response = app
            .router
            .clone()
            .oneshot(request(Method::GET, "/users", admin, None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

        let response = app
            .router
            .clone()
            .oneshot(request(Method::GET, &format!("/users/{id}"), admin, None))
            .await
            .unwrap();
        assert_eq!(json_body(response).await["email"], "doc@clinic.test");

        let response = app
            .router
            .clone()
            .oneshot(request(Method::DELETE, &format!("/users/{id}"), admin, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["message"], "User deleted successfully");

        let response = app
            .router
            .oneshot(request(Method::GET, &format!("/users/{id}"), admin, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_duplicate_registration_conflicts() {
        let app = test_app();
        let body = signup("twice@clinic.test", "user");

        let first = app
            .router
            .clone()
            .oneshot(request(Method::POST, "/users/register", None, Some(body.clone())))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = app
            .router
            .oneshot(request(Method::POST, "/users/register", None, Some(body)))
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(second).await["code"], "CONFLICT");
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let app = test_app();
        let mut body = signup("bad-email", "user");
        body["password"] = json!("short");

        let response = app
            .router
            .oneshot(request(Method::POST, "/users/register", None, Some(body)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = json_body(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["details"]["email"].is_array());
        assert!(json["details"]["password"].is_array());
    }
}
