//! 전체 라우터를 통한 인증/인가 흐름 통합 테스트.
//!
//! 데이터베이스 없이 인메모리 저장소로 실행됩니다.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use clinic_api::auth::{hash_password, TokenService};
use clinic_api::repository::UserStore;
use clinic_api::routes::create_api_router;
use clinic_api::state::AppState;
use clinic_core::{NewUser, Role};

const SECRET: &str = "integration-secret-key-at-least-32-bytes";
const TTL: i64 = 3600;

struct TestServer {
    router: Router,
    tokens: Arc<TokenService>,
}

impl TestServer {
    /// 관리자(admin@clinic.test / Admin1234)가 시딩된 서버.
    async fn start() -> Self {
        let state = AppState::in_memory(TokenService::new(SECRET, TTL));
        state
            .users
            .insert(NewUser {
                email: "admin@clinic.test".to_string(),
                password_hash: hash_password("Admin1234").unwrap().into(),
                first_name: "Ada".to_string(),
                last_name: "Admin".to_string(),
                phone: None,
                role: Role::Admin,
            })
            .await
            .unwrap();

        let tokens = state.tokens.clone();
        let router = create_api_router(&state).with_state(Arc::new(state));
        Self { router, tokens }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn login(&self, email: &str, password: &str) -> Response {
        self.send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn token_for(&self, email: &str, password: &str) -> String {
        let response = self.login(email, password).await;
        assert_eq!(response.status(), StatusCode::OK);
        json_body(response).await["access_token"]
            .as_str()
            .unwrap()
            .to_string()
    }
}

async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn json_body(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[tokio::test]
async fn login_returns_token_and_public_user() {
    let server = TestServer::start().await;

    let response = server.login("ADMIN@clinic.test", "Admin1234").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["user"]["email"], "admin@clinic.test");
    assert_eq!(json["user"]["role"], "admin");

    let raw = json.to_string();
    assert!(!raw.contains("password"));
    assert!(!raw.contains("argon2"));
}

#[tokio::test]
async fn token_claims_match_user_and_ttl() {
    let server = TestServer::start().await;
    let token = server.token_for("admin@clinic.test", "Admin1234").await;

    let claims = server.tokens.verify(&token).unwrap();
    assert_eq!(claims.email, "admin@clinic.test");
    assert_eq!(claims.role, Role::Admin);
    assert_eq!(claims.exp - claims.iat, TTL);
}

#[tokio::test]
async fn wrong_password_and_unknown_email_are_indistinguishable() {
    let server = TestServer::start().await;

    let wrong = server.login("admin@clinic.test", "Wrong1234").await;
    let unknown = server.login("nobody@clinic.test", "Admin1234").await;

    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_bytes(wrong).await, body_bytes(unknown).await);
}

#[tokio::test]
async fn registered_user_can_read_patients_but_not_manage_users() {
    let server = TestServer::start().await;

    let response = server
        .send(
            Method::POST,
            "/users/register",
            None,
            Some(json!({
                "email": "staff@clinic.test",
                "password": "Staff1234",
                "firstName": "Sol",
                "lastName": "Kim",
                "role": "admin"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let token = server.token_for("staff@clinic.test", "Staff1234").await;
    let auth = bearer(&token);

    let me = json_body(server.send(Method::GET, "/auth/me", Some(&auth), None).await).await;
    assert_eq!(me["role"], "user");

    let response = server.send(Method::GET, "/patients", Some(&auth), None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.send(Method::GET, "/users", Some(&auth), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["code"], "FORBIDDEN");
}

#[tokio::test]
async fn admin_manages_patients_end_to_end() {
    let server = TestServer::start().await;
    let auth = bearer(&server.token_for("admin@clinic.test", "Admin1234").await);

    let response = server
        .send(
            Method::POST,
            "/patients",
            Some(&auth),
            Some(json!({
                "firstName": "Mina",
                "lastName": "Cho",
                "email": "mina@example.com",
                "phoneNumber": "010-1234-5678",
                "dob": "1990-02-28"
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = json_body(response).await["id"].as_i64().unwrap();

    let response = server
        .send(
            Method::PATCH,
            &format!("/patients/{id}"),
            Some(&auth),
            Some(json!({ "phoneNumber": "010-9999-0000" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["phoneNumber"], "010-9999-0000");

    let response = server
        .send(Method::DELETE, &format!("/patients/{id}"), Some(&auth), None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list = json_body(server.send(Method::GET, "/patients", Some(&auth), None).await).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rejected_tokens_all_yield_same_401() {
    let server = TestServer::start().await;
    let now = Utc::now().timestamp();

    let expired = server
        .tokens
        .issue_at(1, "admin@clinic.test", Role::Admin, now - TTL - 1)
        .unwrap();
    let foreign = TokenService::new("some-other-secret-key-of-32-bytes-plus", TTL)
        .issue(1, "admin@clinic.test", Role::Admin)
        .unwrap();
    let valid = server.tokens.issue(1, "admin@clinic.test", Role::Admin).unwrap();
    let tampered = {
        let mut parts: Vec<String> = valid.split('.').map(str::to_string).collect();
        parts[1] = parts[1].chars().rev().collect();
        parts.join(".")
    };

    let headers = [
        None,
        Some("Bearer".to_string()),
        Some(format!("Token {valid}")),
        Some(bearer("not-a-jwt")),
        Some(bearer(&expired)),
        Some(bearer(&foreign)),
        Some(bearer(&tampered)),
    ];

    let mut bodies = Vec::new();
    for header in &headers {
        let response = server
            .send(Method::GET, "/patients", header.as_deref(), None)
            .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header:?}");
        bodies.push(body_bytes(response).await);
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    let response = server
        .send(Method::GET, "/patients", Some(&bearer(&valid)), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoints_are_public() {
    let server = TestServer::start().await;

    let response = server.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.send(Method::GET, "/health/ready", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["status"], "healthy");
}
