//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use clinic_core::{
    AuthenticatedUser, LoginRequest, LoginResponse, PatientResponse, Role, UserResponse,
};

use crate::error::ApiErrorResponse;
use crate::routes::{
    ComponentHealth, ComponentState, ComponentStatus, HealthResponse, MeResponse,
};
use crate::services::{
    CreatePatientRequest, CreateUserRequest, MessageResponse, UpdatePatientRequest,
};

// ==================== OpenAPI 문서 정의 ====================

/// Clinic API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Clinic Patient Management API",
        description = r#"
# 환자 관리 REST API

## 인증

`POST /auth/login`으로 발급받은 토큰을 `Authorization: Bearer <token>` 헤더에 포함하세요.

## 역할

- **admin**: 사용자 관리, 환자 생성/수정/삭제
- **user**: 환자 조회
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3001", description = "로컬 개발 서버"),
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 로그인 및 토큰 확인"),
        (name = "users", description = "사용자 - 계정 관리 (관리자)"),
        (name = "patients", description = "환자 - 환자 기록 관리")
    ),
    // ==================== 스키마 등록 ====================
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentState,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,
            MessageResponse,
            Role,

            // ===== Auth =====
            LoginRequest,
            LoginResponse,
            AuthenticatedUser,
            MeResponse,

            // ===== Users =====
            CreateUserRequest,
            UserResponse,

            // ===== Patients =====
            CreatePatientRequest,
            UpdatePatientRequest,
            PatientResponse,
        )
    ),
    // ==================== 경로 등록 ====================
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Auth =====
        crate::routes::auth::login,
        crate::routes::auth::me,

        // ===== Users =====
        crate::routes::users::register_user,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::delete_user,

        // ===== Patients =====
        crate::routes::patients::create_patient,
        crate::routes::patients::list_patients,
        crate::routes::patients::get_patient,
        crate::routes::patients::update_patient,
        crate::routes::patients::delete_patient,
    )
)]
pub struct ApiDoc;

/// `bearer_auth` 보안 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

// ==================== Swagger UI 라우터 ====================

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

// ==================== 테스트 ====================
