//! 환자 관리 endpoint.
//!
//! 조회는 admin/user 모두, 생성/수정/삭제는 관리자 전용입니다.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use clinic_core::PatientResponse;

use crate::auth::{guarded, AllowedRoles};
use crate::error::{ApiErrorResponse, ApiResult};
use crate::services::{CreatePatientRequest, UpdatePatientRequest};
use crate::state::AppState;

/// 환자 등록.
///
/// POST /patients
#[utoipa::path(
    post,
    path = "/patients",
    request_body = CreatePatientRequest,
    responses(
        (status = 201, description = "등록 완료", body = PatientResponse),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 필요", body = ApiErrorResponse),
        (status = 403, description = "관리자 전용", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "patients"
)]
pub async fn create_patient(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreatePatientRequest>,
) -> ApiResult<(StatusCode, Json<PatientResponse>)> {
    let patient = state.patient_service().create(request).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

/// 환자 목록.
///
/// GET /patients
#[utoipa::path(
    get,
    path = "/patients",
    responses(
        (status = 200, description = "환자 목록", body = Vec<PatientResponse>),
        (status = 401, description = "인증 필요", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "patients"
)]
pub async fn list_patients(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PatientResponse>>> {
    Ok(Json(state.patient_service().list().await?))
}

/// 환자 조회.
///
/// GET /patients/{id}
#[utoipa::path(
    get,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "환자 ID")),
    responses(
        (status = 200, description = "환자", body = PatientResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "patients"
)]
pub async fn get_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<PatientResponse>> {
    Ok(Json(state.patient_service().get(id).await?))
}

/// 환자 부분 수정.
///
/// PATCH /patients/{id}
#[utoipa::path(
    patch,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "환자 ID")),
    request_body = UpdatePatientRequest,
    responses(
        (status = 200, description = "수정 완료", body = PatientResponse),
        (status = 400, description = "입력 검증 실패", body = ApiErrorResponse),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "patients"
)]
pub async fn update_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePatientRequest>,
) -> ApiResult<Json<PatientResponse>> {
    Ok(Json(state.patient_service().update(id, request).await?))
}

/// 환자 삭제.
///
/// DELETE /patients/{id}
#[utoipa::path(
    delete,
    path = "/patients/{id}",
    params(("id" = i64, Path, description = "환자 ID")),
    responses(
        (status = 204, description = "삭제 완료"),
        (status = 404, description = "없음", body = ApiErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "patients"
)]
pub async fn delete_patient(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.patient_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 환자 라우터 생성.
///
/// 같은 경로라도 메서드마다 허용 역할이 다르므로 메서드 단위로 가드를 붙입니다.
pub fn patients_router(state: &AppState) -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/patients",
            guarded(post(create_patient), state, AllowedRoles::ADMIN)
                .merge(guarded(get(list_patients), state, AllowedRoles::ANY)),
        )
        .route(
            "/patients/{id}",
            guarded(get(get_patient), state, AllowedRoles::ANY).merge(guarded(
                axum::routing::patch(update_patient).delete(delete_patient),
                state,
                AllowedRoles::ADMIN,
            )),
        )
}
