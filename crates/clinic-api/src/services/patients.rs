//! 환자 관리 서비스.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use validator::Validate;

use clinic_core::{NewPatient, PatientChanges, PatientResponse};

use super::validation::{validate_dob, validate_phone};
use crate::error::{ApiError, ApiResult};
use crate::metrics::record_patient_change;
use crate::repository::PatientStore;

/// 환자 등록 요청.
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePatientRequest {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: String,
    /// 생년월일 (YYYY-MM-DD)
    #[validate(custom(function = "validate_dob"))]
    #[schema(example = "1985-04-12")]
    pub dob: NaiveDate,
}

impl From<CreatePatientRequest> for NewPatient {
    fn from(request: CreatePatientRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email.trim().to_string(),
            phone_number: request.phone_number,
            dob: request.dob,
        }
    }
}

/// 환자 부분 수정 요청. 생략한 필드는 변경되지 않습니다.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub first_name: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub last_name: Option<String>,
    #[serde(default)]
    #[validate(
        email(message = "Invalid email address"),
        length(max = 255, message = "Email must be at most 255 characters")
    )]
    pub email: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_phone"))]
    pub phone_number: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_dob"))]
    pub dob: Option<NaiveDate>,
}

impl From<UpdatePatientRequest> for PatientChanges {
    fn from(request: UpdatePatientRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email.map(|e| e.trim().to_string()),
            phone_number: request.phone_number,
            dob: request.dob,
        }
    }
}

/// 환자 서비스.
#[derive(Clone)]
pub struct PatientService {
    patients: Arc<dyn PatientStore>,
}

impl PatientService {
    pub fn new(patients: Arc<dyn PatientStore>) -> Self {
        Self { patients }
    }

    pub async fn create(&self, request: CreatePatientRequest) -> ApiResult<PatientResponse> {
        request.validate()?;

        let record = self.patients.insert(request.into()).await?;

        record_patient_change("create");
        info!(patient_id = record.id, "patient created");

        Ok(PatientResponse::from(&record))
    }

    pub async fn list(&self) -> ApiResult<Vec<PatientResponse>> {
        let records = self.patients.list().await?;
        Ok(records.iter().map(PatientResponse::from).collect())
    }

    pub async fn get(&self, id: i64) -> ApiResult<PatientResponse> {
        self.patients
            .find_by_id(id)
            .await?
            .map(|record| PatientResponse::from(&record))
            .ok_or_else(|| patient_not_found(id))
    }

    /// 부분 수정. 빈 요청은 현재 레코드를 그대로 반환합니다.
    pub async fn update(&self, id: i64, request: UpdatePatientRequest) -> ApiResult<PatientResponse> {
        request.validate()?;

        let changes = PatientChanges::from(request);
        if changes.is_empty() {
            return self.get(id).await;
        }

        let record = self
            .patients
            .update(id, changes)
            .await?
            .ok_or_else(|| patient_not_found(id))?;

        record_patient_change("update");
        info!(patient_id = id, "patient updated");

        Ok(PatientResponse::from(&record))
    }

    pub async fn delete(&self, id: i64) -> ApiResult<()> {
        if !self.patients.delete(id).await? {
            return Err(patient_not_found(id));
        }

        record_patient_change("delete");
        info!(patient_id = id, "patient deleted");
        Ok(())
    }
}

fn patient_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Patient with ID {id} not found"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryPatientStore;

    fn service() -> PatientService {
        PatientService::new(Arc::new(MemoryPatientStore::new()))
    }

    fn create_request() -> CreatePatientRequest {
        CreatePatientRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            phone_number: "+1 (555) 010-0199".to_string(),
            dob: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service();
        let created = service.create(create_request()).await.unwrap();

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_changes_only_given_fields() {
        let service = service();
        let created = service.create(create_request()).await.unwrap();

        let updated = service
            .update(
                created.id,
                UpdatePatientRequest {
                    last_name: Some("Smith".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.last_name, "Smith");
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.dob, created.dob);
    }

    #[tokio::test]
    async fn test_empty_update_returns_current() {
        let service = service();
        let created = service.create(create_request()).await.unwrap();

        let same = service
            .update(created.id, UpdatePatientRequest::default())
            .await
            .unwrap();
        assert_eq!(same, created);
    }

    #[tokio::test]
    async fn test_not_found_message() {
        let service = service();

        let err = service.get(42).await.unwrap_err();
        assert_eq!(err.to_string(), "Patient with ID 42 not found");

        let rename = UpdatePatientRequest {
            first_name: Some("X".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update(42, rename).await, Err(ApiError::NotFound(_))));
        assert!(matches!(service.delete(42).await, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_validation() {
        let service = service();

        let mut future_dob = create_request();
        future_dob.dob = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        assert!(matches!(service.create(future_dob).await, Err(ApiError::Validation(_))));

        let mut bad_email = create_request();
        bad_email.email = "nope".to_string();
        assert!(matches!(service.create(bad_email).await, Err(ApiError::Validation(_))));

        let bad_update = UpdatePatientRequest {
            phone_number: Some("abc".to_string()),
            ..Default::default()
        };
        assert!(matches!(service.update(1, bad_update).await, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_phone_longer_than_column_rejected() {
        let service = service();

        let mut long_phone = create_request();
        long_phone.phone_number = "1".repeat(40);
        assert!(matches!(service.create(long_phone).await, Err(ApiError::Validation(_))));
        assert!(service.list().await.unwrap().is_empty());

        let created = service.create(create_request()).await.unwrap();
        let long_update = UpdatePatientRequest {
            phone_number: Some("1".repeat(33)),
            ..Default::default()
        };
        assert!(matches!(
            service.update(created.id, long_update).await,
            Err(ApiError::Validation(_))
        ));
        assert_eq!(service.get(created.id).await.unwrap().phone_number, created.phone_number);
    }

    #[tokio::test]
    async fn test_email_longer_than_column_rejected() {
        let service = service();

        let mut long_email = create_request();
        // 형식은 유효하지만 VARCHAR(255)를 넘는 주소
        let domain = format!("{}com", format!("{}.", "b".repeat(60)).repeat(4));
        long_email.email = format!("{}@{}", "a".repeat(60), domain);
        assert!(long_email.email.len() > 255);
        assert!(matches!(service.create(long_email).await, Err(ApiError::Validation(_))));
    }

    #[tokio::test]
    async fn test_delete() {
        let service = service();
        let created = service.create(create_request()).await.unwrap();

        service.delete(created.id).await.unwrap();
        assert!(matches!(service.get(created.id).await, Err(ApiError::NotFound(_))));
    }
}
