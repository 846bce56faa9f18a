//! 환자 레코드.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 저장된 환자 레코드.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct PatientRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub dob: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 새 환자 입력.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub dob: NaiveDate,
}

/// 환자 부분 수정. `None` 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub dob: Option<NaiveDate>,
}

impl PatientChanges {
    /// 변경할 필드가 하나도 없는지 확인.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.dob.is_none()
    }

    /// 레코드에 변경 사항을 적용합니다. `updated_at`은 호출자가 관리합니다.
    pub fn apply(&self, record: &mut PatientRecord) {
        if let Some(first_name) = &self.first_name {
            record.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            record.last_name = last_name.clone();
        }
        if let Some(email) = &self.email {
            record.email = email.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            record.phone_number = phone_number.clone();
        }
        if let Some(dob) = self.dob {
            record.dob = dob;
        }
    }
}

/// 환자 응답.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "utoipa-support", derive(utoipa::ToSchema))]
pub struct PatientResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// 생년월일 (YYYY-MM-DD)
    pub dob: NaiveDate,
}

impl From<&PatientRecord> for PatientResponse {
    fn from(record: &PatientRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone_number: record.phone_number.clone(),
            dob: record.dob,
        }
    }
}
