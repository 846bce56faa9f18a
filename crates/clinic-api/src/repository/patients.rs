//! Patients Repository
//!
//! `patients` 테이블 연산을 담당합니다.

use async_trait::async_trait;
use sqlx::PgPool;

use clinic_core::{ClinicResult, NewPatient, PatientChanges, PatientRecord};

use super::{ping_pool, PatientStore};

/// PostgreSQL 환자 저장소.
#[derive(Debug, Clone)]
pub struct PgPatientStore {
    pool: PgPool,
}

impl PgPatientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientStore for PgPatientStore {
    async fn insert(&self, patient: NewPatient) -> ClinicResult<PatientRecord> {
        let record = sqlx::query_as::<_, PatientRecord>(
            r#"
            INSERT INTO patients (first_name, last_name, email, phone_number, dob)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&patient.first_name)
        .bind(&patient.last_name)
        .bind(&patient.email)
        .bind(&patient.phone_number)
        .bind(patient.dob)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> ClinicResult<Option<PatientRecord>> {
        let record = sqlx::query_as::<_, PatientRecord>("SELECT * FROM patients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    async fn list(&self) -> ClinicResult<Vec<PatientRecord>> {
        let records = sqlx::query_as::<_, PatientRecord>("SELECT * FROM patients ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn update(&self, id: i64, changes: PatientChanges) -> ClinicResult<Option<PatientRecord>> {
        // NULL 파라미터는 기존 값 유지
        let record = sqlx::query_as::<_, PatientRecord>(
            r#"
            UPDATE patients SET
                first_name   = COALESCE($2, first_name),
                last_name    = COALESCE($3, last_name),
                email        = COALESCE($4, email),
                phone_number = COALESCE($5, phone_number),
                dob          = COALESCE($6, dob),
                updated_at   = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.email)
        .bind(&changes.phone_number)
        .bind(changes.dob)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn delete(&self, id: i64) -> ClinicResult<bool> {
        let result = sqlx::query("DELETE FROM patients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> ClinicResult<()> {
        ping_pool(&self.pool).await
    }
}
