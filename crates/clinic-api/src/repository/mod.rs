//! Repository pattern for persistence.
//!
//! 라우트/서비스는 [`UserStore`], [`PatientStore`] 트레이트에만 의존합니다.
//! PostgreSQL 구현(`Pg*`)과 데이터베이스 없이 동작하는 인메모리 구현(`Memory*`)이 있습니다.

pub mod memory;
pub mod patients;
pub mod users;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use clinic_core::{
    ClinicError, ClinicResult, NewPatient, NewUser, PatientChanges, PatientRecord, UserRecord,
};

pub use memory::{MemoryPatientStore, MemoryUserStore};
pub use patients::PgPatientStore;
pub use users::PgUserStore;

/// 사용자(자격증명) 저장소.
///
/// 이메일은 정규화된 값으로 전달되어야 합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 사용자 추가. 이메일 중복 시 [`ClinicError::Conflict`].
    async fn insert(&self, user: NewUser) -> ClinicResult<UserRecord>;

    async fn find_by_email(&self, email: &str) -> ClinicResult<Option<UserRecord>>;

    async fn find_by_id(&self, id: i64) -> ClinicResult<Option<UserRecord>>;

    /// 전체 사용자 (id 오름차순).
    async fn list(&self) -> ClinicResult<Vec<UserRecord>>;

    /// 삭제. 대상이 없으면 `false`.
    async fn delete(&self, id: i64) -> ClinicResult<bool>;

    /// 저장소 연결 확인.
    async fn ping(&self) -> ClinicResult<()>;
}

/// 환자 저장소.
#[async_trait]
pub trait PatientStore: Send + Sync {
    async fn insert(&self, patient: NewPatient) -> ClinicResult<PatientRecord>;

    async fn find_by_id(&self, id: i64) -> ClinicResult<Option<PatientRecord>>;

    /// 전체 환자 (id 오름차순).
    async fn list(&self) -> ClinicResult<Vec<PatientRecord>>;

    /// 부분 수정. 대상이 없으면 `None`.
    async fn update(&self, id: i64, changes: PatientChanges) -> ClinicResult<Option<PatientRecord>>;

    /// 삭제. 대상이 없으면 `false`.
    async fn delete(&self, id: i64) -> ClinicResult<bool>;

    async fn ping(&self) -> ClinicResult<()>;
}

/// 데이터베이스 마이그레이션을 실행합니다.
pub async fn run_migrations(pool: &PgPool) -> ClinicResult<()> {
    info!("Running database migrations...");

    sqlx::migrate!("../../migrations")
        .run(pool)
        .await
        .map_err(|e| ClinicError::Database(e.to_string()))?;

    info!("Migrations completed successfully");
    Ok(())
}

/// `SELECT 1`로 연결 상태를 확인합니다.
pub(crate) async fn ping_pool(pool: &PgPool) -> ClinicResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
