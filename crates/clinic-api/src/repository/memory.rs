//! 인메모리 저장소.
//!
//! `DATABASE_URL`이 없을 때(개발/테스트) 사용합니다. 테이블마다
//! `RwLock<BTreeMap>` 하나를 두고 id는 1부터 순차 할당합니다.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use clinic_core::{
    ClinicError, ClinicResult, NewPatient, NewUser, PatientChanges, PatientRecord, UserRecord,
};

use super::{PatientStore, UserStore};

#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// 인메모리 사용자 저장소.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    table: RwLock<Table<UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, user: NewUser) -> ClinicResult<UserRecord> {
        let mut table = self.table.write().await;

        if table.rows.values().any(|r| r.email == user.email) {
            return Err(ClinicError::Conflict(format!(
                "email already registered: {}",
                user.email
            )));
        }

        let now = Utc::now();
        let record = UserRecord {
            id: table.allocate_id(),
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            role: user.role,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_email(&self, email: &str) -> ClinicResult<Option<UserRecord>> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|r| r.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> ClinicResult<Option<UserRecord>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> ClinicResult<Vec<UserRecord>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn delete(&self, id: i64) -> ClinicResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> ClinicResult<()> {
        Ok(())
    }
}

/// 인메모리 환자 저장소.
#[derive(Debug, Default)]
pub struct MemoryPatientStore {
    table: RwLock<Table<PatientRecord>>,
}

impl MemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientStore for MemoryPatientStore {
    async fn insert(&self, patient: NewPatient) -> ClinicResult<PatientRecord> {
        let mut table = self.table.write().await;

        let now = Utc::now();
        let record = PatientRecord {
            id: table.allocate_id(),
            first_name: patient.first_name,
            last_name: patient.last_name,
            email: patient.email,
            phone_number: patient.phone_number,
            dob: patient.dob,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: i64) -> ClinicResult<Option<PatientRecord>> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn list(&self) -> ClinicResult<Vec<PatientRecord>> {
        Ok(self.table.read().await.rows.values().cloned().collect())
    }

    async fn update(&self, id: i64, changes: PatientChanges) -> ClinicResult<Option<PatientRecord>> {
        let mut table = self.table.write().await;

        let Some(record) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        changes.apply(record);
        record.updated_at = Utc::now();

        Ok(Some(record.clone()))
    }

    async fn delete(&self, id: i64) -> ClinicResult<bool> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> ClinicResult<()> {
        Ok(())
    }
}
