//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 공유됩니다.
//! 저장소는 트레이트 객체로 보관하므로 PostgreSQL/인메모리 구현을 바꿔 끼울 수 있습니다.

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::TokenService;
use crate::repository::{
    MemoryPatientStore, MemoryUserStore, PatientStore, PgPatientStore, PgUserStore, UserStore,
};
use crate::services::{AuthService, PatientService, UserService};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 사용자(자격증명) 저장소
    pub users: Arc<dyn UserStore>,

    /// 환자 저장소
    pub patients: Arc<dyn PatientStore>,

    /// 토큰 발급/검증 (서명 키와 TTL 보유)
    pub tokens: Arc<TokenService>,

    /// 데이터베이스 연결 풀 (인메모리 모드에서는 None)
    pub db_pool: Option<PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 저장소와 토큰 서비스로 AppState 생성.
    pub fn new(
        users: Arc<dyn UserStore>,
        patients: Arc<dyn PatientStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            users,
            patients,
            tokens: Arc::new(tokens),
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 저장소 기반 상태.
    pub fn with_postgres(pool: PgPool, tokens: TokenService) -> Self {
        let mut state = Self::new(
            Arc::new(PgUserStore::new(pool.clone())),
            Arc::new(PgPatientStore::new(pool.clone())),
            tokens,
        );
        state.db_pool = Some(pool);
        state
    }

    /// 인메모리 저장소 기반 상태.
    pub fn in_memory(tokens: TokenService) -> Self {
        Self::new(
            Arc::new(MemoryUserStore::new()),
            Arc::new(MemoryPatientStore::new()),
            tokens,
        )
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(self.users.clone(), self.tokens.clone())
    }

    pub fn user_service(&self) -> UserService {
        UserService::new(self.users.clone())
    }

    pub fn patient_service(&self) -> PatientService {
        PatientService::new(self.patients.clone())
    }

    /// 데이터베이스 사용 여부.
    pub fn has_database(&self) -> bool {
        self.db_pool.is_some()
    }

    /// 서버 업타임(초) 반환.
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }

    /// 저장소 연결 상태 확인.
    pub async fn is_store_healthy(&self) -> bool {
        self.users.ping().await.is_ok() && self.patients.ping().await.is_ok()
    }
}

/// 테스트용 서명 키.
#[cfg(any(test, feature = "test-utils"))]
pub const TEST_JWT_SECRET: &str = "test-secret-key-for-jwt-testing-minimum-32-chars";

/// 테스트용 AppState 생성 헬퍼.
///
/// 실제 DB 연결 없이 인메모리 저장소로 동작합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state() -> AppState {
    AppState::in_memory(TokenService::new(TEST_JWT_SECRET, 3600))
}
