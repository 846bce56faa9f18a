//! 사용자 생성 및 비밀번호 해시 명령.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use clinic_api::auth::hash_password;
use clinic_api::repository::{run_migrations, PgUserStore};
use clinic_api::services::{CreateUserRequest, UserService};
use clinic_core::{Role, UserResponse};

/// 사용자 생성 설정.
pub struct CreateUserConfig {
    pub email: String,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    /// 데이터베이스 URL
    pub db_url: Option<String>,
}

impl CreateUserConfig {
    fn into_request(self) -> (CreateUserRequest, Role, Option<String>) {
        let request = CreateUserRequest {
            email: self.email,
            password: self.password,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role: Some(self.role),
        };
        (request, self.role, self.db_url)
    }
}

/// 데이터베이스에 사용자를 생성합니다.
///
/// API의 관리자 생성과 같은 검증/중복 검사를 거칩니다.
pub async fn create_user(config: CreateUserConfig) -> Result<UserResponse> {
    let (request, role, db_url) = config.into_request();

    let db_url = db_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "DATABASE_URL not found. Set DATABASE_URL environment variable or use --db-url flag"
            )
        })?;

    info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(&db_url)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool).await?;

    let service = UserService::new(Arc::new(PgUserStore::new(pool)));
    let user = service.create(request, Some(role)).await?;

    info!(user_id = user.id, role = %user.role, "User created");
    Ok(user)
}

/// 평문 비밀번호의 PHC 해시 문자열을 반환합니다.
pub fn hash(password: &SecretString) -> Result<String> {
    Ok(hash_password(password.expose_secret())?)
}
