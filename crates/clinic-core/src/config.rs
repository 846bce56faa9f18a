//! 설정 관리.
//!
//! 기본값 → TOML 파일 → 환경 변수 순서로 덮어쓰며 [`AppConfig`]를 구성합니다.
//!
//! 환경 변수는 `CLINIC` 접두사와 `__` 구분자를 사용합니다.
//! 예: `CLINIC__AUTH__JWT_SECRET`, `CLINIC__SERVER__PORT`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{ClinicError, ClinicResult};

/// JWT 서명 키 최소 길이 (바이트).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// Access Token 최대 유효 기간 (30일).
pub const MAX_TOKEN_TTL_SECS: i64 = 30 * 24 * 60 * 60;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 서버 설정
    pub server: ServerConfig,
    /// 데이터베이스 설정
    pub database: DatabaseConfig,
    /// 인증 설정
    pub auth: AuthConfig,
    /// 로깅 설정
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 요청 타임아웃 (초)
    pub request_timeout_secs: u64,
    /// 허용할 CORS origin 목록. 비어 있으면 모든 origin 허용 (개발 모드)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
            request_timeout_secs: 30,
            cors_origins: Vec::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` 형식의 바인딩 주소.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL. 없으면 인메모리 저장소를 사용합니다.
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connection_timeout_secs: 10,
        }
    }
}

/// 인증 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 서명 키
    pub jwt_secret: SecretString,
    /// Access Token 유효 기간 (초)
    pub token_ttl_secs: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: SecretString::default(),
            token_ttl_secs: 3600,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨 필터
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 존재하지 않으면 무시합니다. 로드 후 [`AppConfig::validate`]를 수행합니다.
    pub fn load(path: Option<&Path>) -> ClinicResult<Self> {
        let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));

        let builder = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("CLINIC")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            );

        let mut config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| ClinicError::Config(e.to_string()))?;

        // 관례적인 DATABASE_URL도 허용
        if config.database.url.is_none() {
            config.database.url = std::env::var("DATABASE_URL").ok().filter(|u| !u.is_empty());
        }

        config.validate()?;
        Ok(config)
    }

    /// `CLINIC_CONFIG` 환경 변수가 가리키는 파일(없으면 기본 경로)에서 로드합니다.
    pub fn load_from_env() -> ClinicResult<Self> {
        let path = std::env::var("CLINIC_CONFIG").ok().map(PathBuf::from);
        Self::load(path.as_deref())
    }

    /// 설정값 검증.
    pub fn validate(&self) -> ClinicResult<()> {
        if self.auth.jwt_secret.expose_secret().len() < MIN_JWT_SECRET_LEN {
            return Err(ClinicError::Config(format!(
                "auth.jwt_secret must be at least {} bytes",
                MIN_JWT_SECRET_LEN
            )));
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.auth.token_ttl_secs) {
            return Err(ClinicError::Config(format!(
                "auth.token_ttl_secs must be between 1 and {}",
                MAX_TOKEN_TTL_SECS
            )));
        }
        if self.server.request_timeout_secs == 0 {
            return Err(ClinicError::Config(
                "server.request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
