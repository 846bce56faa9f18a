//! # Clinic Core
//!
//! 클리닉 백엔드의 핵심 도메인 모델 및 공통 인프라를 제공합니다.
//!
//! - 사용자 역할, 자격증명 레코드, 환자 레코드
//! - 로그인 요청/응답 및 클라이언트 세션
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use crate::config::{AppConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig};
pub use crate::domain::*;
pub use crate::error::{ClinicError, ClinicResult};
pub use crate::logging::{init_logging, LogConfig, LogFormat, LogTarget, LoggingError};
