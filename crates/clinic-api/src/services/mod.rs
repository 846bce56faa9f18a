//! 애플리케이션 서비스.
//!
//! 라우트 핸들러와 저장소 사이에서 검증, 해싱, 토큰 발급을 담당합니다.

pub mod auth;
pub mod patients;
pub mod users;
mod validation;

pub use auth::AuthService;
pub use patients::{CreatePatientRequest, PatientService, UpdatePatientRequest};
pub use users::{CreateUserRequest, MessageResponse, UserService};
pub use validation::MAX_AGE_YEARS;
