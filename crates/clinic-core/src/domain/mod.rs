//! 도메인 모델.
//!
//! - [`Role`]: 사용자 역할 (admin, user)
//! - [`UserRecord`]: 자격증명 레코드 및 공개 projection
//! - [`PatientRecord`]: 환자 레코드
//! - [`Session`]: 클라이언트 세션

pub mod patient;
pub mod role;
pub mod session;
pub mod user;

pub use patient::{NewPatient, PatientChanges, PatientRecord, PatientResponse};
pub use role::Role;
pub use session::{LoginRequest, LoginResponse, Session};
pub use user::{normalize_email, AuthenticatedUser, NewUser, UserRecord, UserResponse};
