//! CLI 명령어 구현 모듈.

pub mod tokens;
pub mod users;

use clinic_core::Role;

/// clap 인자용 역할 파서.
pub fn parse_role(s: &str) -> Result<Role, String> {
    Role::parse(s).ok_or_else(|| format!("Invalid role: {}. Use: admin, user", s))
}
