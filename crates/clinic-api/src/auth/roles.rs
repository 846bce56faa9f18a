//! 역할 기반 접근 제어 (RBAC).
//!
//! 라우트마다 허용 역할 집합([`AllowedRoles`])을 선언하고,
//! 인증 미들웨어가 [`authorize`]로 한 번만 판단합니다.

pub use clinic_core::Role;

/// 라우트가 허용하는 역할 집합.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowedRoles(&'static [Role]);

impl AllowedRoles {
    /// 관리자 전용.
    pub const ADMIN: AllowedRoles = AllowedRoles(&[Role::Admin]);
    /// 인증된 모든 역할.
    pub const ANY: AllowedRoles = AllowedRoles(&[Role::Admin, Role::User]);

    /// 임의의 역할 집합.
    pub const fn of(roles: &'static [Role]) -> Self {
        AllowedRoles(roles)
    }

    /// 역할이 집합에 포함되는지 확인.
    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// 허용 역할 목록.
    pub fn roles(&self) -> &'static [Role] {
        self.0
    }
}

impl std::fmt::Display for AllowedRoles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.0.iter().map(Role::as_str).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// 호출자 역할이 허용 집합에 포함될 때만 통과.
///
/// 역할이 없으면 거부합니다.
pub fn authorize(caller: Option<Role>, allowed: &AllowedRoles) -> bool {
    caller.is_some_and(|role| allowed.contains(role))
}
