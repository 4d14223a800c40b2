//! Role and permission vocabulary
//!
//! Every protected operation declares the set of roles allowed to call it
//! as a [`RoleSet`] constant; the authentication gate checks the caller's
//! [`Role`] against that set. String-literal role checks are deliberately
//! not supported.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User role
///
/// Stored as a `SMALLINT` discriminant; the display codes are the Danish
/// labels the front end shows ("Elev" = student, "Instruktør" = instructor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[repr(i16)]
pub enum Role {
    #[default]
    Elev = 0,
    // ASCII alias accepted on input
    #[serde(rename = "Instruktør", alias = "Instruktoer")]
    Instruktoer = 1,
    Admin = 2,
}

impl Role {
    #[inline]
    pub const fn id(&self) -> i16 {
        *self as i16
    }

    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Elev => "Elev",
            Role::Instruktoer => "Instruktør",
            Role::Admin => "Admin",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    #[inline]
    pub const fn is_staff(&self) -> bool {
        matches!(self, Role::Instruktoer | Role::Admin)
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(Role::Elev),
            1 => Some(Role::Instruktoer),
            2 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Elev" => Some(Role::Elev),
            // ASCII fallback accepted on input
            "Instruktør" | "Instruktoer" => Some(Role::Instruktoer),
            "Admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Immutable set of roles, usable in `const` allow-list declarations
///
/// ## Examples
/// ```rust
/// use kernel::role::{Role, RoleSet};
///
/// const STAFF: RoleSet = RoleSet::of(&[Role::Instruktoer, Role::Admin]);
/// assert!(STAFF.contains(Role::Admin));
/// assert!(!STAFF.contains(Role::Elev));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSet(u8);

impl RoleSet {
    /// すべてのロールを許可
    pub const ALL: RoleSet = RoleSet::of(&[Role::Elev, Role::Instruktoer, Role::Admin]);
    /// 教職員のみ（Instruktør と Admin）
    pub const STAFF: RoleSet = RoleSet::of(&[Role::Instruktoer, Role::Admin]);
    /// 管理者のみ
    pub const ADMIN_ONLY: RoleSet = RoleSet::of(&[Role::Admin]);

    pub const fn of(roles: &[Role]) -> Self {
        let mut bits = 0u8;
        let mut i = 0;
        while i < roles.len() {
            bits |= 1 << roles[i] as u8;
            i += 1;
        }
        Self(bits)
    }

    #[inline]
    pub const fn contains(&self, role: Role) -> bool {
        self.0 & (1 << role as u8) != 0
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Roles in the set, for error messages
    pub fn roles(&self) -> Vec<Role> {
        [Role::Elev, Role::Instruktoer, Role::Admin]
            .into_iter()
            .filter(|r| self.contains(*r))
            .collect()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.roles().iter().map(|r| r.code()).collect();
        f.write_str(&codes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ids_round_trip() {
        for role in [Role::Elev, Role::Instruktoer, Role::Admin] {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(9), None);
    }

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::Elev.code(), "Elev");
        assert_eq!(Role::Instruktoer.code(), "Instruktør");
        assert_eq!(Role::Admin.code(), "Admin");
        assert_eq!(Role::from_code("Instruktør"), Some(Role::Instruktoer));
        assert_eq!(Role::from_code("Instruktoer"), Some(Role::Instruktoer));
        assert_eq!(Role::from_code("Viceværten"), None);
    }

    #[test]
    fn test_role_checks() {
        assert!(!Role::Elev.is_staff());
        assert!(Role::Instruktoer.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Instruktoer.is_admin());
    }

    #[test]
    fn test_role_set_membership() {
        assert!(RoleSet::ALL.contains(Role::Elev));
        assert!(RoleSet::STAFF.contains(Role::Instruktoer));
        assert!(!RoleSet::STAFF.contains(Role::Elev));
        assert!(RoleSet::ADMIN_ONLY.contains(Role::Admin));
        assert!(!RoleSet::ADMIN_ONLY.contains(Role::Instruktoer));
        assert!(RoleSet::of(&[]).is_empty());
    }

    #[test]
    fn test_role_set_display() {
        assert_eq!(RoleSet::STAFF.to_string(), "Instruktør, Admin");
    }
}
