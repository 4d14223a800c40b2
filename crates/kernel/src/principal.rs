//! Authenticated request principal
//!
//! [`CurrentUser`] is inserted into request extensions by the auth
//! middleware after a bearer token has been validated; handlers call
//! [`CurrentUser::require`] with their declared allow-list.

use crate::error::app_error::{AppError, AppResult};
use crate::role::{Role, RoleSet};

/// The authenticated caller of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: i32,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Check this principal against an operation's allow-list
    ///
    /// Returns 403 Forbidden when the role is not in the set.
    pub fn require(&self, allowed: RoleSet) -> AppResult<()> {
        if allowed.contains(self.role) {
            Ok(())
        } else {
            Err(
                AppError::forbidden(format!("Role {} may not perform this operation", self.role))
                    .with_action(format!("Requires one of: {}", allowed)),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_require_allows_listed_role() {
        let user = CurrentUser::new(1, Role::Admin);
        assert!(user.require(RoleSet::ADMIN_ONLY).is_ok());
        assert!(user.require(RoleSet::ALL).is_ok());
    }

    #[test]
    fn test_require_rejects_unlisted_role() {
        let user = CurrentUser::new(2, Role::Elev);
        let err = user.require(RoleSet::STAFF).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }
}
