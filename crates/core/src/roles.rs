//! User roles.
//!
//! Role names are stored verbatim in `users.role` and must match the CHECK
//! constraint in `20250101000001_create_users.sql`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_SUPER_ADMIN: &str = "SUPER_ADMIN";
pub const ROLE_CHIEF_ACCOUNT_MANAGER: &str = "CHIEF_ACCOUNT_MANAGER";
pub const ROLE_ACCOUNT_MANAGER: &str = "ACCOUNT_MANAGER";
pub const ROLE_FIELD_AUDITOR: &str = "FIELD_AUDITOR";
pub const ROLE_CLIENT_AGENCY_USER: &str = "CLIENT_AGENCY_USER";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    ChiefAccountManager,
    AccountManager,
    FieldAuditor,
    ClientAgencyUser,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::ChiefAccountManager,
        Role::AccountManager,
        Role::FieldAuditor,
        Role::ClientAgencyUser,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => ROLE_SUPER_ADMIN,
            Role::ChiefAccountManager => ROLE_CHIEF_ACCOUNT_MANAGER,
            Role::AccountManager => ROLE_ACCOUNT_MANAGER,
            Role::FieldAuditor => ROLE_FIELD_AUDITOR,
            Role::ClientAgencyUser => ROLE_CLIENT_AGENCY_USER,
        }
    }

    /// Super admins and chief account managers run the back office.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::ChiefAccountManager)
    }

    /// Admins plus account managers: anyone who reviews campaign work.
    pub fn is_manager(self) -> bool {
        self.is_admin() || self == Role::AccountManager
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid role '{s}'. Must be one of: {}",
                    Role::ALL.map(Role::as_str).join(", ")
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        let err = "ADMIN".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Invalid role 'ADMIN'"));
    }

    #[test]
    fn admin_and_manager_tiers() {
        assert!(Role::SuperAdmin.is_admin());
        assert!(Role::ChiefAccountManager.is_admin());
        assert!(!Role::AccountManager.is_admin());
        assert!(Role::AccountManager.is_manager());
        assert!(!Role::FieldAuditor.is_manager());
        assert!(!Role::ClientAgencyUser.is_manager());
    }

    #[test]
    fn serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&Role::ChiefAccountManager).unwrap();
        assert_eq!(json, "\"CHIEF_ACCOUNT_MANAGER\"");
    }
}
