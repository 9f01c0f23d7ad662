//! User accounts.

use postertrack_core::error::CoreError;
use postertrack_core::roles::Role;
use postertrack_core::types::{DbId, Timestamp};
use postertrack_core::users::display_name;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Full row from `users`.
///
/// Holds the password hash: never serialize it. Use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub states_covered: Vec<String>,
    pub additional_emails: Vec<String>,
    pub industry: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// The stored role. The CHECK constraint keeps this infallible in practice.
    pub fn role(&self) -> Result<Role, CoreError> {
        self.role.parse()
    }

    pub fn display_name(&self) -> String {
        display_name(
            self.firstname.as_deref(),
            self.lastname.as_deref(),
            self.name.as_deref(),
            &self.email,
        )
    }
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: DbId,
    pub email: String,
    pub role: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub states_covered: Vec<String>,
    pub additional_emails: Vec<String>,
    pub industry: Option<String>,
    pub created_at: Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            firstname: user.firstname,
            lastname: user.lastname,
            name: user.name,
            phone: user.phone,
            address: user.address,
            states_covered: user.states_covered,
            additional_emails: user.additional_emails,
            industry: user.industry,
            created_at: user.created_at,
        }
    }
}

/// Insert DTO. The password is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub states_covered: Vec<String>,
    pub additional_emails: Vec<String>,
    pub industry: Option<String>,
}

/// One auditor from the roster query: id plus covered states.
#[derive(Debug, Clone, FromRow)]
pub struct RosterEntry {
    pub id: DbId,
    pub states_covered: Vec<String>,
}
