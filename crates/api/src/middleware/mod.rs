//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`]: the caller, from a JWT Bearer token.
//! - [`rbac::RequireAdmin`]: super admin or chief account manager.
//! - [`rbac::RequireManager`]: admins plus account managers.
//! - [`rbac::RequireFieldAuditor`]: field auditors only.

pub mod auth;
pub mod rbac;
