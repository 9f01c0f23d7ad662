//! Role gates layered on [`AuthUser`].
//!
//! Each extractor authenticates first (401), then rejects with 403 when the
//! caller's role falls short.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use postertrack_core::error::CoreError;
use postertrack_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

async fn authorize(
    parts: &mut Parts,
    state: &AppState,
    allowed: fn(Role) -> bool,
    denial: &'static str,
) -> Result<AuthUser, AppError> {
    let user = AuthUser::from_request_parts(parts, state).await?;
    if allowed(user.role) {
        Ok(user)
    } else {
        tracing::debug!(user_id = user.user_id, role = %user.role, "Role check failed");
        Err(AppError::Core(CoreError::forbidden(denial)))
    }
}

macro_rules! role_gate {
    ($(#[$meta:meta])* $name:ident, $allowed:expr, $denial:literal) => {
        $(#[$meta])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                authorize(parts, state, $allowed, $denial).await.map($name)
            }
        }
    };
}

role_gate!(
    /// Super admin or chief account manager.
    RequireAdmin,
    Role::is_admin,
    "Super admin or chief account manager role required"
);

role_gate!(
    /// Admins plus account managers.
    RequireManager,
    Role::is_manager,
    "Account manager role or higher required"
);

role_gate!(
    RequireFieldAuditor,
    |role| role == Role::FieldAuditor,
    "Field auditor role required"
);
