use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET  /                 -> list_users (admin, ?role=)
/// POST /                 -> create_user (admin)
/// GET  /me               -> me
/// GET  /field-auditors   -> list_field_auditors (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/me", get(users::me))
        .route("/field-auditors", get(users::list_field_auditors))
}
