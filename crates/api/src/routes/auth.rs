use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`. Both are public.
///
/// ```text
/// POST /super-admin/signup   -> super_admin_signup
/// POST /login                -> login
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/super-admin/signup", post(auth::super_admin_signup))
        .route("/login", post(auth::login))
}
