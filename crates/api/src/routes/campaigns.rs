//! Campaign, site and site-assignment routes.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{campaigns, sites};
use crate::state::AppState;

/// Routes mounted at `/campaigns`.
///
/// ```text
/// GET  /                    -> list_campaigns (?page=&limit=)
/// POST /                    -> create_campaign (admin, multipart)
/// GET  /{id}                -> get_campaign
/// POST /{id}/sites          -> append_sites (admin, multipart)
/// GET  /{id}/assignments    -> list_assignments
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(campaigns::list_campaigns).post(campaigns::create_campaign),
        )
        .route("/{id}", get(campaigns::get_campaign))
        .route("/{id}/sites", post(campaigns::append_sites))
        .route("/{id}/assignments", get(campaigns::list_assignments))
}

/// Routes mounted at `/sites`.
///
/// ```text
/// GET /pending   -> list_pending (staff)
/// GET /mine      -> list_mine (field auditor)
/// ```
pub fn sites_router() -> Router<AppState> {
    Router::new()
        .route("/pending", get(sites::list_pending))
        .route("/mine", get(sites::list_mine))
}

/// Routes mounted at `/site-assignments`.
///
/// ```text
/// PATCH /{id}/status   -> update_status (staff)
/// ```
pub fn assignments_router() -> Router<AppState> {
    Router::new().route("/{id}/status", patch(sites::update_status))
}
