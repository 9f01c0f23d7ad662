//! Compliance and competitive report routes.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::{competitive, compliance};
use crate::state::AppState;

/// Routes mounted at `/compliance-reports`.
///
/// ```text
/// GET   /               -> list_reports (staff)
/// POST  /               -> submit_report (field auditor, multipart)
/// GET   /{id}           -> get_report (staff)
/// PATCH /{id}/status    -> review_report (staff)
/// ```
pub fn compliance_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(compliance::list_reports).post(compliance::submit_report),
        )
        .route("/{id}", get(compliance::get_report))
        .route("/{id}/status", patch(compliance::review_report))
}

/// Routes mounted at `/competitive-reports`.
///
/// ```text
/// GET  /                        -> list_reports (staff, ?page=&limit=)
/// POST /                        -> submit_report (multipart)
/// GET  /{id}                    -> get_report
/// GET  /auditor/{auditor_id}    -> list_by_auditor
/// ```
pub fn competitive_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(competitive::list_reports).post(competitive::submit_report),
        )
        .route("/{id}", get(competitive::get_report))
        .route("/auditor/{auditor_id}", get(competitive::list_by_auditor))
}

/// Routes mounted at `/competitive-map`.
pub fn map_router() -> Router<AppState> {
    Router::new().route("/{advertiser_id}", get(competitive::competitive_map))
}
