use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Routes mounted at `/lookups`.
///
/// ```text
/// GET  /{kind}   -> list_lookup      kind: structure|poster|illumination|route|side
/// POST /{kind}   -> create_lookup (admin)
/// ```
pub fn lookups_router() -> Router<AppState> {
    Router::new().route(
        "/{kind}",
        get(lookups::list_lookup).post(lookups::create_lookup),
    )
}

/// Routes mounted at `/bsv`.
///
/// ```text
/// GET  /{kind}   -> list_bsv_values   kind: visibility_distance, traffic_density, ...
/// POST /{kind}   -> create_bsv_value (admin)
/// ```
pub fn bsv_router() -> Router<AppState> {
    Router::new().route(
        "/{kind}",
        get(lookups::list_bsv_values).post(lookups::create_bsv_value),
    )
}
