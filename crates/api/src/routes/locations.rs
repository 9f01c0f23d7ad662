use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/regions`.
pub fn regions_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(locations::list_regions).post(locations::create_region),
        )
        .route("/{id}/states", get(locations::list_region_states))
}

/// Routes mounted at `/states`.
pub fn states_router() -> Router<AppState> {
    Router::new()
        .route("/", get(locations::list_states).post(locations::create_state))
        .route("/{id}/cities", get(locations::list_state_cities))
}

/// Routes mounted at `/cities`.
pub fn cities_router() -> Router<AppState> {
    Router::new().route("/", get(locations::list_cities).post(locations::create_city))
}
