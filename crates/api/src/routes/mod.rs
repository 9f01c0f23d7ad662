pub mod auth;
pub mod campaigns;
pub mod catalog;
pub mod health;
pub mod locations;
pub mod lookups;
pub mod reports;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/super-admin/signup, /auth/login         public
/// /users, /users/me, /users/field-auditors
///
/// /campaigns, /campaigns/{id}                   upload, list, read
/// /campaigns/{id}/sites                         append sites
/// /campaigns/{id}/assignments
/// /sites/pending, /sites/mine
/// /site-assignments/{id}/status
///
/// /compliance-reports, /compliance-reports/{id}, /compliance-reports/{id}/status
/// /competitive-reports, /competitive-reports/{id}
/// /competitive-reports/auditor/{auditor_id}
/// /competitive-map/{advertiser_id}
///
/// /categories, /advertisers, /brands, /industries, /board-types
/// /regions, /states, /cities
/// /lookups/{kind}, /bsv/{kind}
///
/// /search?q=&type=
/// /analytics/overview
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/campaigns", campaigns::router())
        .nest("/sites", campaigns::sites_router())
        .nest("/site-assignments", campaigns::assignments_router())
        .nest("/compliance-reports", reports::compliance_router())
        .nest("/competitive-reports", reports::competitive_router())
        .nest("/competitive-map", reports::map_router())
        .nest("/categories", catalog::categories_router())
        .nest("/advertisers", catalog::advertisers_router())
        .nest("/brands", catalog::brands_router())
        .nest("/industries", catalog::industries_router())
        .nest("/board-types", catalog::board_types_router())
        .nest("/regions", locations::regions_router())
        .nest("/states", locations::states_router())
        .nest("/cities", locations::cities_router())
        .nest("/lookups", lookups::lookups_router())
        .nest("/bsv", lookups::bsv_router())
        .route("/search", get(handlers::search::search))
        .route("/analytics/overview", get(handlers::analytics::overview))
}
