//! Catalog routes. Writes are admin-only; reads need authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::catalog;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /       -> list_categories
/// POST   /       -> create_category
/// GET    /{id}   -> get_category
/// PUT    /{id}   -> update_category
/// DELETE /{id}   -> delete_category
/// ```
pub fn categories_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/{id}",
            get(catalog::get_category)
                .put(catalog::update_category)
                .delete(catalog::delete_category),
        )
}

/// Routes mounted at `/advertisers`.
///
/// ```text
/// GET    /              -> list_advertisers
/// POST   /              -> create_advertiser
/// GET    /{id}          -> get_advertiser
/// PUT    /{id}          -> update_advertiser
/// DELETE /{id}          -> delete_advertiser
/// GET    /{id}/brands   -> list_advertiser_brands
/// ```
pub fn advertisers_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(catalog::list_advertisers).post(catalog::create_advertiser),
        )
        .route(
            "/{id}",
            get(catalog::get_advertiser)
                .put(catalog::update_advertiser)
                .delete(catalog::delete_advertiser),
        )
        .route("/{id}/brands", get(catalog::list_advertiser_brands))
}

/// Routes mounted at `/brands`.
pub fn brands_router() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::list_brands).post(catalog::create_brand))
        .route(
            "/{id}",
            get(catalog::get_brand)
                .put(catalog::update_brand)
                .delete(catalog::delete_brand),
        )
}

pub fn industries_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(catalog::list_industries).post(catalog::create_industry),
    )
}

pub fn board_types_router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(catalog::list_board_types).post(catalog::create_board_type),
    )
}
