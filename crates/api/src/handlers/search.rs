//! Handler for `/search`.

use axum::extract::{Query, State};
use axum::Json;
use postertrack_core::error::CoreError;
use postertrack_core::search::{clamp_limit, like_pattern, normalize_term, SearchKind};
use postertrack_db::models::catalog::{Advertiser, Brand, Category};
use postertrack_db::models::user::UserResponse;
use postertrack_db::repositories::{AdvertiserRepo, BrandRepo, CategoryRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SearchResults {
    Advertisers(Vec<Advertiser>),
    Brands(Vec<Brand>),
    Categories(Vec<Category>),
    Users(Vec<UserResponse>),
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    #[serde(rename = "type")]
    pub kind: SearchKind,
    pub data: SearchResults,
}

/// GET /api/v1/search?q=&type=advertiser|brand|category|user
///
/// Case-insensitive substring match on names (and email for users).
pub async fn search(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<SearchResponse>> {
    let term = normalize_term(params.q.as_deref())?;
    let kind: SearchKind = params
        .kind
        .as_deref()
        .ok_or_else(|| CoreError::validation("Search type (`type`) is required"))?
        .parse()?;
    let pattern = like_pattern(&term);
    let limit = clamp_limit(params.limit);

    let data = match kind {
        SearchKind::Advertiser => {
            SearchResults::Advertisers(AdvertiserRepo::search(&state.pool, &pattern, limit).await?)
        }
        SearchKind::Brand => SearchResults::Brands(BrandRepo::search(&state.pool, &pattern, limit).await?),
        SearchKind::Category => {
            SearchResults::Categories(CategoryRepo::search(&state.pool, &pattern, limit).await?)
        }
        SearchKind::User => SearchResults::Users(
            UserRepo::search(&state.pool, &pattern, limit)
                .await?
                .into_iter()
                .map(UserResponse::from)
                .collect(),
        ),
    };

    Ok(Json(SearchResponse { kind, data }))
}
