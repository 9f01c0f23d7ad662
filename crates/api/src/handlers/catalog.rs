//! Handlers for the catalog: categories, advertisers, brands, industries
//! and board types.
//!
//! Writes need an admin; reads need any authenticated user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use postertrack_core::fields::required_text;
use postertrack_core::types::DbId;
use postertrack_db::models::catalog::{
    Advertiser, AdvertiserWithCategories, Brand, Category, CreateAdvertiser, CreateBrand,
    CreateCategory, CreateNamed, NamedEntry, UpdateAdvertiser, UpdateBrand, UpdateCategory,
};
use postertrack_db::repositories::{
    AdvertiserRepo, BoardTypeRepo, BrandRepo, CategoryRepo, IndustryRepo,
};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

fn created<T: serde::Serialize>(data: T) -> (StatusCode, Json<DataResponse<T>>) {
    (StatusCode::CREATED, Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// POST /api/v1/categories
pub async fn create_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let input = CreateCategory {
        name: required_text("name", Some(&input.name))?,
        description: input.description,
    };
    let category = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = category.id, user_id = admin.user_id, "Category created");
    Ok(created(category))
}

/// GET /api/v1/categories
pub async fn list_categories(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// PUT /api/v1/categories/{id}
pub async fn update_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let category = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Category", id))?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /api/v1/categories/{id}
pub async fn delete_category(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !CategoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Category", id));
    }
    tracing::info!(category_id = id, user_id = admin.user_id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Advertisers
// ---------------------------------------------------------------------------

/// POST /api/v1/advertisers
///
/// A duplicate name is a 409.
pub async fn create_advertiser(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateAdvertiser>,
) -> AppResult<impl IntoResponse> {
    let input = CreateAdvertiser {
        name: required_text("name", Some(&input.name))?,
        category_ids: input.category_ids,
    };
    let advertiser = AdvertiserRepo::create(&state.pool, &input).await?;
    tracing::info!(advertiser_id = advertiser.id, user_id = admin.user_id, "Advertiser created");
    Ok(created(advertiser))
}

/// GET /api/v1/advertisers
pub async fn list_advertisers(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AdvertiserWithCategories>>>> {
    let advertisers = AdvertiserRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: advertisers }))
}

/// GET /api/v1/advertisers/{id}
pub async fn get_advertiser(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AdvertiserWithCategories>>> {
    let advertiser = AdvertiserRepo::find_with_categories(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Advertiser", id))?;
    Ok(Json(DataResponse { data: advertiser }))
}

/// PUT /api/v1/advertisers/{id}
pub async fn update_advertiser(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAdvertiser>,
) -> AppResult<Json<DataResponse<Advertiser>>> {
    let advertiser = AdvertiserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Advertiser", id))?;
    Ok(Json(DataResponse { data: advertiser }))
}

/// DELETE /api/v1/advertisers/{id}
pub async fn delete_advertiser(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AdvertiserRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Advertiser", id));
    }
    tracing::info!(advertiser_id = id, user_id = admin.user_id, "Advertiser deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/advertisers/{id}/brands
pub async fn list_advertiser_brands(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Brand>>>> {
    let brands = BrandRepo::list_by_advertiser(&state.pool, id).await?;
    Ok(Json(DataResponse { data: brands }))
}

// ---------------------------------------------------------------------------
// Brands
// ---------------------------------------------------------------------------

/// POST /api/v1/brands
pub async fn create_brand(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateBrand>,
) -> AppResult<impl IntoResponse> {
    let input = CreateBrand {
        name: required_text("name", Some(&input.name))?,
        advertiser_id: input.advertiser_id,
        category_id: input.category_id,
    };
    let brand = BrandRepo::create(&state.pool, &input).await?;
    tracing::info!(brand_id = brand.id, user_id = admin.user_id, "Brand created");
    Ok(created(brand))
}

/// GET /api/v1/brands
pub async fn list_brands(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Brand>>>> {
    let brands = BrandRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: brands }))
}

/// GET /api/v1/brands/{id}
pub async fn get_brand(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Brand>>> {
    let brand = BrandRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Brand", id))?;
    Ok(Json(DataResponse { data: brand }))
}

/// PUT /api/v1/brands/{id}
pub async fn update_brand(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateBrand>,
) -> AppResult<Json<DataResponse<Brand>>> {
    let brand = BrandRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::not_found("Brand", id))?;
    Ok(Json(DataResponse { data: brand }))
}

/// DELETE /api/v1/brands/{id}
pub async fn delete_brand(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !BrandRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Brand", id));
    }
    tracing::info!(brand_id = id, user_id = admin.user_id, "Brand deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Industries and board types
// ---------------------------------------------------------------------------

/// POST /api/v1/industries
pub async fn create_industry(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNamed>,
) -> AppResult<impl IntoResponse> {
    let input = CreateNamed {
        name: required_text("name", Some(&input.name))?,
    };
    Ok(created(IndustryRepo::create(&state.pool, &input).await?))
}

/// GET /api/v1/industries
pub async fn list_industries(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NamedEntry>>>> {
    let industries = IndustryRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: industries }))
}

/// POST /api/v1/board-types
pub async fn create_board_type(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateNamed>,
) -> AppResult<impl IntoResponse> {
    let input = CreateNamed {
        name: required_text("name", Some(&input.name))?,
    };
    Ok(created(BoardTypeRepo::create(&state.pool, &input).await?))
}

/// GET /api/v1/board-types
pub async fn list_board_types(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<NamedEntry>>>> {
    let board_types = BoardTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: board_types }))
}
