//! Handlers for regions, states and cities.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use postertrack_core::fields::required_text;
use postertrack_core::types::DbId;
use postertrack_db::models::location::{City, CreateCity, CreateRegion, CreateState, Region, State as UsState};
use postertrack_db::repositories::{CityRepo, RegionRepo, StateRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/regions
pub async fn create_region(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateRegion>,
) -> AppResult<(StatusCode, Json<DataResponse<Region>>)> {
    let input = CreateRegion {
        name: required_text("name", Some(&input.name))?,
    };
    let region = RegionRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: region })))
}

/// GET /api/v1/regions
pub async fn list_regions(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Region>>>> {
    Ok(Json(DataResponse {
        data: RegionRepo::list(&state.pool).await?,
    }))
}

/// GET /api/v1/regions/{id}/states
pub async fn list_region_states(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(region_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<UsState>>>> {
    Ok(Json(DataResponse {
        data: StateRepo::list_by_region(&state.pool, region_id).await?,
    }))
}

/// POST /api/v1/states
pub async fn create_state(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateState>,
) -> AppResult<(StatusCode, Json<DataResponse<UsState>>)> {
    let input = CreateState {
        name: required_text("name", Some(&input.name))?,
        region_id: input.region_id,
    };
    let created = StateRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/states
pub async fn list_states(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UsState>>>> {
    Ok(Json(DataResponse {
        data: StateRepo::list(&state.pool).await?,
    }))
}

/// GET /api/v1/states/{id}/cities
pub async fn list_state_cities(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(state_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<City>>>> {
    Ok(Json(DataResponse {
        data: CityRepo::list_by_state(&state.pool, state_id).await?,
    }))
}

/// POST /api/v1/cities
pub async fn create_city(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCity>,
) -> AppResult<(StatusCode, Json<DataResponse<City>>)> {
    let input = CreateCity {
        name: required_text("name", Some(&input.name))?,
        state_id: input.state_id,
    };
    let city = CityRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: city })))
}

/// GET /api/v1/cities
pub async fn list_cities(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<City>>>> {
    Ok(Json(DataResponse {
        data: CityRepo::list(&state.pool).await?,
    }))
}
