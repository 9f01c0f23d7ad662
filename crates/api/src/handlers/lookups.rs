//! Handlers for the fixed lookup registries.
//!
//! `{kind}` is resolved against [`LookupKind`] / [`BsvKind`] before any query
//! runs, so table names never come from the request.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use postertrack_core::fields::required_text;
use postertrack_core::lookups::{BsvKind, LookupKind};
use postertrack_db::models::lookup::{BsvValue, CreateBsvValue, CreateLookupEntry, LookupEntry};
use postertrack_db::repositories::{BsvRepo, LookupRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/lookups/{kind}
pub async fn create_lookup(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<CreateLookupEntry>,
) -> AppResult<(StatusCode, Json<DataResponse<LookupEntry>>)> {
    let kind: LookupKind = kind.parse()?;
    let input = CreateLookupEntry {
        name: required_text("name", Some(&input.name))?,
    };
    let entry = LookupRepo::create(&state.pool, kind, &input).await?;
    tracing::info!(kind = %kind, entry_id = entry.id, user_id = admin.user_id, "Lookup entry created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: entry })))
}

/// GET /api/v1/lookups/{kind}
pub async fn list_lookup(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<Vec<LookupEntry>>>> {
    let kind: LookupKind = kind.parse()?;
    Ok(Json(DataResponse {
        data: LookupRepo::list(&state.pool, kind).await?,
    }))
}

/// POST /api/v1/bsv/{kind}
pub async fn create_bsv_value(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(input): Json<CreateBsvValue>,
) -> AppResult<(StatusCode, Json<DataResponse<BsvValue>>)> {
    let kind: BsvKind = kind.parse()?;
    let value = BsvRepo::create(&state.pool, kind, &input).await?;
    tracing::info!(kind = %kind, value_id = value.id, user_id = admin.user_id, "BSV value created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: value })))
}

/// GET /api/v1/bsv/{kind}
pub async fn list_bsv_values(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> AppResult<Json<DataResponse<Vec<BsvValue>>>> {
    let kind: BsvKind = kind.parse()?;
    Ok(Json(DataResponse {
        data: BsvRepo::list(&state.pool, kind).await?,
    }))
}
