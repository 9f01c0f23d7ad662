//! Handler for `/analytics`.

use axum::extract::State;
use axum::Json;
use postertrack_db::models::analytics::Overview;
use postertrack_db::repositories::AnalyticsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireManager;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/analytics/overview
pub async fn overview(
    RequireManager(_manager): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Overview>>> {
    let overview = AnalyticsRepo::overview(&state.pool).await?;
    Ok(Json(DataResponse { data: overview }))
}
