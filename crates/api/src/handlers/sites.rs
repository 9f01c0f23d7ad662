//! Handlers for site assignments.

use axum::extract::{Path, State};
use axum::Json;
use postertrack_core::error::CoreError;
use postertrack_core::roles::Role;
use postertrack_core::types::DbId;
use postertrack_db::models::campaign::{AssignmentDetail, SiteAssignmentRow, UpdateAssignmentStatus};
use postertrack_db::repositories::SiteAssignmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{RequireFieldAuditor, RequireManager};
use crate::response::DataResponse;
use crate::state::AppState;

/// PATCH /api/v1/site-assignments/{id}/status
pub async fn update_status(
    RequireManager(manager): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignmentStatus>,
) -> AppResult<Json<DataResponse<SiteAssignmentRow>>> {
    let assignment = SiteAssignmentRepo::update_status(&state.pool, id, input.status)
        .await?
        .ok_or(AppError::not_found("SiteAssignment", id))?;

    tracing::info!(
        assignment_id = id,
        status = %input.status,
        user_id = manager.user_id,
        "Site assignment status updated",
    );

    Ok(Json(DataResponse { data: assignment }))
}

/// GET /api/v1/sites/pending
///
/// Admins see every pending assignment; account managers only those on
/// their campaigns.
pub async fn list_pending(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AssignmentDetail>>>> {
    let manager = match auth.role {
        Role::SuperAdmin | Role::ChiefAccountManager => None,
        Role::AccountManager => Some(auth.user_id),
        Role::FieldAuditor | Role::ClientAgencyUser => {
            return Err(AppError::Core(CoreError::forbidden(
                "Account manager role or higher required",
            )));
        }
    };
    let pending = SiteAssignmentRepo::list_pending(&state.pool, manager).await?;
    Ok(Json(DataResponse { data: pending }))
}

/// GET /api/v1/sites/mine
pub async fn list_mine(
    RequireFieldAuditor(auditor): RequireFieldAuditor,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AssignmentDetail>>>> {
    let sites = SiteAssignmentRepo::list_for_auditor(&state.pool, auditor.user_id).await?;
    Ok(Json(DataResponse { data: sites }))
}
