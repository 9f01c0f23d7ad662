//! Handlers for `/campaigns`: upload, distribution and scoped reads.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use postertrack_core::distribution::types::{CoverageGap, DuplicateRecord, ParsedSiteList, UploadMode};
use postertrack_core::distribution::{append_code_offset, grid_from_csv, parse_site_list};
use postertrack_core::error::CoreError;
use postertrack_core::fields::{parse_flag, required_id};
use postertrack_core::pagination::Page;
use postertrack_core::roles::Role;
use postertrack_core::types::DbId;
use postertrack_db::models::campaign::{
    AppendOutcome, Campaign, CampaignScope, CampaignSummary, CreateCampaign, DistributionResult,
    SiteAssignmentRow,
};
use postertrack_db::repositories::{CampaignRepo, SiteAssignmentRepo, UserRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::multipart::{read_form, FormData};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

const SITE_LIST_FIELD: &str = "site_list";

/// 409 body returned when an upload repeats locations and the caller has not
/// opted in with `proceed_with_duplicates`.
#[derive(Debug, Serialize)]
pub struct DuplicatePrompt {
    pub message: String,
    pub duplicates: Vec<DuplicateRecord>,
    pub prompt: &'static str,
}

/// POST /api/v1/campaigns
///
/// Multipart: `client_id`, `account_manager_id`, optional `name` and
/// `proceed_with_duplicates`, and the `site_list` CSV.
pub async fn create_campaign(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut form = read_form(multipart).await?;

    let client_id = required_id("client_id", form.text("client_id"))?;
    let account_manager_id = required_id("account_manager_id", form.text("account_manager_id"))?;
    let name = form.text("name").map(str::to_string);
    let proceed = parse_flag(form.text("proceed_with_duplicates"));

    UserRepo::find_with_role(&state.pool, client_id, Role::ClientAgencyUser)
        .await?
        .ok_or(AppError::not_found("Client", client_id))?;
    UserRepo::find_with_role(&state.pool, account_manager_id, Role::AccountManager)
        .await?
        .ok_or(AppError::not_found("Account manager", account_manager_id))?;

    let parsed = read_site_list(&mut form, UploadMode::NewCampaign)?;
    if let Some(prompt) = duplicate_gate(&parsed, proceed) {
        return Ok(prompt);
    }

    let result = CampaignRepo::create_distributed(
        &state.pool,
        &CreateCampaign {
            name,
            client_id,
            account_manager_id,
            site_list: parsed.site_records,
        },
    )
    .await?;

    report_gaps(result.campaign.id, &result.gaps);
    tracing::info!(
        campaign_id = result.campaign.id,
        created_by = admin.user_id,
        duplicates = parsed.duplicates.len(),
        "Campaign uploaded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: result })).into_response())
}

/// POST /api/v1/campaigns/{id}/sites
///
/// Multipart: `site_list` CSV and optional `proceed_with_duplicates`.
/// Explicit codes are kept; blank ones continue after the highest synthesized
/// code already in the campaign.
pub async fn append_sites(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Response> {
    let mut form = read_form(multipart).await?;
    let proceed = parse_flag(form.text("proceed_with_duplicates"));

    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Campaign", id))?;
    let code_offset = append_code_offset(&campaign.site_list);

    let parsed = read_site_list(&mut form, UploadMode::AppendToCampaign { code_offset })?;
    if let Some(prompt) = duplicate_gate(&parsed, proceed) {
        return Ok(prompt);
    }

    let result = match CampaignRepo::append_sites(&state.pool, id, &parsed.site_records).await? {
        AppendOutcome::Appended(result) => result,
        AppendOutcome::CampaignNotFound => return Err(AppError::not_found("Campaign", id)),
        AppendOutcome::CodeConflict(codes) => {
            return Err(AppError::Core(CoreError::Conflict(format!(
                "Site codes already exist in this campaign: {}",
                codes.join(", ")
            ))));
        }
    };

    report_gaps(id, &result.gaps);
    tracing::info!(campaign_id = id, updated_by = admin.user_id, "Sites appended");

    Ok((StatusCode::CREATED, Json(DataResponse { data: result })).into_response())
}

/// GET /api/v1/campaigns?page=&limit=
///
/// Account managers, clients and field auditors only see their own campaigns.
pub async fn list_campaigns(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<CampaignSummary>>> {
    let scope = match auth.role {
        Role::SuperAdmin | Role::ChiefAccountManager => CampaignScope::All,
        Role::AccountManager => CampaignScope::AccountManager(auth.user_id),
        Role::ClientAgencyUser => CampaignScope::Client(auth.user_id),
        Role::FieldAuditor => CampaignScope::FieldAuditor(auth.user_id),
    };
    let page = params.page_request();
    let (campaigns, total) = CampaignRepo::list_page(&state.pool, scope, page).await?;
    Ok(Json(page.into_page(campaigns, total)))
}

/// GET /api/v1/campaigns/{id}
pub async fn get_campaign(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Campaign>>> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Campaign", id))?;
    ensure_can_view(&state, &auth, &campaign).await?;
    Ok(Json(DataResponse { data: campaign }))
}

/// GET /api/v1/campaigns/{id}/assignments
pub async fn list_assignments(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<SiteAssignmentRow>>>> {
    let campaign = CampaignRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Campaign", id))?;
    ensure_can_view(&state, &auth, &campaign).await?;
    let assignments = SiteAssignmentRepo::list_for_campaign(&state.pool, id).await?;
    Ok(Json(DataResponse { data: assignments }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_site_list(form: &mut FormData, mode: UploadMode) -> AppResult<ParsedSiteList> {
    let (filename, bytes) = form
        .take_file(SITE_LIST_FIELD)
        .ok_or_else(|| CoreError::validation("site_list file is required."))?;
    tracing::debug!(filename = %filename, bytes = bytes.len(), "Reading site list");

    let grid = grid_from_csv(&bytes).map_err(CoreError::from)?;
    let parsed = parse_site_list(&grid, mode).map_err(CoreError::from)?;
    if parsed.site_records.is_empty() {
        return Err(CoreError::validation("The site list contains no sites.").into());
    }
    Ok(parsed)
}

/// The 409 prompt, unless there are no duplicates or the caller proceeds.
fn duplicate_gate(parsed: &ParsedSiteList, proceed: bool) -> Option<Response> {
    if !parsed.has_duplicates() || proceed {
        return None;
    }
    let body = DuplicatePrompt {
        message: format!(
            "Duplicate site locations found: {} row(s) repeat an earlier location.",
            parsed.duplicates.len()
        ),
        duplicates: parsed.duplicates.clone(),
        prompt: "Resubmit with proceed_with_duplicates=true to upload anyway.",
    };
    Some((StatusCode::CONFLICT, Json(body)).into_response())
}

fn report_gaps(campaign_id: DbId, gaps: &[CoverageGap]) {
    for gap in gaps {
        tracing::warn!(
            campaign_id,
            site_code = %gap.site_code,
            state = %gap.state,
            "No field auditor covers this state; site left unassigned",
        );
    }
}

/// Admins see every campaign; everyone else only the ones they take part in.
async fn ensure_can_view(state: &AppState, auth: &AuthUser, campaign: &Campaign) -> AppResult<()> {
    let allowed = match auth.role {
        Role::SuperAdmin | Role::ChiefAccountManager => true,
        Role::AccountManager => campaign.account_manager_id == auth.user_id,
        Role::ClientAgencyUser => campaign.client_id == auth.user_id,
        Role::FieldAuditor => SiteAssignmentRepo::list_for_campaign(&state.pool, campaign.id)
            .await?
            .iter()
            .any(|a| a.field_auditor_id == auth.user_id),
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::forbidden(
            "You do not have access to this campaign",
        )))
    }
}
