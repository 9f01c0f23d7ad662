//! Handlers for `/compliance-reports`.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use postertrack_core::compliance::{check_image_count, ComplianceDraft, ReviewDecision};
use postertrack_core::error::CoreError;
use postertrack_core::types::DbId;
use postertrack_db::models::compliance_report::{
    ComplianceReport, ComplianceReportDetail, CreateComplianceReport,
};
use postertrack_db::repositories::{
    CampaignRepo, ComplianceReportRepo, SiteAssignmentRepo, UserRepo,
};
use postertrack_events::Notification;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireFieldAuditor, RequireManager};
use crate::multipart::read_form;
use crate::notify;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{check_images, discard, put_images};

#[derive(Debug, Deserialize)]
pub struct ReviewRequest {
    pub status: String,
}

/// POST /api/v1/compliance-reports
///
/// Multipart form from a field auditor for a site they hold. Up to two
/// geotagged `images`.
pub async fn submit_report(
    RequireFieldAuditor(auditor): RequireFieldAuditor,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<ComplianceReport>>)> {
    let form = read_form(multipart).await?;

    let mut draft = ComplianceDraft::default();
    for (name, value) in form.fields {
        draft.set(&name, value);
    }
    let submission = draft.validate()?;
    check_image_count(form.images.len())?;
    let checked = check_images(form.images, false)?;

    let assignment = SiteAssignmentRepo::find_held_by(
        &state.pool,
        submission.campaign_id,
        &submission.site_code,
        auditor.user_id,
    )
    .await?
    .ok_or_else(|| {
        AppError::NotFound(format!(
            "No assignment for site {} in campaign {} is held by this auditor",
            submission.site_code, submission.campaign_id
        ))
    })?;

    if ComplianceReportRepo::exists_for_site(&state.pool, submission.campaign_id, &submission.site_code)
        .await?
    {
        return Err(AppError::Core(CoreError::Conflict(
            "A compliance report has already been submitted for this site.".into(),
        )));
    }

    let stored = put_images(state.evidence.as_ref(), checked).await?;
    let created = ComplianceReportRepo::create(
        &state.pool,
        &CreateComplianceReport {
            field_auditor_id: auditor.user_id,
            site_assignment_id: assignment.id,
            submission,
            images: stored.images,
        },
    )
    .await;
    let report = match created {
        Ok(report) => report,
        Err(err) => {
            discard(state.evidence.as_ref(), &stored.keys).await;
            return Err(err.into());
        }
    };

    tracing::info!(
        report_id = report.id,
        campaign_id = report.campaign_id,
        site_code = %report.site_code,
        user_id = auditor.user_id,
        "Compliance report submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/compliance-reports
pub async fn list_reports(
    RequireManager(_manager): RequireManager,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ComplianceReportDetail>>>> {
    let reports = ComplianceReportRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/compliance-reports/{id}
pub async fn get_report(
    RequireManager(_manager): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ComplianceReportDetail>>> {
    let report = ComplianceReportRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("ComplianceReport", id))?;
    Ok(Json(DataResponse { data: report }))
}

/// PATCH /api/v1/compliance-reports/{id}/status
///
/// Approve or disapprove. The site assignment follows the report; a
/// disapproval alerts the auditor by email.
pub async fn review_report(
    RequireManager(manager): RequireManager,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReviewRequest>,
) -> AppResult<Json<DataResponse<ComplianceReport>>> {
    let decision: ReviewDecision = input.status.trim().parse()?;

    let report = ComplianceReportRepo::review(&state.pool, id, decision)
        .await?
        .ok_or(AppError::not_found("ComplianceReport", id))?;

    tracing::info!(
        report_id = id,
        status = %decision,
        user_id = manager.user_id,
        "Compliance report status updated",
    );

    if decision.notifies_auditor() {
        send_compliance_alert(&state, &report).await?;
    }

    Ok(Json(DataResponse { data: report }))
}

async fn send_compliance_alert(state: &AppState, report: &ComplianceReport) -> AppResult<()> {
    let Some(auditor) = UserRepo::find_by_id(&state.pool, report.field_auditor_id).await? else {
        tracing::warn!(report_id = report.id, "Auditor missing, compliance alert not sent");
        return Ok(());
    };
    let campaign = CampaignRepo::find_by_id(&state.pool, report.campaign_id).await?;
    let campaign_name = campaign.as_ref().and_then(|c| c.name.as_deref());

    notify::dispatch(
        state,
        vec![auditor.email.clone()],
        Notification::compliance_alert(
            &auditor.display_name(),
            &report.site_code,
            campaign_name,
            report.id,
        ),
    );
    Ok(())
}
