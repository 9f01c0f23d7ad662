//! Handlers for competitive-intelligence uploads and the competitive map.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use postertrack_core::competitive::{check_image_count, map_scope, CompetitiveDraft, MapBasis};
use postertrack_core::error::CoreError;
use postertrack_core::pagination::Page;
use postertrack_core::types::DbId;
use postertrack_db::models::competitive_report::{
    CompetitiveMap, CompetitiveReport, CompetitiveReportDetail, CreateCompetitiveReport,
};
use postertrack_db::repositories::{AdvertiserRepo, CompetitiveReportRepo, ComplianceReportRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireManager;
use crate::multipart::read_form;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::storage::{check_images, discard, put_images};

/// POST /api/v1/competitive-reports
///
/// Multipart: `advertiser` and `brand` names, `board_type`, one or more
/// `category`, `region`, `state`, `city`, and 1-5 geotagged `images` with
/// capture times. Unknown advertisers and brands are created on the fly.
pub async fn submit_report(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<CompetitiveReport>>)> {
    let form = read_form(multipart).await?;

    let mut draft = CompetitiveDraft::default();
    for (name, value) in form.fields {
        draft.set(&name, value);
    }
    let submission = draft.validate()?;
    check_image_count(form.images.len())?;
    let checked = check_images(form.images, true)?;

    let stored = put_images(state.evidence.as_ref(), checked).await?;
    let created = CompetitiveReportRepo::create(
        &state.pool,
        &CreateCompetitiveReport {
            field_auditor_id: auth.user_id,
            category_id: submission.primary_category(),
            advertiser: submission.advertiser,
            brand: submission.brand,
            category_ids: submission.category_ids,
            board_type_id: submission.board_type_id,
            region_id: submission.region_id,
            state_id: submission.state_id,
            city_id: submission.city_id,
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
        advertiser_id = report.advertiser_id,
        brand_id = report.brand_id,
        user_id = auth.user_id,
        "Competitive report submitted",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: report })))
}

/// GET /api/v1/competitive-reports?page=&limit=
pub async fn list_reports(
    RequireManager(_manager): RequireManager,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Page<CompetitiveReportDetail>>> {
    let page = params.page_request();
    let (reports, total) = CompetitiveReportRepo::list_page(&state.pool, page).await?;
    Ok(Json(page.into_page(reports, total)))
}

/// GET /api/v1/competitive-reports/{id}
pub async fn get_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompetitiveReportDetail>>> {
    let report = CompetitiveReportRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("CompetitiveReport", id))?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/competitive-reports/auditor/{auditor_id}
///
/// Staff read anyone's history; other callers only their own.
pub async fn list_by_auditor(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(auditor_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<CompetitiveReportDetail>>>> {
    let own = auth.user_id == auditor_id;
    if !own && !auth.role.is_manager() {
        return Err(AppError::Core(CoreError::forbidden(
            "You may only view your own uploads",
        )));
    }
    let reports = CompetitiveReportRepo::list_by_auditor(&state.pool, auditor_id).await?;
    Ok(Json(DataResponse { data: reports }))
}

/// GET /api/v1/competitive-map/{advertiser_id}
///
/// With compliance reports on file, the advertiser's compliance data is set
/// against competitors' sightings. Otherwise its own sightings are set
/// against the whole category market, itself included.
pub async fn competitive_map(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(advertiser_id): Path<DbId>,
) -> AppResult<Json<DataResponse<CompetitiveMap>>> {
    let advertiser = AdvertiserRepo::find_by_id(&state.pool, advertiser_id)
        .await?
        .ok_or(AppError::not_found("Advertiser", advertiser_id))?;

    let compliance = ComplianceReportRepo::list_by_advertiser_name(&state.pool, &advertiser.name).await?;
    let competitors = AdvertiserRepo::competitor_ids(&state.pool, advertiser_id).await?;
    let scope = map_scope(advertiser_id, &competitors, !compliance.is_empty());
    let market =
        CompetitiveReportRepo::list_by_advertisers(&state.pool, &scope.market_advertisers).await?;

    let map = match scope.basis {
        MapBasis::Compliance => CompetitiveMap {
            advertiser_id,
            basis: scope.basis,
            advertiser_has_compliance_report: true,
            advertiser_compliance_data: compliance,
            advertiser_competitive_data: Vec::new(),
            competitor_data: market,
        },
        MapBasis::Competitive => CompetitiveMap {
            advertiser_id,
            basis: scope.basis,
            advertiser_has_compliance_report: false,
            advertiser_compliance_data: Vec::new(),
            advertiser_competitive_data: market
                .iter()
                .filter(|r| r.advertiser_id == advertiser_id)
                .cloned()
                .collect(),
            competitor_data: market,
        },
    };

    Ok(Json(DataResponse { data: map }))
}
