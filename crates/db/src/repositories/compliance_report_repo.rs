//! Repository for the `compliance_reports` table.

use postertrack_core::compliance::ReviewDecision;
use postertrack_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::SiteAssignmentRepo;
use crate::models::compliance_report::{
    ComplianceReport, ComplianceReportDetail, CreateComplianceReport,
};

const COLUMNS: &str = "id, campaign_id, site_assignment_id, field_auditor_id, site_code, \
    advertiser, brand, city, address, board_type, media_owner, message, comment, status, bsv, \
    structure_id, poster_id, illumination_id, route_id, side_id, images, created_at, updated_at";

const DETAIL_SELECT: &str = "SELECT r.id, r.campaign_id, r.site_assignment_id, \
        r.field_auditor_id, r.site_code, r.advertiser, r.brand, r.city, r.address, \
        r.board_type, r.media_owner, r.message, r.comment, r.status, r.bsv, r.structure_id, \
        r.poster_id, r.illumination_id, r.route_id, r.side_id, r.images, r.created_at, \
        r.updated_at, \
        st.name AS structure, po.name AS poster, il.name AS illumination, \
        ro.name AS route, si.name AS side, \
        u.firstname AS auditor_firstname, u.lastname AS auditor_lastname \
     FROM compliance_reports r \
     JOIN structures st ON st.id = r.structure_id \
     JOIN posters po ON po.id = r.poster_id \
     JOIN illuminations il ON il.id = r.illumination_id \
     JOIN routes ro ON ro.id = r.route_id \
     JOIN sides si ON si.id = r.side_id \
     JOIN users u ON u.id = r.field_auditor_id";

pub struct ComplianceReportRepo;

impl ComplianceReportRepo {
    /// Insert a report. A second report for the same campaign and site fails
    /// on `uq_compliance_reports_campaign_site`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComplianceReport,
    ) -> Result<ComplianceReport, sqlx::Error> {
        let s = &input.submission;
        let query = format!(
            "INSERT INTO compliance_reports
                (campaign_id, site_assignment_id, field_auditor_id, site_code, advertiser,
                 brand, city, address, board_type, media_owner, message, comment, status, bsv,
                 structure_id, poster_id, illumination_id, route_id, side_id, images)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                     $17, $18, $19, $20)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ComplianceReport>(&query)
            .bind(s.campaign_id)
            .bind(input.site_assignment_id)
            .bind(input.field_auditor_id)
            .bind(&s.site_code)
            .bind(&s.advertiser)
            .bind(&s.brand)
            .bind(&s.city)
            .bind(&s.address)
            .bind(&s.board_type)
            .bind(&s.media_owner)
            .bind(&s.message)
            .bind(&s.comment)
            .bind(s.status.as_str())
            .bind(&s.bsv)
            .bind(s.structure_id)
            .bind(s.poster_id)
            .bind(s.illumination_id)
            .bind(s.route_id)
            .bind(s.side_id)
            .bind(Json(&input.images))
            .fetch_one(pool)
            .await
    }

    pub async fn exists_for_site(
        pool: &PgPool,
        campaign_id: DbId,
        site_code: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM compliance_reports WHERE campaign_id = $1 AND site_code = $2)",
        )
        .bind(campaign_id)
        .bind(site_code)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComplianceReport>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM compliance_reports WHERE id = $1");
        sqlx::query_as::<_, ComplianceReport>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ComplianceReportDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, ComplianceReportDetail>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All reports, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ComplianceReportDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY r.created_at DESC, r.id DESC");
        sqlx::query_as::<_, ComplianceReportDetail>(&query)
            .fetch_all(pool)
            .await
    }

    /// Reports filed under an advertiser name, compared case-insensitively.
    pub async fn list_by_advertiser_name(
        pool: &PgPool,
        advertiser: &str,
    ) -> Result<Vec<ComplianceReport>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM compliance_reports
             WHERE LOWER(advertiser) = LOWER($1)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, ComplianceReport>(&query)
            .bind(advertiser)
            .fetch_all(pool)
            .await
    }

    /// Record a review decision and mirror it onto the site assignment.
    ///
    /// Returns `None` if the report does not exist.
    pub async fn review(
        pool: &PgPool,
        id: DbId,
        decision: ReviewDecision,
    ) -> Result<Option<ComplianceReport>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE compliance_reports SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let Some(report) = sqlx::query_as::<_, ComplianceReport>(&query)
            .bind(id)
            .bind(decision.as_str())
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        SiteAssignmentRepo::update_status(
            &mut *tx,
            report.site_assignment_id,
            decision.assignment_status(),
        )
        .await?;

        tx.commit().await?;
        tracing::info!(
            report_id = report.id,
            site_assignment_id = report.site_assignment_id,
            status = %decision,
            "Compliance report reviewed",
        );
        Ok(Some(report))
    }
}
