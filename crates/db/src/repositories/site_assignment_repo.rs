//! Repository for the `site_assignments` table.

use postertrack_core::distribution::types::{AssignmentStatus, SiteAssignment, STATUS_PENDING};
use postertrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{AssignmentDetail, SiteAssignmentRow};

const COLUMNS: &str =
    "id, campaign_id, site_code, field_auditor_id, status, created_at, updated_at";

/// Assignment columns plus the campaign name and the matching uploaded site.
const DETAIL_SELECT: &str = "SELECT sa.id, sa.campaign_id, sa.site_code, sa.field_auditor_id, \
        sa.status, sa.created_at, sa.updated_at, c.name AS campaign_name, \
        jsonb_path_query_first(c.site_list, '$[*] ? (@.code == $code)', \
                               jsonb_build_object('code', sa.site_code)) AS site \
     FROM site_assignments sa \
     JOIN campaigns c ON c.id = sa.campaign_id";

pub struct SiteAssignmentRepo;

impl SiteAssignmentRepo {
    /// Bulk-insert allocator output inside an open transaction.
    ///
    /// Rows come back in insertion order.
    pub async fn insert_batch(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        assignments: &[SiteAssignment],
    ) -> Result<Vec<SiteAssignmentRow>, sqlx::Error> {
        if assignments.is_empty() {
            return Ok(Vec::new());
        }

        let campaign_ids: Vec<DbId> = assignments.iter().map(|a| a.campaign_id).collect();
        let codes: Vec<&str> = assignments.iter().map(|a| a.site_code.as_str()).collect();
        let auditors: Vec<DbId> = assignments.iter().map(|a| a.field_auditor_id).collect();
        let statuses: Vec<&str> = assignments.iter().map(|a| a.status.as_str()).collect();

        let query = format!(
            "INSERT INTO site_assignments (campaign_id, site_code, field_auditor_id, status)
             SELECT * FROM UNNEST($1::BIGINT[], $2::TEXT[], $3::BIGINT[], $4::TEXT[])
             RETURNING {COLUMNS}"
        );
        let mut rows = sqlx::query_as::<_, SiteAssignmentRow>(&query)
            .bind(&campaign_ids)
            .bind(&codes)
            .bind(&auditors)
            .bind(&statuses)
            .fetch_all(&mut **tx)
            .await?;
        rows.sort_by_key(|r| r.id);
        Ok(rows)
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SiteAssignmentRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM site_assignments WHERE id = $1");
        sqlx::query_as::<_, SiteAssignmentRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The assignment of `site_code` in `campaign_id`, if it is held by
    /// `field_auditor_id`.
    pub async fn find_held_by(
        pool: &PgPool,
        campaign_id: DbId,
        site_code: &str,
        field_auditor_id: DbId,
    ) -> Result<Option<SiteAssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_assignments
             WHERE campaign_id = $1 AND site_code = $2 AND field_auditor_id = $3"
        );
        sqlx::query_as::<_, SiteAssignmentRow>(&query)
            .bind(campaign_id)
            .bind(site_code)
            .bind(field_auditor_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list_for_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<SiteAssignmentRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM site_assignments WHERE campaign_id = $1 ORDER BY id"
        );
        sqlx::query_as::<_, SiteAssignmentRow>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Everything assigned to one auditor, newest campaign first.
    pub async fn list_for_auditor(
        pool: &PgPool,
        field_auditor_id: DbId,
    ) -> Result<Vec<AssignmentDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT} WHERE sa.field_auditor_id = $1 ORDER BY sa.campaign_id DESC, sa.id"
        );
        sqlx::query_as::<_, AssignmentDetail>(&query)
            .bind(field_auditor_id)
            .fetch_all(pool)
            .await
    }

    /// Pending assignments, oldest first. With `account_manager_id`, only
    /// those on that manager's campaigns.
    pub async fn list_pending(
        pool: &PgPool,
        account_manager_id: Option<DbId>,
    ) -> Result<Vec<AssignmentDetail>, sqlx::Error> {
        let query = format!(
            "{DETAIL_SELECT}
             WHERE sa.status = $1 AND ($2::BIGINT IS NULL OR c.account_manager_id = $2)
             ORDER BY sa.created_at, sa.id"
        );
        sqlx::query_as::<_, AssignmentDetail>(&query)
            .bind(STATUS_PENDING)
            .bind(account_manager_id)
            .fetch_all(pool)
            .await
    }

    /// Set the review status. Returns `None` if the assignment does not exist.
    pub async fn update_status<'e, E>(
        executor: E,
        id: DbId,
        status: AssignmentStatus,
    ) -> Result<Option<SiteAssignmentRow>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE site_assignments SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SiteAssignmentRow>(&query)
            .bind(id)
            .bind(status.as_str())
            .fetch_optional(executor)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM site_assignments")
            .fetch_one(pool)
            .await?;
        Ok(total)
    }
}
