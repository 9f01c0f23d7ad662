//! Repository for the `campaigns` table, including the transactional
//! upload-and-distribute flow.

use std::collections::HashSet;

use postertrack_core::distribution::types::SiteRecord;
use postertrack_core::distribution::{allocate_sites, CoverageIndex};
use postertrack_core::pagination::PageRequest;
use postertrack_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::{SiteAssignmentRepo, UserRepo};
use crate::models::campaign::{
    AppendOutcome, Campaign, CampaignScope, CampaignSummary, CreateCampaign, DistributionResult,
};

const COLUMNS: &str = "id, name, client_id, account_manager_id, site_list, total_sites, \
                       uploaded_at, created_at, updated_at";

const SUMMARY_COLUMNS: &str =
    "id, name, client_id, account_manager_id, total_sites, uploaded_at, created_at";

pub struct CampaignRepo;

impl CampaignRepo {
    /// Create a campaign and distribute its sites, all in one transaction.
    ///
    /// The field-auditor roster is read inside the transaction, so the whole
    /// allocation pass works against a single snapshot. Sites in states no
    /// auditor covers come back as gaps.
    pub async fn create_distributed(
        pool: &PgPool,
        input: &CreateCampaign,
    ) -> Result<DistributionResult, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO campaigns (name, client_id, account_manager_id, site_list, total_sites, uploaded_at)
             VALUES ($1, $2, $3, $4, $5, NOW())
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&insert)
            .bind(&input.name)
            .bind(input.client_id)
            .bind(input.account_manager_id)
            .bind(Json(&input.site_list))
            .bind(site_count(input.site_list.len()))
            .fetch_one(&mut *tx)
            .await?;

        let roster = UserRepo::field_auditor_roster(&mut *tx).await?;
        let coverage = CoverageIndex::build(&roster);
        let allocation = allocate_sites(&input.site_list, &coverage, campaign.id);
        let assignments = SiteAssignmentRepo::insert_batch(&mut tx, &allocation.assignments).await?;

        tx.commit().await?;

        tracing::info!(
            campaign_id = campaign.id,
            sites = input.site_list.len(),
            assigned = assignments.len(),
            gaps = allocation.gaps.len(),
            "Campaign created and distributed",
        );

        Ok(DistributionResult {
            campaign,
            assignments,
            gaps: allocation.gaps,
        })
    }

    /// Append sites to an existing campaign and distribute only the new ones.
    ///
    /// The campaign row is locked for the duration. Codes already present in
    /// the campaign (or repeated within `sites`) abort the append without
    /// writing anything.
    pub async fn append_sites(
        pool: &PgPool,
        campaign_id: DbId,
        sites: &[SiteRecord],
    ) -> Result<AppendOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1 FOR UPDATE");
        let Some(existing) = sqlx::query_as::<_, Campaign>(&lock)
            .bind(campaign_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(AppendOutcome::CampaignNotFound);
        };

        let conflicts = conflicting_codes(&existing.site_list, sites);
        if !conflicts.is_empty() {
            return Ok(AppendOutcome::CodeConflict(conflicts));
        }

        let update = format!(
            "UPDATE campaigns
             SET site_list = site_list || $2, total_sites = total_sites + $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&update)
            .bind(campaign_id)
            .bind(Json(sites))
            .bind(site_count(sites.len()))
            .fetch_one(&mut *tx)
            .await?;

        let roster = UserRepo::field_auditor_roster(&mut *tx).await?;
        let coverage = CoverageIndex::build(&roster);
        let allocation = allocate_sites(sites, &coverage, campaign_id);
        let assignments = SiteAssignmentRepo::insert_batch(&mut tx, &allocation.assignments).await?;

        tx.commit().await?;

        tracing::info!(
            campaign_id,
            appended = sites.len(),
            assigned = assignments.len(),
            gaps = allocation.gaps.len(),
            "Sites appended to campaign",
        );

        Ok(AppendOutcome::Appended(DistributionResult {
            campaign,
            assignments,
            gaps: allocation.gaps,
        }))
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// One page of campaigns visible under `scope`, newest first, plus the
    /// total count for that scope.
    pub async fn list_page(
        pool: &PgPool,
        scope: CampaignScope,
        page: PageRequest,
    ) -> Result<(Vec<CampaignSummary>, i64), sqlx::Error> {
        let (predicate, owner) = scope.predicate();

        let query = format!(
            "SELECT {SUMMARY_COLUMNS} FROM campaigns
             WHERE {predicate}
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, CampaignSummary>(&query)
            .bind(owner)
            .bind(page.limit)
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count = format!("SELECT COUNT(*) FROM campaigns WHERE {predicate}");
        let (total,): (i64,) = sqlx::query_as(&count).bind(owner).fetch_one(pool).await?;

        Ok((rows, total))
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM campaigns")
            .fetch_one(pool)
            .await?;
        Ok(total)
    }
}

/// Codes in `incoming` that already exist in `existing` or repeat within
/// `incoming`, each reported once, in upload order.
fn conflicting_codes(existing: &[SiteRecord], incoming: &[SiteRecord]) -> Vec<String> {
    let mut seen: HashSet<&str> = existing.iter().map(|s| s.code.as_str()).collect();
    let mut conflicts: Vec<String> = Vec::new();
    for site in incoming {
        if !seen.insert(site.code.as_str()) && !conflicts.contains(&site.code) {
            conflicts.push(site.code.clone());
        }
    }
    conflicts
}

fn site_count(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}
