//! Campaigns and their site assignments.

use postertrack_core::distribution::types::{AssignmentStatus, CoverageGap, SiteRecord};
use postertrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Row from `campaigns`. `site_list` holds every uploaded site, in order.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Campaign {
    pub id: DbId,
    pub name: Option<String>,
    pub client_id: DbId,
    pub account_manager_id: DbId,
    pub site_list: Json<Vec<SiteRecord>>,
    pub total_sites: i32,
    pub uploaded_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Campaign list entry: everything except the site list.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub id: DbId,
    pub name: Option<String>,
    pub client_id: DbId,
    pub account_manager_id: DbId,
    pub total_sites: i32,
    pub uploaded_at: Timestamp,
    pub created_at: Timestamp,
}

/// Which campaigns a caller may list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampaignScope {
    All,
    AccountManager(DbId),
    Client(DbId),
    /// Campaigns with at least one site assigned to this auditor.
    FieldAuditor(DbId),
}

impl CampaignScope {
    /// SQL predicate over `campaigns` using `$1` as the owner id, plus the
    /// value to bind.
    pub(crate) fn predicate(self) -> (&'static str, Option<DbId>) {
        match self {
            CampaignScope::All => ("$1::BIGINT IS NULL", None),
            CampaignScope::AccountManager(id) => ("account_manager_id = $1", Some(id)),
            CampaignScope::Client(id) => ("client_id = $1", Some(id)),
            CampaignScope::FieldAuditor(id) => (
                "EXISTS (SELECT 1 FROM site_assignments sa \
                         WHERE sa.campaign_id = campaigns.id AND sa.field_auditor_id = $1)",
                Some(id),
            ),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateCampaign {
    pub name: Option<String>,
    pub client_id: DbId,
    pub account_manager_id: DbId,
    pub site_list: Vec<SiteRecord>,
}

/// Row from `site_assignments`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SiteAssignmentRow {
    pub id: DbId,
    pub campaign_id: DbId,
    pub site_code: String,
    pub field_auditor_id: DbId,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An assignment joined with its campaign name and the uploaded site record.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AssignmentDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub assignment: SiteAssignmentRow,
    pub campaign_name: Option<String>,
    pub site: Option<Json<SiteRecord>>,
}

/// Result of a campaign upload or append.
#[derive(Debug, Clone, Serialize)]
pub struct DistributionResult {
    pub campaign: Campaign,
    pub assignments: Vec<SiteAssignmentRow>,
    pub gaps: Vec<CoverageGap>,
}

/// Outcome of appending sites to an existing campaign.
#[derive(Debug, Clone)]
pub enum AppendOutcome {
    Appended(DistributionResult),
    /// No campaign with that id.
    CampaignNotFound,
    /// These codes already exist in the campaign; nothing was written.
    CodeConflict(Vec<String>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAssignmentStatus {
    pub status: AssignmentStatus,
}
