//! Competitive sightings of other advertisers' boards.

use postertrack_core::competitive::MapBasis;
use postertrack_core::evidence::EvidenceImage;
use postertrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use super::compliance_report::ComplianceReport;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompetitiveReport {
    pub id: DbId,
    pub field_auditor_id: DbId,
    pub advertiser_id: DbId,
    pub brand_id: DbId,
    pub board_type_id: DbId,
    pub category_id: DbId,
    pub region_id: DbId,
    pub state_id: DbId,
    pub city_id: DbId,
    pub images: Json<Vec<EvidenceImage>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A report with the names behind each id.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct CompetitiveReportDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub report: CompetitiveReport,
    pub advertiser: String,
    pub brand: String,
    pub board_type: String,
    pub category: String,
    pub region: String,
    pub state: String,
    pub city: String,
}

/// A sighting to record. Advertiser and brand are names; unknown ones are
/// created along with the report.
#[derive(Debug, Clone)]
pub struct CreateCompetitiveReport {
    pub field_auditor_id: DbId,
    pub advertiser: String,
    pub brand: String,
    /// Stored on the report and on a newly created brand.
    pub category_id: DbId,
    /// Every category the advertiser should be linked to.
    pub category_ids: Vec<DbId>,
    pub board_type_id: DbId,
    pub region_id: DbId,
    pub state_id: DbId,
    pub city_id: DbId,
    pub images: Vec<EvidenceImage>,
}

/// Data behind the competitive map of one advertiser.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitiveMap {
    pub advertiser_id: DbId,
    pub basis: MapBasis,
    pub advertiser_has_compliance_report: bool,
    pub advertiser_compliance_data: Vec<ComplianceReport>,
    pub advertiser_competitive_data: Vec<CompetitiveReport>,
    pub competitor_data: Vec<CompetitiveReport>,
}
