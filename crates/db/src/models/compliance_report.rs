//! Compliance reports: an auditor's photo evidence for one assigned site.

use postertrack_core::compliance::ComplianceSubmission;
use postertrack_core::evidence::EvidenceImage;
use postertrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub id: DbId,
    pub campaign_id: DbId,
    pub site_assignment_id: DbId,
    pub field_auditor_id: DbId,
    pub site_code: String,
    pub advertiser: String,
    pub brand: String,
    pub city: String,
    pub address: String,
    pub board_type: String,
    pub media_owner: String,
    pub message: String,
    pub comment: String,
    pub status: String,
    pub bsv: String,
    pub structure_id: DbId,
    pub poster_id: DbId,
    pub illumination_id: DbId,
    pub route_id: DbId,
    pub side_id: DbId,
    pub images: Json<Vec<EvidenceImage>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A report with the names behind its lookup ids and its auditor.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ComplianceReportDetail {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub report: ComplianceReport,
    pub structure: String,
    pub poster: String,
    pub illumination: String,
    pub route: String,
    pub side: String,
    pub auditor_firstname: Option<String>,
    pub auditor_lastname: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateComplianceReport {
    pub field_auditor_id: DbId,
    pub site_assignment_id: DbId,
    pub submission: ComplianceSubmission,
    pub images: Vec<EvidenceImage>,
}
