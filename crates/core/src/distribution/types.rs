//! Records flowing through the distribution pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// One cell of an uploaded grid. `None` is a missing cell.
pub type Cell = Option<String>;

/// A decoded upload: rows of cells, header first.
pub type SiteGrid = Vec<Vec<Cell>>;

/// How the parser treats the `code` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadMode {
    /// Creating a campaign: codes are always synthesized, an explicit code is an error.
    NewCampaign,
    /// Adding sites to an existing campaign: explicit codes are kept.
    ///
    /// Synthesized codes are shifted by `code_offset` (see
    /// [`append_code_offset`](super::parser::append_code_offset)) so they
    /// continue the campaign's numbering.
    AppendToCampaign { code_offset: usize },
}

impl UploadMode {
    /// Code for a blank-coded row at 1-based grid position `row_number`.
    pub fn synthesized_code(self, row_number: usize) -> String {
        match self {
            UploadMode::NewCampaign => super::parser::synthesize_code(row_number),
            UploadMode::AppendToCampaign { code_offset } => {
                super::parser::synthesize_code(row_number + code_offset)
            }
        }
    }
}

/// A billboard site parsed from an upload. Immutable once assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub code: String,
    pub state: String,
    pub city: String,
    /// Physical address; the deduplication key.
    pub location: String,
    pub media_owner: String,
    pub brand: String,
    pub format: String,
}

/// A row whose location repeats an earlier row of the same upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateRecord {
    /// 1-based position of this row in the grid (header is row 1).
    pub row: usize,
    /// Row where the location was first seen.
    pub first_row: usize,
    pub code: String,
    pub state: String,
    pub city: String,
    pub location: String,
    pub media_owner: String,
    pub brand: String,
    pub format: String,
}

/// Parser output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedSiteList {
    pub site_records: Vec<SiteRecord>,
    pub duplicates: Vec<DuplicateRecord>,
}

impl ParsedSiteList {
    pub fn has_duplicates(&self) -> bool {
        !self.duplicates.is_empty()
    }
}

/// One roster entry: an auditor and the states they cover, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditorCoverage {
    pub auditor_id: DbId,
    pub states: Vec<String>,
}

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_DISAPPROVED: &str = "disapproved";

/// Review status of a site assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    Pending,
    Approved,
    Disapproved,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Pending => STATUS_PENDING,
            AssignmentStatus::Approved => STATUS_APPROVED,
            AssignmentStatus::Disapproved => STATUS_DISAPPROVED,
        }
    }
}

impl fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssignmentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(AssignmentStatus::Pending),
            STATUS_APPROVED => Ok(AssignmentStatus::Approved),
            STATUS_DISAPPROVED => Ok(AssignmentStatus::Disapproved),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {STATUS_PENDING}, {STATUS_APPROVED}, {STATUS_DISAPPROVED}"
            ))),
        }
    }
}

/// An assignment produced by the allocator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteAssignment {
    pub campaign_id: DbId,
    pub site_code: String,
    pub field_auditor_id: DbId,
    pub status: AssignmentStatus,
}

/// A site whose state no auditor covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    /// 0-based position in the parsed site list.
    pub position: usize,
    pub site_code: String,
    /// The state exactly as uploaded, not the normalized lookup key.
    pub state: String,
}

/// Allocator output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub assignments: Vec<SiteAssignment>,
    pub gaps: Vec<CoverageGap>,
}
