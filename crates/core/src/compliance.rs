//! Compliance report submission and review rules.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::distribution::types::AssignmentStatus;
use crate::error::CoreError;
use crate::fields::{required_id, required_text};
use crate::types::DbId;

/// Brand-share-of-voice value stored when the auditor leaves it blank.
pub const DEFAULT_BSV: &str = "0%";

/// Photos accepted per compliance report.
pub const MAX_COMPLIANCE_IMAGES: usize = 2;

/// Raw text fields of a compliance upload, keyed by form field name.
#[derive(Debug, Clone, Default)]
pub struct ComplianceDraft {
    pub site_code: Option<String>,
    pub campaign_id: Option<String>,
    pub advertiser: Option<String>,
    pub brand: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub board_type: Option<String>,
    pub media_owner: Option<String>,
    pub message: Option<String>,
    pub comment: Option<String>,
    pub status: Option<String>,
    pub bsv: Option<String>,
    pub structure_id: Option<String>,
    pub poster_id: Option<String>,
    pub illumination_id: Option<String>,
    pub route_id: Option<String>,
    pub side_id: Option<String>,
}

impl ComplianceDraft {
    /// Record a form field. Unknown names are ignored; returns whether the
    /// name was recognised.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "site_code" => &mut self.site_code,
            "campaign_id" => &mut self.campaign_id,
            "advertiser" => &mut self.advertiser,
            "brand" => &mut self.brand,
            "city" => &mut self.city,
            "address" => &mut self.address,
            "board_type" => &mut self.board_type,
            "media_owner" => &mut self.media_owner,
            "message" => &mut self.message,
            "comment" => &mut self.comment,
            "status" => &mut self.status,
            "bsv" => &mut self.bsv,
            "structure_id" => &mut self.structure_id,
            "poster_id" => &mut self.poster_id,
            "illumination_id" => &mut self.illumination_id,
            "route_id" => &mut self.route_id,
            "side_id" => &mut self.side_id,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Check required fields, in form order, and parse ids.
    pub fn validate(self) -> Result<ComplianceSubmission, CoreError> {
        let site_code = required_text("site_code", self.site_code.as_deref())?;
        let campaign_id = required_id("campaign_id", self.campaign_id.as_deref())?;
        let advertiser = required_text("advertiser", self.advertiser.as_deref())?;
        let brand = required_text("brand", self.brand.as_deref())?;
        let city = required_text("city", self.city.as_deref())?;
        let address = required_text("address", self.address.as_deref())?;
        let board_type = required_text("board_type", self.board_type.as_deref())?;
        let media_owner = required_text("media_owner", self.media_owner.as_deref())?;
        let message = required_text("message", self.message.as_deref())?;
        let comment = required_text("comment", self.comment.as_deref())?;
        let structure_id = required_id("structure_id", self.structure_id.as_deref())?;
        let poster_id = required_id("poster_id", self.poster_id.as_deref())?;
        let illumination_id = required_id("illumination_id", self.illumination_id.as_deref())?;
        let route_id = required_id("route_id", self.route_id.as_deref())?;
        let side_id = required_id("side_id", self.side_id.as_deref())?;

        let status = match self.status.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => s.parse::<AssignmentStatus>()?,
            _ => AssignmentStatus::Pending,
        };
        let bsv = self
            .bsv
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty())
            .unwrap_or_else(|| DEFAULT_BSV.to_string());

        Ok(ComplianceSubmission {
            site_code,
            campaign_id,
            advertiser,
            brand,
            city,
            address,
            board_type,
            media_owner,
            message,
            comment,
            status,
            bsv,
            structure_id,
            poster_id,
            illumination_id,
            route_id,
            side_id,
        })
    }
}

/// A compliance upload that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplianceSubmission {
    pub site_code: String,
    pub campaign_id: DbId,
    pub advertiser: String,
    pub brand: String,
    pub city: String,
    pub address: String,
    pub board_type: String,
    pub media_owner: String,
    pub message: String,
    pub comment: String,
    pub status: AssignmentStatus,
    pub bsv: String,
    pub structure_id: DbId,
    pub poster_id: DbId,
    pub illumination_id: DbId,
    pub route_id: DbId,
    pub side_id: DbId,
}

/// Outcome of a staff review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Disapproved,
}

impl ReviewDecision {
    pub fn as_str(self) -> &'static str {
        self.assignment_status().as_str()
    }

    /// Status mirrored onto the site assignment.
    pub fn assignment_status(self) -> AssignmentStatus {
        match self {
            ReviewDecision::Approved => AssignmentStatus::Approved,
            ReviewDecision::Disapproved => AssignmentStatus::Disapproved,
        }
    }

    /// Disapproved reports trigger a compliance alert to the auditor.
    pub fn notifies_auditor(self) -> bool {
        self == ReviewDecision::Disapproved
    }
}

impl fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewDecision {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(ReviewDecision::Approved),
            "disapproved" => Ok(ReviewDecision::Disapproved),
            _ => Err(CoreError::validation("Invalid status provided.")),
        }
    }
}

/// Photo count check for a compliance upload.
pub fn check_image_count(count: usize) -> Result<(), CoreError> {
    if count > MAX_COMPLIANCE_IMAGES {
        return Err(CoreError::validation(format!(
            "At most {MAX_COMPLIANCE_IMAGES} images may be attached to a compliance report."
        )));
    }
    Ok(())
}
