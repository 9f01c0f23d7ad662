//! Competitive-intelligence uploads and the competitive map.

use serde::Serialize;

use crate::error::CoreError;
use crate::fields::{parse_id, required_id, required_text};
use crate::types::DbId;

pub const MIN_COMPETITIVE_IMAGES: usize = 1;
pub const MAX_COMPETITIVE_IMAGES: usize = 5;

/// Raw text fields of a competitive upload. `category` may repeat.
#[derive(Debug, Clone, Default)]
pub struct CompetitiveDraft {
    pub advertiser: Option<String>,
    pub brand: Option<String>,
    pub board_type: Option<String>,
    pub categories: Vec<String>,
    pub region: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
}

impl CompetitiveDraft {
    /// Record a form field; returns whether the name was recognised.
    pub fn set(&mut self, name: &str, value: String) -> bool {
        let slot = match name {
            "advertiser" => &mut self.advertiser,
            "brand" => &mut self.brand,
            "board_type" => &mut self.board_type,
            "region" => &mut self.region,
            "state" => &mut self.state,
            "city" => &mut self.city,
            "category" => {
                self.categories.push(value);
                return true;
            }
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    pub fn validate(self) -> Result<CompetitiveSubmission, CoreError> {
        let advertiser = required_text("advertiser", self.advertiser.as_deref())?;
        let brand = required_text("brand", self.brand.as_deref())?;
        let board_type_id = required_id("board_type", self.board_type.as_deref())?;

        let mut category_ids: Vec<DbId> = Vec::with_capacity(self.categories.len());
        for raw in self.categories.iter().filter(|c| !c.trim().is_empty()) {
            let id = parse_id("category", raw)?;
            if !category_ids.contains(&id) {
                category_ids.push(id);
            }
        }
        if category_ids.is_empty() {
            return Err(CoreError::validation("category is required."));
        }

        Ok(CompetitiveSubmission {
            advertiser,
            brand,
            board_type_id,
            category_ids,
            region_id: required_id("region", self.region.as_deref())?,
            state_id: required_id("state", self.state.as_deref())?,
            city_id: required_id("city", self.city.as_deref())?,
        })
    }
}

/// A competitive upload that passed field validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompetitiveSubmission {
    pub advertiser: String,
    pub brand: String,
    pub board_type_id: DbId,
    /// Distinct, in submission order. The first one is the primary category.
    pub category_ids: Vec<DbId>,
    pub region_id: DbId,
    pub state_id: DbId,
    pub city_id: DbId,
}

impl CompetitiveSubmission {
    pub fn primary_category(&self) -> DbId {
        self.category_ids[0]
    }
}

pub fn check_image_count(count: usize) -> Result<(), CoreError> {
    if count < MIN_COMPETITIVE_IMAGES {
        return Err(CoreError::validation("At least one image is required."));
    }
    if count > MAX_COMPETITIVE_IMAGES {
        return Err(CoreError::validation(format!(
            "At most {MAX_COMPETITIVE_IMAGES} images may be attached to a competitive report."
        )));
    }
    Ok(())
}

/// Categories in `wanted` that the advertiser is not yet linked to.
pub fn missing_category_links(existing: &[DbId], wanted: &[DbId]) -> Vec<DbId> {
    wanted
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect()
}

/// What the competitive map compares an advertiser against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapBasis {
    /// The advertiser's compliance reports vs. competitors' sightings.
    Compliance,
    /// The advertiser's own sightings vs. the whole category market.
    Competitive,
}

/// Advertisers whose competitive reports fill the map's market layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapScope {
    pub basis: MapBasis,
    pub market_advertisers: Vec<DbId>,
}

/// Decide the map layers for `advertiser_id`.
///
/// `competitors` are advertisers sharing a category with it; the advertiser
/// itself is removed if present. Without compliance reports, the market layer
/// also includes the advertiser's own sightings.
pub fn map_scope(advertiser_id: DbId, competitors: &[DbId], has_compliance: bool) -> MapScope {
    let mut market: Vec<DbId> = competitors
        .iter()
        .copied()
        .filter(|id| *id != advertiser_id)
        .collect();
    market.dedup();

    if has_compliance {
        MapScope {
            basis: MapBasis::Compliance,
            market_advertisers: market,
        }
    } else {
        market.push(advertiser_id);
        MapScope {
            basis: MapBasis::Competitive,
            market_advertisers: market,
        }
    }
}
