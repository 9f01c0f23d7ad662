//! Regions, states and cities used to tag competitive sightings.

use postertrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Region {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRegion {
    pub name: String,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct State {
    pub id: DbId,
    pub name: String,
    pub region_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateState {
    pub name: String,
    pub region_id: DbId,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct City {
    pub id: DbId,
    pub name: String,
    pub state_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCity {
    pub name: String,
    pub state_id: DbId,
}
