//! Rows of the lookup and brand-share-of-voice tables.

use postertrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A `{id, name}` board descriptor (structure, poster, ...).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct LookupEntry {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateLookupEntry {
    pub name: String,
}

/// A `{id, number}` brand-share-of-voice score.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct BsvValue {
    pub id: DbId,
    pub number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBsvValue {
    #[serde(alias = "num")]
    pub number: i32,
}
