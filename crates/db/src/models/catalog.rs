//! Categories, advertisers, brands, industries and board types.

use postertrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Advertiser {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An advertiser with the ids of the categories it is linked to.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdvertiserWithCategories {
    pub id: DbId,
    pub name: String,
    pub category_ids: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAdvertiser {
    pub name: String,
    #[serde(default)]
    pub category_ids: Vec<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateAdvertiser {
    pub name: Option<String>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub advertiser_id: DbId,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateBrand {
    pub name: String,
    pub advertiser_id: DbId,
    pub category_id: Option<DbId>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBrand {
    pub name: Option<String>,
    pub advertiser_id: Option<DbId>,
    pub category_id: Option<DbId>,
}

/// Row shape shared by `industries` and `board_types`.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct NamedEntry {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateNamed {
    pub name: String,
}
