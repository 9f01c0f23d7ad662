//! Dashboard counters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Overview {
    pub total_clients: i64,
    pub total_brands: i64,
    pub total_advertisers: i64,
    pub total_field_auditors: i64,
    pub total_sites: i64,
    pub total_campaigns: i64,
}
