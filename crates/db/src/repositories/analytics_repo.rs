//! Dashboard counters.

use postertrack_core::roles::{ROLE_CLIENT_AGENCY_USER, ROLE_FIELD_AUDITOR};
use sqlx::PgPool;

use crate::models::analytics::Overview;

pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// All counters in one round trip.
    pub async fn overview(pool: &PgPool) -> Result<Overview, sqlx::Error> {
        sqlx::query_as::<_, Overview>(
            "SELECT
                (SELECT COUNT(*) FROM users WHERE role = $1) AS total_clients,
                (SELECT COUNT(*) FROM brands) AS total_brands,
                (SELECT COUNT(*) FROM advertisers) AS total_advertisers,
                (SELECT COUNT(*) FROM users WHERE role = $2) AS total_field_auditors,
                (SELECT COUNT(*) FROM site_assignments) AS total_sites,
                (SELECT COUNT(*) FROM campaigns) AS total_campaigns",
        )
        .bind(ROLE_CLIENT_AGENCY_USER)
        .bind(ROLE_FIELD_AUDITOR)
        .fetch_one(pool)
        .await
    }
}
