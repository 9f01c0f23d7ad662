//! Repositories for the lookup and BSV registries.
//!
//! Table names come from [`LookupKind::table`] and [`BsvKind::table`] only.

use postertrack_core::lookups::{BsvKind, LookupKind};
use sqlx::PgPool;

use crate::models::lookup::{BsvValue, CreateBsvValue, CreateLookupEntry, LookupEntry};

pub struct LookupRepo;

impl LookupRepo {
    const COLUMNS: &'static str = "id, name, created_at, updated_at";

    pub async fn create(
        pool: &PgPool,
        kind: LookupKind,
        input: &CreateLookupEntry,
    ) -> Result<LookupEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING {}",
            kind.table(),
            Self::COLUMNS
        );
        sqlx::query_as::<_, LookupEntry>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, kind: LookupKind) -> Result<Vec<LookupEntry>, sqlx::Error> {
        let query = format!("SELECT {} FROM {} ORDER BY id", Self::COLUMNS, kind.table());
        sqlx::query_as::<_, LookupEntry>(&query).fetch_all(pool).await
    }
}

pub struct BsvRepo;

impl BsvRepo {
    const COLUMNS: &'static str = "id, number, created_at, updated_at";

    pub async fn create(
        pool: &PgPool,
        kind: BsvKind,
        input: &CreateBsvValue,
    ) -> Result<BsvValue, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (number) VALUES ($1) RETURNING {}",
            kind.table(),
            Self::COLUMNS
        );
        sqlx::query_as::<_, BsvValue>(&query)
            .bind(input.number)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool, kind: BsvKind) -> Result<Vec<BsvValue>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM {} ORDER BY number",
            Self::COLUMNS,
            kind.table()
        );
        sqlx::query_as::<_, BsvValue>(&query).fetch_all(pool).await
    }
}
