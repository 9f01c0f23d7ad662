//! Repository for `advertisers` and their category links.

use postertrack_core::competitive::missing_category_links;
use postertrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{
    Advertiser, AdvertiserWithCategories, CreateAdvertiser, UpdateAdvertiser,
};

const COLUMNS: &str = "id, name, created_at, updated_at";

const WITH_CATEGORIES: &str = "SELECT a.id, a.name, \
        COALESCE(ARRAY_AGG(ac.category_id ORDER BY ac.category_id) \
                 FILTER (WHERE ac.category_id IS NOT NULL), '{}') AS category_ids, \
        a.created_at, a.updated_at \
     FROM advertisers a \
     LEFT JOIN advertiser_categories ac ON ac.advertiser_id = a.id";

pub struct AdvertiserRepo;

impl AdvertiserRepo {
    /// Insert an advertiser and link its categories. A taken name fails on
    /// `uq_advertisers_name`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdvertiser,
    ) -> Result<Advertiser, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let query = format!("INSERT INTO advertisers (name) VALUES ($1) RETURNING {COLUMNS}");
        let advertiser = sqlx::query_as::<_, Advertiser>(&query)
            .bind(&input.name)
            .fetch_one(&mut *tx)
            .await?;
        Self::link_categories(&mut tx, advertiser.id, &input.category_ids).await?;
        tx.commit().await?;
        Ok(advertiser)
    }

    /// Find an advertiser by exact name, creating it if missing, and make
    /// sure it is linked to every category in `category_ids`. Runs inside
    /// the caller's transaction.
    pub async fn find_or_create_with_categories(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
        category_ids: &[DbId],
    ) -> Result<Advertiser, sqlx::Error> {
        let upsert = format!(
            "INSERT INTO advertisers (name) VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_advertisers_name DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        let advertiser = sqlx::query_as::<_, Advertiser>(&upsert)
            .bind(name)
            .fetch_one(&mut **tx)
            .await?;

        let existing: Vec<(DbId,)> = sqlx::query_as(
            "SELECT category_id FROM advertiser_categories WHERE advertiser_id = $1",
        )
        .bind(advertiser.id)
        .fetch_all(&mut **tx)
        .await?;
        let existing: Vec<DbId> = existing.into_iter().map(|(id,)| id).collect();

        let missing = missing_category_links(&existing, category_ids);
        if !missing.is_empty() {
            tracing::debug!(advertiser_id = advertiser.id, ?missing, "Linking new categories");
            Self::link_categories(tx, advertiser.id, &missing).await?;
        }

        Ok(advertiser)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Advertiser>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM advertisers WHERE id = $1");
        sqlx::query_as::<_, Advertiser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_with_categories(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AdvertiserWithCategories>, sqlx::Error> {
        let query = format!("{WITH_CATEGORIES} WHERE a.id = $1 GROUP BY a.id");
        sqlx::query_as::<_, AdvertiserWithCategories>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<AdvertiserWithCategories>, sqlx::Error> {
        let query = format!("{WITH_CATEGORIES} GROUP BY a.id ORDER BY a.name");
        sqlx::query_as::<_, AdvertiserWithCategories>(&query)
            .fetch_all(pool)
            .await
    }

    /// Advertisers sharing at least one category with `advertiser_id`,
    /// excluding itself.
    pub async fn competitor_ids(pool: &PgPool, advertiser_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "SELECT DISTINCT other.advertiser_id
             FROM advertiser_categories mine
             JOIN advertiser_categories other ON other.category_id = mine.category_id
             WHERE mine.advertiser_id = $1 AND other.advertiser_id <> $1
             ORDER BY other.advertiser_id",
        )
        .bind(advertiser_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdvertiser,
    ) -> Result<Option<Advertiser>, sqlx::Error> {
        let query = format!(
            "UPDATE advertisers SET name = COALESCE($2, name) WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Advertiser>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM advertisers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn search(
        pool: &PgPool,
        pattern: &str,
        limit: i64,
    ) -> Result<Vec<Advertiser>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM advertisers WHERE name ILIKE $1 ORDER BY name LIMIT $2"
        );
        sqlx::query_as::<_, Advertiser>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM advertisers")
            .fetch_one(pool)
            .await?;
        Ok(total)
    }

    async fn link_categories(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        advertiser_id: DbId,
        category_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        if category_ids.is_empty() {
            return Ok(());
        }
        sqlx::query(
            "INSERT INTO advertiser_categories (advertiser_id, category_id)
             SELECT $1, UNNEST($2::BIGINT[])
             ON CONFLICT ON CONSTRAINT uq_advertiser_categories_pair DO NOTHING",
        )
        .bind(advertiser_id)
        .bind(category_ids)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
