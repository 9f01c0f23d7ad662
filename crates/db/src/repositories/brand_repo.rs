//! Repository for the `brands` table.

use postertrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::catalog::{Brand, CreateBrand, UpdateBrand};

const COLUMNS: &str = "id, name, advertiser_id, category_id, created_at, updated_at";

pub struct BrandRepo;

impl BrandRepo {
    pub async fn create(pool: &PgPool, input: &CreateBrand) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, advertiser_id, category_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(&input.name)
            .bind(input.advertiser_id)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find the advertiser's brand by name, or create it with `category_id`.
    /// An existing brand keeps its category.
    pub async fn find_or_create(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
        advertiser_id: DbId,
        category_id: DbId,
    ) -> Result<Brand, sqlx::Error> {
        let query = format!(
            "INSERT INTO brands (name, advertiser_id, category_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_brands_advertiser_name
                 DO UPDATE SET name = EXCLUDED.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(name)
            .bind(advertiser_id)
            .bind(category_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE id = $1");
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands ORDER BY name");
        sqlx::query_as::<_, Brand>(&query).fetch_all(pool).await
    }

    pub async fn list_by_advertiser(
        pool: &PgPool,
        advertiser_id: DbId,
    ) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM brands WHERE advertiser_id = $1 ORDER BY name");
        sqlx::query_as::<_, Brand>(&query)
            .bind(advertiser_id)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBrand,
    ) -> Result<Option<Brand>, sqlx::Error> {
        let query = format!(
            "UPDATE brands SET
                name = COALESCE($2, name),
                advertiser_id = COALESCE($3, advertiser_id),
                category_id = COALESCE($4, category_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.advertiser_id)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM brands WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn search(pool: &PgPool, pattern: &str, limit: i64) -> Result<Vec<Brand>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM brands WHERE name ILIKE $1 ORDER BY name LIMIT $2");
        sqlx::query_as::<_, Brand>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM brands")
            .fetch_one(pool)
            .await?;
        Ok(total)
    }
}
