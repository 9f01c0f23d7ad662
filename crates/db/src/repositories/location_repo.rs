//! Repositories for the region > state > city hierarchy.

use postertrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::location::{City, CreateCity, CreateRegion, CreateState, Region, State};

pub struct RegionRepo;

impl RegionRepo {
    const COLUMNS: &'static str = "id, name, created_at, updated_at";

    pub async fn create(pool: &PgPool, input: &CreateRegion) -> Result<Region, sqlx::Error> {
        let query = format!(
            "INSERT INTO regions (name) VALUES ($1) RETURNING {}",
            Self::COLUMNS
        );
        sqlx::query_as::<_, Region>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Region>, sqlx::Error> {
        let query = format!("SELECT {} FROM regions ORDER BY name", Self::COLUMNS);
        sqlx::query_as::<_, Region>(&query).fetch_all(pool).await
    }
}

pub struct StateRepo;

impl StateRepo {
    const COLUMNS: &'static str = "id, name, region_id, created_at, updated_at";

    /// Fails with a foreign-key violation if the region does not exist.
    pub async fn create(pool: &PgPool, input: &CreateState) -> Result<State, sqlx::Error> {
        let query = format!(
            "INSERT INTO states (name, region_id) VALUES ($1, $2) RETURNING {}",
            Self::COLUMNS
        );
        sqlx::query_as::<_, State>(&query)
            .bind(&input.name)
            .bind(input.region_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<State>, sqlx::Error> {
        let query = format!("SELECT {} FROM states ORDER BY name", Self::COLUMNS);
        sqlx::query_as::<_, State>(&query).fetch_all(pool).await
    }

    pub async fn list_by_region(pool: &PgPool, region_id: DbId) -> Result<Vec<State>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM states WHERE region_id = $1 ORDER BY name",
            Self::COLUMNS
        );
        sqlx::query_as::<_, State>(&query)
            .bind(region_id)
            .fetch_all(pool)
            .await
    }
}

pub struct CityRepo;

impl CityRepo {
    const COLUMNS: &'static str = "id, name, state_id, created_at, updated_at";

    pub async fn create(pool: &PgPool, input: &CreateCity) -> Result<City, sqlx::Error> {
        let query = format!(
            "INSERT INTO cities (name, state_id) VALUES ($1, $2) RETURNING {}",
            Self::COLUMNS
        );
        sqlx::query_as::<_, City>(&query)
            .bind(&input.name)
            .bind(input.state_id)
            .fetch_one(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<City>, sqlx::Error> {
        let query = format!("SELECT {} FROM cities ORDER BY name", Self::COLUMNS);
        sqlx::query_as::<_, City>(&query).fetch_all(pool).await
    }

    pub async fn list_by_state(pool: &PgPool, state_id: DbId) -> Result<Vec<City>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM cities WHERE state_id = $1 ORDER BY name",
            Self::COLUMNS
        );
        sqlx::query_as::<_, City>(&query)
            .bind(state_id)
            .fetch_all(pool)
            .await
    }
}
