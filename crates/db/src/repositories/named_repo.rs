//! Repositories for `industries` and `board_types`, which share one row shape.

use sqlx::PgPool;

use crate::models::catalog::{CreateNamed, NamedEntry};

const COLUMNS: &str = "id, name, created_at, updated_at";

async fn insert(pool: &PgPool, table: &str, input: &CreateNamed) -> Result<NamedEntry, sqlx::Error> {
    let query = format!("INSERT INTO {table} (name) VALUES ($1) RETURNING {COLUMNS}");
    sqlx::query_as::<_, NamedEntry>(&query)
        .bind(&input.name)
        .fetch_one(pool)
        .await
}

async fn list(pool: &PgPool, table: &str) -> Result<Vec<NamedEntry>, sqlx::Error> {
    let query = format!("SELECT {COLUMNS} FROM {table} ORDER BY name");
    sqlx::query_as::<_, NamedEntry>(&query).fetch_all(pool).await
}

pub struct IndustryRepo;

impl IndustryRepo {
    pub async fn create(pool: &PgPool, input: &CreateNamed) -> Result<NamedEntry, sqlx::Error> {
        insert(pool, "industries", input).await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<NamedEntry>, sqlx::Error> {
        list(pool, "industries").await
    }
}

pub struct BoardTypeRepo;

impl BoardTypeRepo {
    pub async fn create(pool: &PgPool, input: &CreateNamed) -> Result<NamedEntry, sqlx::Error> {
        insert(pool, "board_types", input).await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<NamedEntry>, sqlx::Error> {
        list(pool, "board_types").await
    }
}
