//! Repository for the `users` table.

use postertrack_core::distribution::types::AuditorCoverage;
use postertrack_core::roles::{Role, ROLE_FIELD_AUDITOR, ROLE_SUPER_ADMIN};
use postertrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{CreateUser, RosterEntry, User};

const COLUMNS: &str = "id, email, password_hash, role, firstname, lastname, name, phone, \
                       address, states_covered, additional_emails, industry, created_at, updated_at";

pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// A second super admin or a reused email fails on a `uq_users_*` constraint.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, role, firstname, lastname, name, phone,
                                address, states_covered, additional_emails, industry)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(&input.firstname)
            .bind(&input.lastname)
            .bind(&input.name)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.states_covered)
            .bind(&input.additional_emails)
            .bind(&input.industry)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id, but only if they hold `role`.
    pub async fn find_with_role(
        pool: &PgPool,
        id: DbId,
        role: Role,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1 AND role = $2");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Emails are stored lower-cased; pass a lower-cased address.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn super_admin_exists(pool: &PgPool) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM users WHERE role = $1)")
                .bind(ROLE_SUPER_ADMIN)
                .fetch_one(pool)
                .await?;
        Ok(exists)
    }

    /// List users, optionally filtered by role, oldest first.
    pub async fn list(pool: &PgPool, role: Option<Role>) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(role.map(Role::as_str))
            .fetch_all(pool)
            .await
    }

    /// Field auditors and the states they cover, in creation order.
    ///
    /// Generic over the executor so a campaign upload can take the snapshot
    /// inside its own transaction.
    pub async fn field_auditor_roster<'e, E>(executor: E) -> Result<Vec<AuditorCoverage>, sqlx::Error>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let rows = sqlx::query_as::<_, RosterEntry>(
            "SELECT id, states_covered FROM users WHERE role = $1 ORDER BY id",
        )
        .bind(ROLE_FIELD_AUDITOR)
        .fetch_all(executor)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AuditorCoverage {
                auditor_id: r.id,
                states: r.states_covered,
            })
            .collect())
    }

    /// Substring search over names and email (case-insensitive).
    pub async fn search(pool: &PgPool, pattern: &str, limit: i64) -> Result<Vec<User>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM users
             WHERE firstname ILIKE $1 OR lastname ILIKE $1 OR name ILIKE $1 OR email ILIKE $1
             ORDER BY id
             LIMIT $2"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(pattern)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
