//! Fixtures shared by the repository tests.

#![allow(dead_code)]

use postertrack_core::distribution::types::SiteRecord;
use postertrack_core::roles::Role;
use postertrack_db::models::user::{CreateUser, User};
use postertrack_db::repositories::UserRepo;
use sqlx::PgPool;

pub fn new_user(email: &str, role: Role) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: "not-a-real-hash".to_string(),
        role,
        firstname: None,
        lastname: None,
        name: None,
        phone: None,
        address: None,
        states_covered: Vec::new(),
        additional_emails: Vec::new(),
        industry: None,
    }
}

pub async fn auditor(pool: &PgPool, email: &str, states: &[&str]) -> User {
    let mut input = new_user(email, Role::FieldAuditor);
    input.firstname = Some("Field".into());
    input.lastname = Some("Auditor".into());
    input.states_covered = states.iter().map(|s| s.to_string()).collect();
    UserRepo::create(pool, &input).await.unwrap()
}

pub async fn user(pool: &PgPool, email: &str, role: Role) -> User {
    UserRepo::create(pool, &new_user(email, role)).await.unwrap()
}

pub fn site(code: &str, state: &str, location: &str) -> SiteRecord {
    SiteRecord {
        code: code.to_string(),
        state: state.to_string(),
        city: "Ikeja".to_string(),
        location: location.to_string(),
        media_owner: "Outdoor Co".to_string(),
        brand: "Acme Cola".to_string(),
        format: "48 Sheet".to_string(),
    }
}

pub fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    }
}
