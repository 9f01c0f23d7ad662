//! Authentication primitives.
//!
//! - [`password`]: Argon2id hashing and generated account passwords.
//! - [`jwt`]: HS256 access tokens.

pub mod jwt;
pub mod password;
