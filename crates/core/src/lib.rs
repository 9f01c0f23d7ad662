//! Domain logic for the PosterTrack campaign audit backend.
//!
//! Everything in this crate is pure: no database, network, or filesystem
//! access. The `db` and `api` crates build on these types.

pub mod competitive;
pub mod compliance;
pub mod distribution;
pub mod error;
pub mod evidence;
pub mod fields;
pub mod lookups;
pub mod pagination;
pub mod roles;
pub mod search;
pub mod types;
pub mod users;
