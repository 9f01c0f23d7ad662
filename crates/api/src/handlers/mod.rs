pub mod analytics;
pub mod auth;
pub mod campaigns;
pub mod catalog;
pub mod competitive;
pub mod compliance;
pub mod locations;
pub mod lookups;
pub mod search;
pub mod sites;
pub mod users;
