//! Repository layer.
//!
//! Each repository is a zero-sized struct with async query methods taking
//! `&PgPool` first. Methods that must join a caller's transaction take the
//! transaction or a generic executor instead.

pub mod advertiser_repo;
pub mod analytics_repo;
pub mod brand_repo;
pub mod campaign_repo;
pub mod category_repo;
pub mod competitive_report_repo;
pub mod compliance_report_repo;
pub mod location_repo;
pub mod lookup_repo;
pub mod named_repo;
pub mod site_assignment_repo;
pub mod user_repo;

pub use advertiser_repo::AdvertiserRepo;
pub use analytics_repo::AnalyticsRepo;
pub use brand_repo::BrandRepo;
pub use campaign_repo::CampaignRepo;
pub use category_repo::CategoryRepo;
pub use competitive_report_repo::CompetitiveReportRepo;
pub use compliance_report_repo::ComplianceReportRepo;
pub use location_repo::{CityRepo, RegionRepo, StateRepo};
pub use lookup_repo::{BsvRepo, LookupRepo};
pub use named_repo::{BoardTypeRepo, IndustryRepo};
pub use site_assignment_repo::SiteAssignmentRepo;
pub use user_repo::UserRepo;
