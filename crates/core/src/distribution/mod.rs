//! Site-list ingestion and field-auditor distribution.
//!
//! A campaign upload runs three steps, in order, within one request:
//!
//! 1. [`ingest::grid_from_csv`] + [`parser::parse_site_list`] turn the uploaded
//!    file into normalized [`types::SiteRecord`]s and flag repeated locations.
//! 2. [`coverage::CoverageIndex::build`] maps each normalized state to the
//!    auditors covering it, in roster order.
//! 3. [`allocator::allocate_sites`] hands each site to the next auditor for
//!    its state, round-robin, per state.
//!
//! No database access happens here; the roster is passed in as a snapshot.

pub mod allocator;
pub mod coverage;
pub mod ingest;
pub mod parser;
pub mod types;

pub use allocator::allocate_sites;
pub use coverage::{normalize_state, CoverageIndex};
pub use ingest::grid_from_csv;
pub use parser::{append_code_offset, parse_site_list};

use crate::error::CoreError;

/// Number of columns every site-list row must carry:
/// code, state, city, location, media owner, brand, format.
pub const SITE_LIST_COLUMNS: usize = 7;

/// Rejections raised while reading a site list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteListError {
    #[error("empty file")]
    EmptyFile,

    #[error("column count mismatch: row {row} has {found} columns, expected {SITE_LIST_COLUMNS}")]
    ColumnCountMismatch { row: usize, found: usize },

    #[error("non-empty code: row {row} has a value in the 'code' column")]
    CodeNotAllowed { row: usize },

    #[error("unreadable file: {0}")]
    Unreadable(String),
}

impl From<SiteListError> for CoreError {
    fn from(err: SiteListError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
