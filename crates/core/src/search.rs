//! Name search across catalog entities and users.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of search results.
pub const MAX_SEARCH_LIMIT: i64 = 100;

/// Entity types accepted by `GET /search?type=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Advertiser,
    Brand,
    Category,
    User,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Advertiser,
        SearchKind::Brand,
        SearchKind::Category,
        SearchKind::User,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SearchKind::Advertiser => "advertiser",
            SearchKind::Brand => "brand",
            SearchKind::Category => "category",
            SearchKind::User => "user",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchKind {
    type Err = CoreError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        SearchKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| {
                CoreError::validation(
                    "Invalid search type. Use 'advertiser', 'brand', 'category', or 'user'.",
                )
            })
    }
}

/// Validate a raw search term: trimmed, non-empty.
pub fn normalize_term(q: Option<&str>) -> Result<String, CoreError> {
    match q.map(str::trim) {
        Some(term) if !term.is_empty() => Ok(term.to_string()),
        _ => Err(CoreError::validation("Search term (`q`) is required")),
    }
}

/// Build an `ILIKE` pattern matching `term` as a substring.
///
/// `%`, `_` and `\` in the term are escaped so they match literally.
pub fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parsing_is_case_insensitive() {
        assert_eq!("Brand".parse::<SearchKind>().unwrap(), SearchKind::Brand);
        assert_eq!(" USER ".parse::<SearchKind>().unwrap(), SearchKind::User);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = "campaign".parse::<SearchKind>().unwrap_err();
        assert!(err.to_string().contains("Invalid search type"));
    }

    #[test]
    fn blank_term_is_rejected() {
        assert!(normalize_term(None).is_err());
        assert!(normalize_term(Some("   ")).is_err());
        assert_eq!(normalize_term(Some(" coke ")).unwrap(), "coke");
    }

    #[test]
    fn like_pattern_wraps_and_escapes() {
        assert_eq!(like_pattern("coke"), "%coke%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn clamp_limit_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_SEARCH_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(1000)), MAX_SEARCH_LIMIT);
    }
}
