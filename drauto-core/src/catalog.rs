use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A service offered by the workshop. The catalog is read-only from the
/// API's point of view; rows are loaded out of band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceRecord {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub img: Option<String>,
    pub service_id: Option<String>,
}

/// Price ordering for catalog listings.
///
/// Only the literal `asc` selects ascending. Anything else, including an
/// absent parameter, sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("asc") => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Descending
    }
}

/// Catalog search parameters: an optional title filter plus the price
/// ordering.
#[derive(Debug, Clone, Default)]
pub struct ServiceQuery {
    pub search: Option<String>,
    pub sort: SortOrder,
}

impl ServiceQuery {
    /// Case-insensitive substring match on a service title. An absent
    /// search term matches every title.
    pub fn matches_title(&self, title: &str) -> bool {
        match self.search.as_deref() {
            None => true,
            Some(term) => title.to_lowercase().contains(&term.to_lowercase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_literal_asc_sorts_ascending() {
        assert_eq!(SortOrder::from_param(Some("asc")), SortOrder::Ascending);
        assert_eq!(SortOrder::from_param(Some("desc")), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(Some("ASC")), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(Some("price")), SortOrder::Descending);
        assert_eq!(SortOrder::from_param(None), SortOrder::Descending);
    }

    #[test]
    fn test_title_match_is_case_insensitive() {
        let query = ServiceQuery {
            search: Some("eNgInE".to_string()),
            sort: SortOrder::default(),
        };

        assert!(query.matches_title("Engine Oil Change"));
        assert!(query.matches_title("Full engine diagnostic"));
        assert!(!query.matches_title("Wheel Alignment"));
    }

    #[test]
    fn test_absent_search_matches_everything() {
        let query = ServiceQuery::default();

        assert!(query.matches_title("Engine Oil Change"));
        assert!(query.matches_title(""));
    }

    #[test]
    fn test_empty_search_matches_everything() {
        let query = ServiceQuery {
            search: Some(String::new()),
            sort: SortOrder::default(),
        };

        assert!(query.matches_title("Wheel Alignment"));
    }
}
