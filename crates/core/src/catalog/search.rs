//! Storefront search over catalog records.
//!
//! A term matches when it is a case-insensitive substring of the record's
//! name, or a substring of its SKU or release year. An empty term matches
//! everything.

use ecollecto_catalog_api::{FirstDayCover, Stamp};

/// A normalized, lowercased search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    /// `None` and blank input both mean "no filter".
    pub fn from_query(raw: Option<&str>) -> Option<Self> {
        raw.map(Self::new).filter(|term| !term.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn in_text(&self, text: &str) -> bool {
        text.to_lowercase().contains(&self.0)
    }

    fn in_number(&self, number: impl ToString) -> bool {
        number.to_string().contains(&self.0)
    }
}

pub fn matches_stamp(stamp: &Stamp, term: &SearchTerm) -> bool {
    term.is_empty()
        || term.in_text(&stamp.name)
        || stamp.sku.is_some_and(|sku| term.in_number(sku))
        || term.in_number(stamp.release.year)
}

pub fn matches_first_day_cover(cover: &FirstDayCover, term: &SearchTerm) -> bool {
    term.is_empty() || term.in_text(&cover.name) || term.in_number(cover.release.year)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecollecto_catalog_api::{FirstDayCoverRelease, StampRelease};

    fn stamp(name: &str, sku: Option<i64>, year: i32) -> Stamp {
        Stamp {
            id: "s1".to_string(),
            name: name.to_string(),
            description: String::new(),
            sku,
            meta: Default::default(),
            release: StampRelease {
                year,
                date: String::new(),
                print_quantity: None,
                is_mass_issue: None,
                is_available: None,
            },
            images: Default::default(),
        }
    }

    fn cover(name: &str, year: i32) -> FirstDayCover {
        FirstDayCover {
            postmark_id: "p1".to_string(),
            envelope_id: "e1".to_string(),
            name: name.to_string(),
            description: String::new(),
            postmark_sku: Some(5001),
            envelope_sku: None,
            designer: None,
            release: FirstDayCoverRelease {
                year,
                date: String::new(),
                print_quantity: None,
            },
            images: Default::default(),
        }
    }

    #[test]
    fn test_stamp_matches_name_case_insensitively() {
        let s = stamp("Кримський міст", Some(1234), 2022);
        assert!(matches_stamp(&s, &SearchTerm::new("КРИМ")));
        assert!(matches_stamp(&s, &SearchTerm::new("  міст ")));
        assert!(!matches_stamp(&s, &SearchTerm::new("корабель")));
    }

    #[test]
    fn test_stamp_matches_sku_and_year_substrings() {
        let s = stamp("Ship", Some(987654), 2022);
        assert!(matches_stamp(&s, &SearchTerm::new("7654")));
        assert!(matches_stamp(&s, &SearchTerm::new("202")));
        assert!(!matches_stamp(&stamp("Ship", None, 2022), &SearchTerm::new("7654")));
    }

    #[test]
    fn test_cover_ignores_sku() {
        let c = cover("Day of Independence", 2021);
        assert!(matches_first_day_cover(&c, &SearchTerm::new("independence")));
        assert!(matches_first_day_cover(&c, &SearchTerm::new("2021")));
        assert!(!matches_first_day_cover(&c, &SearchTerm::new("5001")));
    }

    #[test]
    fn test_blank_query_is_no_filter() {
        assert_eq!(SearchTerm::from_query(None), None);
        assert_eq!(SearchTerm::from_query(Some("   ")), None);
        assert_eq!(
            SearchTerm::from_query(Some(" Ship ")).map(|t| t.as_str().to_string()),
            Some("ship".to_string())
        );
        assert!(matches_stamp(&stamp("x", None, 1), &SearchTerm::default()));
    }
}
