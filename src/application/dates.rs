// src/application/dates.rs
//
// Release date display

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;

use crate::integrations::tmdb::urls::TMDB_DATE_FORMAT;

pub const EMPTY_DATE: &str = "Empty date value";
pub const BAD_DATE: &str = "Bad date format";

/// Reformat a catalog release date (`yyyy-MM-dd`) with `display_format`
///
/// Never fails: an empty input gives [`EMPTY_DATE`], and an unreadable
/// date or display format gives [`BAD_DATE`].
pub fn format_release_date(date: &str, display_format: &str) -> String {
    let date = date.trim();
    if date.is_empty() {
        return EMPTY_DATE.to_string();
    }

    let Ok(parsed) = NaiveDate::parse_from_str(date, TMDB_DATE_FORMAT) else {
        return BAD_DATE.to_string();
    };

    let items: Vec<Item> = StrftimeItems::new(display_format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return BAD_DATE.to_string();
    }

    parsed.format_with_items(items.iter()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_display_format() {
        assert_eq!(format_release_date("2016-06-18", "%b %-d, %Y"), "Jun 18, 2016");
        assert_eq!(format_release_date("2016-12-09", "%b %-d, %Y"), "Dec 9, 2016");
    }

    #[test]
    fn test_other_display_format() {
        assert_eq!(format_release_date("2016-06-18", "%d-%m-%Y"), "18-06-2016");
    }

    #[test]
    fn test_empty_date() {
        assert_eq!(format_release_date("", "%Y"), EMPTY_DATE);
        assert_eq!(format_release_date("   ", "%Y"), EMPTY_DATE);
    }

    #[test]
    fn test_bad_date() {
        assert_eq!(format_release_date("June 2016", "%Y"), BAD_DATE);
        assert_eq!(format_release_date("2016-13-01", "%Y"), BAD_DATE);
        assert_eq!(format_release_date("2016-06-18", "%Q"), BAD_DATE);
    }
}
