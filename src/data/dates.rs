use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Date layouts tried in order. US month-first wins over day-first for
/// slashed dates.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y", "%Y%m%d"];

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

/// Parse a calendar date from any of the accepted layouts.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Year of a date cell. Falls back to a bare leading four-digit year
/// (`"1962"`, `"1962-xx"`) when no full layout matches.
pub fn year_from_date(s: &str) -> Option<i32> {
    if let Some(date) = parse_date(s) {
        return Some(date.year());
    }
    let s = s.trim();
    let head = s.get(..4)?;
    let rest = &s[4..];
    if head.chars().all(|c| c.is_ascii_digit())
        && rest.chars().next().map_or(true, |c| !c.is_ascii_digit())
    {
        head.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_layouts() {
        assert_eq!(year_from_date("1962-05-06"), Some(1962));
        assert_eq!(year_from_date("1962/05/06"), Some(1962));
        assert_eq!(year_from_date("05/06/1962"), Some(1962));
        assert_eq!(year_from_date("06.05.1962"), Some(1962));
        assert_eq!(year_from_date("19620506"), Some(1962));
        assert_eq!(year_from_date("1962-05-06 12:00:00"), Some(1962));
    }

    #[test]
    fn bare_year_fallback() {
        assert_eq!(year_from_date("1945"), Some(1945));
        assert_eq!(year_from_date("1945-??"), Some(1945));
        assert_eq!(year_from_date("19455"), None);
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(year_from_date("unknown"), None);
        assert_eq!(year_from_date(""), None);
        assert_eq!(year_from_date("13/45/1962"), None);
    }
}
