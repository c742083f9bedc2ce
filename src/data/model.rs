use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

/// Year span assumed when a dataset has no rows to observe one from.
pub const DEFAULT_YEAR_SPAN: (i32, i32) = (1945, 1998);

// ---------------------------------------------------------------------------
// Cells – raw text as found in the source
// ---------------------------------------------------------------------------

/// Cell texts that mean "no value". Matched exactly, case included, after
/// trimming surrounding whitespace; a blank cell is missing too.
pub const MISSING_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Source text of one cell, `None` when the cell is blank or a missing marker.
/// Present values are kept verbatim.
pub fn cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(raw.to_string())
    }
}

pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse().ok()
}

/// Whole-number year; `1950.0` counts, `1950.5` does not.
pub fn parse_year(text: &str) -> Option<i32> {
    let text = text.trim();
    if let Ok(year) = text.parse() {
        return Some(year);
    }
    let f: f64 = text.parse().ok()?;
    if f.is_finite() && f.fract() == 0.0 {
        i32::try_from(f as i64).ok()
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Explosion – one cleaned row
// ---------------------------------------------------------------------------

/// One test record after cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Explosion {
    pub name: String,
    pub source_country: String,
    pub year: i32,
    /// Yield bounds in kilotons.
    pub yield_lower: Option<f64>,
    pub yield_upper: f64,
    /// `None` when the source cell was present but not a usable coordinate.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Remaining columns under their normalized names, text unchanged.
    pub extra: BTreeMap<String, String>,
}

impl Explosion {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

// ---------------------------------------------------------------------------
// LoadReport – what cleaning did to the raw rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub rows_read: usize,
    /// Rows with at least one missing cell.
    pub dropped_incomplete: usize,
    /// Rows whose date could not be parsed into a year.
    pub dropped_bad_date: usize,
    /// Rows whose year, country, name or yield could not be interpreted.
    pub dropped_bad_value: usize,
    pub rows_kept: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of {} rows kept ({} incomplete, {} bad date, {} bad value)",
            self.rows_kept,
            self.rows_read,
            self.dropped_incomplete,
            self.dropped_bad_date,
            self.dropped_bad_value
        )
    }
}

// ---------------------------------------------------------------------------
// ExplosionDataset – the cleaned, immutable dataset
// ---------------------------------------------------------------------------

/// The cleaned dataset. Built once, then only ever read.
#[derive(Debug, Clone, Default)]
pub struct ExplosionDataset {
    pub records: Vec<Explosion>,
    /// Normalized header names in source order.
    pub column_names: Vec<String>,
    pub report: LoadReport,
}

impl ExplosionDataset {
    pub fn new(records: Vec<Explosion>, column_names: Vec<String>, report: LoadReport) -> Self {
        ExplosionDataset {
            records,
            column_names,
            report,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Observed (min, max) year, `None` for an empty dataset.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }

    /// Every country value present after cleaning, sorted.
    pub fn distinct_countries(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|r| r.source_country.clone())
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn explosion(country: &str, year: i32) -> Explosion {
        Explosion {
            name: format!("{country}-{year}"),
            source_country: country.to_string(),
            year,
            yield_lower: Some(0.0),
            yield_upper: 20.0,
            latitude: Some(37.0),
            longitude: Some(-116.0),
            extra: BTreeMap::new(),
        }
    }

    pub fn dataset(records: Vec<Explosion>) -> ExplosionDataset {
        let report = LoadReport {
            rows_read: records.len(),
            rows_kept: records.len(),
            ..LoadReport::default()
        };
        ExplosionDataset::new(records, Vec::new(), report)
    }

    /// The three-record toy dataset: (USA, 1950), (USSR, 1955), (USA, 1998).
    pub fn toy_dataset() -> ExplosionDataset {
        dataset(vec![
            explosion("USA", 1950),
            explosion("USSR", 1955),
            explosion("USA", 1998),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn missing_markers_match_exactly() {
        assert_eq!(cell(""), None);
        assert_eq!(cell("  "), None);
        assert_eq!(cell("NaN"), None);
        assert_eq!(cell(" N/A "), None);
        assert_eq!(cell("Null"), Some("Null".to_string()));
        assert_eq!(cell("NAN"), Some("NAN".to_string()));
        assert_eq!(cell("007"), Some("007".to_string()));
    }

    #[test]
    fn year_accepts_whole_floats_only() {
        assert_eq!(parse_year("1950"), Some(1950));
        assert_eq!(parse_year("1950.0"), Some(1950));
        assert_eq!(parse_year("1950.5"), None);
        assert_eq!(parse_year("x"), None);
        assert_eq!(parse_number(" -116.05 "), Some(-116.05));
    }

    #[test]
    fn bounds_and_countries() {
        let ds = toy_dataset();
        assert_eq!(ds.year_bounds(), Some((1950, 1998)));
        let countries: Vec<_> = ds.distinct_countries().into_iter().collect();
        assert_eq!(countries, vec!["USA".to_string(), "USSR".to_string()]);
        assert_eq!(ExplosionDataset::default().year_bounds(), None);
        assert!(ExplosionDataset::default().is_empty());
    }
}
