use std::path::Path;

use serde::Deserialize;

use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Column mapping: canonical field → accepted header spellings
// ---------------------------------------------------------------------------

/// Header spellings accepted for each canonical field.
///
/// Every entry is compared against *normalized* headers (see
/// [`normalize_column_name`](crate::data::columns::normalize_column_name)),
/// first match wins. The defaults cover the published dataset, misspellings
/// included, as well as plain names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub source_country: Vec<String>,
    pub year: Vec<String>,
    pub date: Vec<String>,
    pub latitude: Vec<String>,
    pub longitude: Vec<String>,
    pub yield_lower: Vec<String>,
    pub yield_upper: Vec<String>,
    pub name: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            source_country: names(&["weapon_source_country", "source_country", "country"]),
            year: names(&["date_year", "year"]),
            date: names(&["date"]),
            latitude: names(&[
                "location_cordinates_latitude",
                "location_coordinates_latitude",
                "latitude",
                "lat",
            ]),
            longitude: names(&[
                "location_cordinates_longitude",
                "location_coordinates_longitude",
                "longitude",
                "lon",
            ]),
            yield_lower: names(&["data_yeild_lower", "data_yield_lower", "yield_lower"]),
            yield_upper: names(&["data_yeild_upper", "data_yield_upper", "yield_upper"]),
            name: names(&["data_name", "name"]),
        }
    }
}

impl ColumnConfig {
    /// Read a mapping from a JSON object. Missing keys keep their defaults.
    ///
    /// ```json
    /// { "source_country": ["origin"], "yield_upper": ["max_kt"] }
    /// ```
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text).map_err(|e| LoadError::ColumnConfig {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_override_keeps_other_defaults() {
        let cfg = ColumnConfig::from_json_str(r#"{ "yield_upper": ["max_kt"] }"#).unwrap();
        assert_eq!(cfg.yield_upper, vec!["max_kt".to_string()]);
        assert_eq!(cfg.latitude, ColumnConfig::default().latitude);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ColumnConfig::from_json_str(r#"{ "yeild": ["x"] }"#).is_err());
    }

    #[test]
    fn unreadable_mapping_file_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[1, 2]").unwrap();
        let err = ColumnConfig::from_path(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::ColumnConfig { .. }));
    }
}
