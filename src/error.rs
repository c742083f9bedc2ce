use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while turning a file on disk into an
/// [`ExplosionDataset`](crate::data::model::ExplosionDataset).
///
/// All variants are fatal at startup: the dashboard has nothing to show
/// without its dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed delimited text: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed Parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("unreadable Arrow batch: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("required column '{field}' not found (looked for: {})", .candidates.join(", "))]
    MissingColumn {
        field: &'static str,
        candidates: Vec<String>,
    },

    #[error("malformed input: {0}")]
    Malformed(String),

    #[error("invalid column mapping {path}: {reason}")]
    ColumnConfig { path: PathBuf, reason: String },
}

pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_column_lists_candidates() {
        let err = LoadError::MissingColumn {
            field: "latitude",
            candidates: vec!["latitude".into(), "lat".into()],
        };
        assert_eq!(
            err.to_string(),
            "required column 'latitude' not found (looked for: latitude, lat)"
        );
    }
}
