use crate::config::ColumnConfig;
use crate::error::{LoadError, Result};

/// Canonical header form: spaces and periods become underscores, then the
/// whole name is lower-cased. `"Data.Yield"` → `"data_yield"`.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c == ' ' || c == '.' { '_' } else { c })
        .collect::<String>()
        .to_lowercase()
}

/// Where the year of a record comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearSource {
    /// A ready-made integer year column.
    Column(usize),
    /// A calendar date column the year is parsed out of.
    Date(usize),
}

/// Column indices of every canonical field within a normalized header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub source_country: usize,
    pub year: YearSource,
    pub latitude: usize,
    pub longitude: usize,
    pub yield_upper: usize,
    pub name: usize,
    pub yield_lower: Option<usize>,
}

impl ResolvedColumns {
    /// Indices claimed by typed fields; everything else is carried as extra.
    pub fn claimed(&self) -> Vec<usize> {
        let year = match self.year {
            YearSource::Column(i) | YearSource::Date(i) => i,
        };
        let mut out = vec![
            self.source_country,
            year,
            self.latitude,
            self.longitude,
            self.yield_upper,
            self.name,
        ];
        out.extend(self.yield_lower);
        out
    }
}

fn find(headers: &[String], candidates: &[String]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|c| headers.iter().position(|h| h == c))
}

fn require(headers: &[String], field: &'static str, candidates: &[String]) -> Result<usize> {
    find(headers, candidates).ok_or_else(|| LoadError::MissingColumn {
        field,
        candidates: candidates.to_vec(),
    })
}

/// Bind canonical fields to header positions, failing on the first
/// required field that has no match.
pub fn resolve(headers: &[String], config: &ColumnConfig) -> Result<ResolvedColumns> {
    let source_country = require(headers, "source_country", &config.source_country)?;

    let year = match find(headers, &config.year) {
        Some(i) => YearSource::Column(i),
        None => match find(headers, &config.date) {
            Some(i) => YearSource::Date(i),
            None => {
                let mut candidates = config.year.clone();
                candidates.extend(config.date.iter().cloned());
                return Err(LoadError::MissingColumn {
                    field: "year",
                    candidates,
                });
            }
        },
    };

    Ok(ResolvedColumns {
        source_country,
        year,
        latitude: require(headers, "latitude", &config.latitude)?,
        longitude: require(headers, "longitude", &config.longitude)?,
        yield_upper: require(headers, "yield_upper", &config.yield_upper)?,
        name: require(headers, "name", &config.name)?,
        yield_lower: find(headers, &config.yield_lower),
    })
}
