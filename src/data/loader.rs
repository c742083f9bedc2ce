use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::columns::{normalize_column_name, resolve, ResolvedColumns, YearSource};
use super::dates::year_from_date;
use super::model::{cell, parse_number, parse_year, Explosion, ExplosionDataset, LoadReport};
use crate::config::ColumnConfig;
use crate::error::{LoadError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a dataset, binding fields through `config`.
///
/// Supported formats (by extension):
/// * `.csv` / `.txt` – comma-delimited text with a header row
/// * `.tsv`          – tab-delimited text
/// * `.json`         – `[{ "Data.Name": "...", ... }, ...]`
/// * `.parquet`      – flat columns of any primitive type
pub fn load_file_with(path: &Path, config: &ColumnConfig) -> Result<ExplosionDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    log::info!("Loading {} as .{ext}", path.display());

    let raw = match ext.as_str() {
        "csv" | "txt" => read_delimited(open(path)?, b',')?,
        "tsv" => read_delimited(open(path)?, b'\t')?,
        "json" => read_json(open(path)?)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    clean(raw, config)
}

fn open(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// RawTable – the uncleaned grid every reader produces
// ---------------------------------------------------------------------------

/// Headers exactly as found in the source plus one cell per column.
/// A cell is the source text verbatim, or `None` when missing
/// (see [`cell`]).
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

/// Delimited text. Short rows are padded with missing cells rather than
/// rejected.
pub fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row = (0..headers.len())
            .map(|i| record.get(i).and_then(cell))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

/// Records-oriented JSON (`df.to_json(orient='records')`). Keys are taken
/// in first-seen order; a key absent from an object is a missing cell.
pub fn read_json<R: Read>(reader: R) -> Result<RawTable> {
    let root: JsonValue = serde_json::from_reader(reader)?;
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            headers
                .iter()
                .map(|h| obj.get(h).and_then(json_cell))
                .collect()
        })
        .collect();

    Ok(RawTable { headers, rows })
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) => cell(s),
        other => Some(other.to_string()),
    }
}

/// Flat Parquet columns. Every column is cast to text, so numeric, boolean
/// and date columns all land in the same cell model.
pub fn read_parquet(path: &Path) -> Result<RawTable> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch in reader {
        let batch = batch?;
        let mut text_columns = Vec::with_capacity(batch.num_columns());
        for col in batch.columns() {
            text_columns.push(arrow::compute::cast(col, &DataType::Utf8)?);
        }
        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(text_columns.len());
            for col in &text_columns {
                let strings = col.as_string_opt::<i32>().ok_or_else(|| {
                    LoadError::Malformed(format!("column cast to {:?}", col.data_type()))
                })?;
                cells.push(if strings.is_null(row) {
                    None
                } else {
                    cell(strings.value(row))
                });
            }
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Turn a raw table into the cleaned dataset.
///
/// Order: normalize headers, bind canonical columns, drop rows with any
/// missing cell, derive the year (dropping unparseable dates), then parse
/// typed fields (dropping rows with uninterpretable required values).
/// Text fields keep their source spelling.
pub fn clean(raw: RawTable, config: &ColumnConfig) -> Result<ExplosionDataset> {
    let headers: Vec<String> = raw.headers.iter().map(|h| normalize_column_name(h)).collect();
    let cols = resolve(&headers, config)?;
    let claimed = cols.claimed();

    let mut report = LoadReport {
        rows_read: raw.rows.len(),
        ..LoadReport::default()
    };
    let mut records = Vec::with_capacity(raw.rows.len());

    for row in &raw.rows {
        let Some(row) = row
            .iter()
            .map(|c| c.as_deref())
            .collect::<Option<Vec<&str>>>()
            .filter(|r| r.len() >= headers.len())
        else {
            report.dropped_incomplete += 1;
            continue;
        };
        let year = match cols.year {
            YearSource::Column(i) => parse_year(row[i]),
            YearSource::Date(i) => match year_from_date(row[i]) {
                Some(y) => Some(y),
                None => {
                    report.dropped_bad_date += 1;
                    continue;
                }
            },
        };
        let Some(record) =
            year.and_then(|year| to_explosion(&row, year, &cols, &headers, &claimed))
        else {
            report.dropped_bad_value += 1;
            continue;
        };
        records.push(record);
    }
    report.rows_kept = records.len();

    if report.dropped_bad_date > 0 {
        log::warn!("{} rows had an unparseable date and were dropped", report.dropped_bad_date);
    }

    let dataset = ExplosionDataset::new(records, headers, report);
    log::info!(
        "Cleaned dataset: {report}; years {:?}, {} countries",
        dataset.year_bounds(),
        dataset.distinct_countries().len()
    );
    Ok(dataset)
}

fn coordinate(text: &str, limit: f64) -> Option<f64> {
    parse_number(text).filter(|v| v.is_finite() && v.abs() <= limit)
}

fn to_explosion(
    row: &[&str],
    year: i32,
    cols: &ResolvedColumns,
    headers: &[String],
    claimed: &[usize],
) -> Option<Explosion> {
    let source_country = row[cols.source_country].trim();
    if source_country.is_empty() {
        return None;
    }
    let yield_upper = parse_number(row[cols.yield_upper]).filter(|v| v.is_finite())?;

    let extra: BTreeMap<String, String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| !claimed.contains(i))
        .map(|(i, h)| (h.clone(), row[i].to_string()))
        .collect();

    Some(Explosion {
        name: row[cols.name].to_string(),
        source_country: source_country.to_string(),
        year,
        yield_lower: cols.yield_lower.and_then(|i| parse_number(row[i])),
        yield_upper,
        latitude: coordinate(row[cols.latitude], 90.0),
        longitude: coordinate(row[cols.longitude], 180.0),
        extra,
    })
}
