use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Headers as spelled in the published dataset, misspellings included.
const HEADERS: [&str; 12] = [
    "WEAPON SOURCE COUNTRY",
    "WEAPON DEPLOYMENT LOCATION",
    "Location.Cordinates.Latitude",
    "Location.Cordinates.Longitude",
    "Data.Yeild.Lower",
    "Data.Yeild.Upper",
    "Data.Purpose",
    "Data.Name",
    "Data.Type",
    "Date.Day",
    "Date.Month",
    "Date.Year",
];

/// (country, site, latitude, longitude, first year, last year, tests)
const PROGRAMMES: &[(&str, &str, f64, f64, i32, i32, usize)] = &[
    ("USA", "Nevada", 37.1, -116.05, 1951, 1992, 120),
    ("USA", "Enewetak", 11.3, 162.3, 1948, 1958, 25),
    ("USSR", "Semi Palatinsk", 50.0, 78.0, 1949, 1989, 90),
    ("USSR", "Novaya Zemlya", 73.4, 54.9, 1955, 1990, 40),
    ("UK", "Christmas Is", 1.7, -157.2, 1957, 1958, 9),
    ("FRANCE", "Mururoa", -21.8, -138.9, 1966, 1996, 45),
    ("CHINA", "Lop Nor", 41.5, 88.5, 1964, 1996, 30),
    ("INDIA", "Pokhran", 27.1, 71.8, 1974, 1998, 4),
    ("PAKIST", "Chagai", 28.8, 64.9, 1998, 1998, 2),
];

const PURPOSES: [&str; 4] = ["Wr", "We", "Pne", "Se"];
const TYPES: [&str; 4] = ["Shaft", "Tunnel", "Atmosph", "Barge"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.next_u64() % (hi - lo + 1) as u64) as i64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.next_u64() as usize % items.len()]
    }
}

/// One generated row; `None` marks a blank cell.
fn generate_rows(rng: &mut SimpleRng) -> Vec<Vec<Option<String>>> {
    let mut rows = Vec::new();
    for &(country, site, lat, lon, first, last, tests) in PROGRAMMES {
        for i in 0..tests {
            let n = rows.len();
            // log-uniform yields between 0.1 kt and ~5 Mt
            let upper = 10f64.powf(-1.0 + 4.7 * rng.next_f64());
            let lower = upper * (0.5 + 0.5 * rng.next_f64());
            let latitude = if n % 37 == 36 {
                "unknown".to_string()
            } else {
                format!("{:.3}", lat + rng.next_f64() - 0.5)
            };
            let purpose = if n % 25 == 24 {
                None
            } else {
                Some(rng.pick(&PURPOSES).to_string())
            };

            rows.push(vec![
                Some(country.to_string()),
                Some(site.to_string()),
                Some(latitude),
                Some(format!("{:.3}", lon + rng.next_f64() - 0.5)),
                Some(format!("{lower:.2}")),
                Some(format!("{upper:.2}")),
                purpose,
                Some(format!("{site} {}", i + 1)),
                Some(rng.pick(&TYPES).to_string()),
                Some(rng.range(1, 28).to_string()),
                Some(rng.range(1, 12).to_string()),
                Some(rng.range(first as i64, last as i64).to_string()),
            ]);
        }
    }
    rows
}

fn write_csv(path: &str, rows: &[Vec<Option<String>>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(HEADERS)?;
    for row in rows {
        writer.write_record(row.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, rows: &[Vec<Option<String>>]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        HEADERS
            .iter()
            .map(|h| Field::new(*h, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));
    let columns: Vec<ArrayRef> = (0..HEADERS.len())
        .map(|col| {
            let values: StringArray = rows.iter().map(|row| row[col].as_deref()).collect();
            Arc::new(values) as ArrayRef
        })
        .collect();
    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng);

    write_csv("sample_explosions.csv", &rows)?;
    write_parquet("sample_explosions.parquet", &rows)?;

    println!(
        "Wrote {} tests to sample_explosions.csv and sample_explosions.parquet",
        rows.len()
    );
    Ok(())
}
