/// Data layer: loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  raw table → normalize headers → drop incomplete rows
///   └──────────┘   → derive year → ExplosionDataset (immutable)
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterState (years, countries) → Subset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  per-year, per-country, yield series, geo points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod columns;
pub mod dates;
pub mod filter;
pub mod loader;
pub mod model;
