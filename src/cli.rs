use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Parser;

use crate::config::ColumnConfig;
use crate::data::filter::{CountrySelection, FilterState, YearRange};
use crate::data::model::ExplosionDataset;
use crate::error::Result;
use crate::view::{self, ViewModel};

#[derive(Debug, Parser)]
#[command(name = "fallout-explorer", version, about = "Nuclear explosions data explorer")]
pub struct CliArgs {
    /// Dataset file (.csv, .tsv, .json or .parquet)
    #[arg(long, value_name = "PATH", default_value = "nuclear_explosions.csv")]
    pub data: PathBuf,

    /// JSON file overriding the accepted header spellings
    #[arg(long, value_name = "PATH")]
    pub columns: Option<PathBuf>,

    /// Print one computed view as JSON and exit
    #[arg(long)]
    pub headless: bool,

    /// First year to include (headless)
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last year to include (headless)
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i32>,

    /// Country to include, repeatable (headless; default: all)
    #[arg(long = "country", value_name = "NAME", conflicts_with = "no_countries")]
    pub countries: Vec<String>,

    /// Select no country at all (headless)
    #[arg(long)]
    pub no_countries: bool,

    /// Include filtered rows in headless output
    #[arg(long)]
    pub rows: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl CliArgs {
    /// Filter requested on the command line; unset bounds fall back to the
    /// dataset's observed span.
    pub fn filter_state(&self, dataset: &ExplosionDataset) -> FilterState {
        let full = YearRange::full(dataset);
        let countries = if self.no_countries {
            CountrySelection::Only(BTreeSet::new())
        } else if self.countries.is_empty() {
            CountrySelection::All
        } else {
            CountrySelection::only(self.countries.iter().cloned())
        };
        FilterState {
            years: YearRange::new(self.from.unwrap_or(full.start), self.to.unwrap_or(full.end)),
            countries,
        }
    }

    /// Header spellings from `--columns`, or the built-in defaults.
    pub fn column_config(&self) -> Result<ColumnConfig> {
        match &self.columns {
            Some(path) => ColumnConfig::from_path(path),
            None => Ok(ColumnConfig::default()),
        }
    }

    /// The view printed by `--headless`. Rows are left out unless `--rows`.
    pub fn headless_view(&self, dataset: &ExplosionDataset) -> ViewModel {
        let mut view = view::render(dataset, &self.filter_state(dataset));
        if !self.rows {
            if let ViewModel::Populated(dash) = &mut view {
                dash.rows.clear();
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::toy_dataset;

    #[test]
    fn defaults_to_full_span_and_all_countries() {
        let args = CliArgs::parse_from(["fallout-explorer"]);
        assert_eq!(args.data, PathBuf::from("nuclear_explosions.csv"));
        let state = args.filter_state(&toy_dataset());
        assert_eq!(state, FilterState::initial(&toy_dataset()));
    }

    #[test]
    fn repeated_country_flags_build_a_selection() {
        let args = CliArgs::parse_from([
            "fallout-explorer",
            "--from",
            "1945",
            "--to",
            "1960",
            "--country",
            "USA",
            "--country",
            "UK",
        ]);
        let state = args.filter_state(&toy_dataset());
        assert_eq!(state.years, YearRange::new(1945, 1960));
        assert_eq!(state.countries, CountrySelection::only(["UK", "USA"]));
    }

    #[test]
    fn no_countries_is_explicitly_empty() {
        let args = CliArgs::parse_from(["fallout-explorer", "--no-countries"]);
        assert!(args.filter_state(&toy_dataset()).countries.is_explicitly_empty());
        let conflicting =
            CliArgs::try_parse_from(["fallout-explorer", "--no-countries", "--country", "USA"]);
        assert!(conflicting.is_err());
    }

    #[test]
    fn headless_view_omits_rows_unless_asked() {
        let ds = toy_dataset();
        let args = CliArgs::parse_from(["fallout-explorer", "--headless", "--country", "USA"]);
        let ViewModel::Populated(dash) = args.headless_view(&ds) else {
            panic!("expected a populated view");
        };
        assert_eq!(dash.record_count, 2);
        assert!(dash.rows.is_empty());

        let args = CliArgs::parse_from(["fallout-explorer", "--headless", "--rows"]);
        let ViewModel::Populated(dash) = args.headless_view(&ds) else {
            panic!("expected a populated view");
        };
        assert_eq!(dash.rows.len(), 3);
    }

    #[test]
    fn headless_view_reports_empty_selection() {
        let args = CliArgs::parse_from(["fallout-explorer", "--headless", "--no-countries"]);
        let json = serde_json::to_value(args.headless_view(&toy_dataset())).unwrap();
        assert_eq!(json["status"], "no_countries_selected");
    }

    #[test]
    fn columns_flag_loads_a_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("columns.json");
        std::fs::write(&path, r#"{ "source_country": ["origin"] }"#).unwrap();

        let args = CliArgs::parse_from(["fallout-explorer", "--columns", path.to_str().unwrap()]);
        let config = args.column_config().unwrap();
        assert_eq!(config.source_country, vec!["origin".to_string()]);
        assert_eq!(config.year, ColumnConfig::default().year);

        let none = CliArgs::parse_from(["fallout-explorer"]);
        assert_eq!(none.column_config().unwrap(), ColumnConfig::default());

        std::fs::write(&path, r#"{ "country": ["origin"] }"#).unwrap();
        assert!(args.column_config().is_err());
    }
}
