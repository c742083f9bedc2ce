use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::aggregate::{
    counts_by_country, counts_by_year, geo_centroid, geo_points, yield_series, GeoPoint,
    YieldPoint,
};
use crate::data::filter::FilterState;
use crate::data::model::{Explosion, ExplosionDataset};

pub const NO_COUNTRIES_ADVISORY: &str =
    "Please select at least one country to view the visualizations.";

// ---------------------------------------------------------------------------
// ViewModel – everything the presentation layer draws
// ---------------------------------------------------------------------------

/// Result of one recomputation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewModel {
    /// The user deselected every country; nothing is aggregated.
    NoCountriesSelected { advisory: String },
    Populated(Dashboard),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub filter: FilterState,
    pub record_count: usize,
    pub rows: Vec<Explosion>,
    pub counts_by_year: BTreeMap<i32, usize>,
    pub counts_by_country: Vec<(String, usize)>,
    pub yield_series: Vec<YieldPoint>,
    pub geo_points: Vec<GeoPoint>,
    /// Mean `(latitude, longitude)` of `geo_points`, for centring the map.
    pub geo_centroid: Option<(f64, f64)>,
}

impl ViewModel {
    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            ViewModel::Populated(d) => Some(d),
            ViewModel::NoCountriesSelected { .. } => None,
        }
    }

    pub fn record_count(&self) -> usize {
        self.dashboard().map_or(0, |d| d.record_count)
    }
}

/// Filter `dataset` by `state` and derive every visualization input.
pub fn render(dataset: &ExplosionDataset, state: &FilterState) -> ViewModel {
    if state.countries.is_explicitly_empty() {
        log::debug!("No countries selected, skipping aggregation");
        return ViewModel::NoCountriesSelected {
            advisory: NO_COUNTRIES_ADVISORY.to_string(),
        };
    }

    let subset = state.apply(dataset);
    log::debug!("Filter {state}: {} of {} records", subset.len(), dataset.len());

    let geo_points = geo_points(&subset);
    ViewModel::Populated(Dashboard {
        filter: state.clone(),
        record_count: subset.len(),
        rows: subset.to_records(),
        counts_by_year: counts_by_year(&subset),
        counts_by_country: counts_by_country(&subset),
        yield_series: yield_series(&subset),
        geo_centroid: geo_centroid(&geo_points),
        geo_points,
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::filter::{CountrySelection, YearRange};
    use crate::data::model::fixtures::toy_dataset;

    #[test]
    fn empty_selection_short_circuits() {
        let ds = toy_dataset();
        let state = FilterState {
            years: YearRange::full(&ds),
            countries: CountrySelection::Only(BTreeSet::new()),
        };
        let view = render(&ds, &state);
        assert!(matches!(view, ViewModel::NoCountriesSelected { .. }));
        assert_eq!(view.record_count(), 0);
    }

    #[test]
    fn initial_state_shows_everything() {
        let ds = toy_dataset();
        let view = render(&ds, &FilterState::initial(&ds));
        let dash = view.dashboard().unwrap();
        assert_eq!(dash.record_count, 3);
        assert_eq!(dash.rows.len(), 3);
        assert_eq!(dash.counts_by_country[0], ("USA".to_string(), 2));
        assert_eq!(dash.geo_points.len(), 3);
        assert_eq!(dash.geo_centroid, Some((37.0, -116.0)));
    }

    #[test]
    fn no_matching_rows_is_still_populated() {
        let ds = toy_dataset();
        let state = FilterState {
            years: YearRange::new(1960, 1970),
            countries: CountrySelection::only(["USSR"]),
        };
        let dash = render(&ds, &state);
        let dash = dash.dashboard().unwrap();
        assert_eq!(dash.record_count, 0);
        assert!(dash.counts_by_year.is_empty());
        assert_eq!(dash.geo_centroid, None);
    }

    #[test]
    fn serializes_with_status_tag() {
        let ds = toy_dataset();
        let state = FilterState {
            years: YearRange::full(&ds),
            countries: CountrySelection::Only(BTreeSet::new()),
        };
        let json = serde_json::to_value(render(&ds, &state)).unwrap();
        assert_eq!(json["status"], "no_countries_selected");

        let json = serde_json::to_value(render(&ds, &FilterState::initial(&ds))).unwrap();
        assert_eq!(json["status"], "populated");
        assert_eq!(json["record_count"], 3);
        assert_eq!(json["counts_by_year"]["1950"], 1);
    }
}
