use std::collections::BTreeSet;
use std::sync::Arc;

use crate::color::ColorMap;
use crate::data::filter::{CountrySelection, FilterState, YearRange};
use crate::data::model::ExplosionDataset;
use crate::view::{render, ViewModel};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// One user's session, independent of rendering.
pub struct AppState {
    /// Cleaned dataset, shared read-only (None until a file is loaded).
    pub dataset: Option<Arc<ExplosionDataset>>,

    /// Current filter. Never mutated in place, only replaced.
    pub filter: FilterState,

    /// Output of the last recomputation.
    pub view: Option<ViewModel>,

    /// Country → colour, rebuilt per dataset.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            filter: FilterState::initial(&ExplosionDataset::default()),
            view: None,
            color_map: ColorMap::default(),
            status_message: None,
        }
    }
}

impl AppState {
    pub fn with_dataset(dataset: Arc<ExplosionDataset>) -> Self {
        let mut state = Self::default();
        state.set_dataset(dataset);
        state
    }

    /// Ingest a newly loaded dataset and reset the filter to its defaults.
    pub fn set_dataset(&mut self, dataset: Arc<ExplosionDataset>) {
        self.color_map = ColorMap::new(&dataset.distinct_countries());
        self.status_message = None;
        self.filter = FilterState::initial(&dataset);
        self.dataset = Some(dataset);
        self.refresh();
    }

    /// Observed year span of the loaded dataset.
    pub fn year_bounds(&self) -> YearRange {
        match &self.dataset {
            Some(ds) => YearRange::full(ds),
            None => self.filter.years,
        }
    }

    /// Countries currently selected, with `All` resolved.
    pub fn selected_countries(&self) -> BTreeSet<String> {
        match &self.dataset {
            Some(ds) => self.filter.countries.resolve(ds),
            None => BTreeSet::new(),
        }
    }

    /// Swap in a new filter and recompute the view.
    pub fn set_filter(&mut self, filter: FilterState) {
        if filter != self.filter {
            self.filter = filter;
            self.refresh();
        }
    }

    pub fn set_year_range(&mut self, years: YearRange) {
        self.set_filter(FilterState {
            years,
            countries: self.filter.countries.clone(),
        });
    }

    pub fn set_countries(&mut self, countries: CountrySelection) {
        self.set_filter(FilterState {
            years: self.filter.years,
            countries,
        });
    }

    /// Flip one country in or out of the selection.
    pub fn toggle_country(&mut self, country: &str) {
        let mut selected = self.selected_countries();
        if !selected.remove(country) {
            selected.insert(country.to_string());
        }
        self.set_countries(CountrySelection::Only(selected));
    }

    pub fn select_all_countries(&mut self) {
        if let Some(ds) = &self.dataset {
            let all = ds.distinct_countries();
            self.set_countries(CountrySelection::Only(all));
        }
    }

    pub fn select_no_countries(&mut self) {
        self.set_countries(CountrySelection::Only(BTreeSet::new()));
    }

    /// Recompute `view` from the current filter.
    pub fn refresh(&mut self) {
        self.view = self.dataset.as_ref().map(|ds| render(ds, &self.filter));
    }
}
