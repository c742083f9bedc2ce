use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use super::model::{Explosion, ExplosionDataset, DEFAULT_YEAR_SPAN};

// ---------------------------------------------------------------------------
// Filter state: year range + country selection
// ---------------------------------------------------------------------------

/// Inclusive year bounds. A range with `start > end` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Self {
        YearRange { start, end }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// The observed span of `dataset`, or the historical default when empty.
    pub fn full(dataset: &ExplosionDataset) -> Self {
        let (start, end) = dataset.year_bounds().unwrap_or(DEFAULT_YEAR_SPAN);
        YearRange { start, end }
    }
}

/// Which countries to keep.
///
/// `All` is "no selection made yet" and only ever used as the initial
/// default. `Only` is an explicit choice, and `Only` of an empty set keeps
/// no rows at all.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountrySelection {
    #[default]
    All,
    Only(BTreeSet<String>),
}

impl CountrySelection {
    pub fn only<I, S>(countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CountrySelection::Only(countries.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, country: &str) -> bool {
        match self {
            CountrySelection::All => true,
            CountrySelection::Only(set) => set.contains(country),
        }
    }

    /// An explicit selection with nothing in it.
    pub fn is_explicitly_empty(&self) -> bool {
        matches!(self, CountrySelection::Only(set) if set.is_empty())
    }

    /// Concrete set of selected countries, resolving `All` against `dataset`.
    pub fn resolve(&self, dataset: &ExplosionDataset) -> BTreeSet<String> {
        match self {
            CountrySelection::All => distinct_countries(dataset),
            CountrySelection::Only(set) => set.clone(),
        }
    }
}

/// The per-session filter. Replaced wholesale on every interaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub years: YearRange,
    pub countries: CountrySelection,
}

impl FilterState {
    /// Full observed year span, every country.
    pub fn initial(dataset: &ExplosionDataset) -> Self {
        FilterState {
            years: YearRange::full(dataset),
            countries: CountrySelection::All,
        }
    }

    pub fn apply<'a>(&self, dataset: &'a ExplosionDataset) -> Subset<'a> {
        filter(dataset, self.years, &self.countries)
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "years {}..={}, ", self.years.start, self.years.end)?;
        match &self.countries {
            CountrySelection::All => write!(f, "all countries"),
            CountrySelection::Only(set) => write!(f, "{} countries", set.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// Subset: the filtered view over a dataset
// ---------------------------------------------------------------------------

/// Rows of a dataset that passed a filter, in dataset order.
#[derive(Debug, Clone)]
pub struct Subset<'a> {
    dataset: &'a ExplosionDataset,
    indices: Vec<usize>,
}

impl<'a> Subset<'a> {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Explosion> + '_ {
        let records = &self.dataset.records;
        self.indices.iter().map(move |&i| &records[i])
    }

    pub fn to_records(&self) -> Vec<Explosion> {
        self.iter().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Every country value present in the cleaned dataset.
pub fn distinct_countries(dataset: &ExplosionDataset) -> BTreeSet<String> {
    dataset.distinct_countries()
}

/// Rows whose year lies in `years` **and** whose country is selected.
pub fn filter<'a>(
    dataset: &'a ExplosionDataset,
    years: YearRange,
    countries: &CountrySelection,
) -> Subset<'a> {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| years.contains(r.year) && countries.contains(&r.source_country))
        .map(|(i, _)| i)
        .collect();
    Subset { dataset, indices }
}

#[cfg(test)]
impl<'a> Subset<'a> {
    /// Every row of `dataset`.
    pub(crate) fn all(dataset: &'a ExplosionDataset) -> Self {
        Subset {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    pub(crate) fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{dataset, explosion, toy_dataset};

    fn wide_dataset() -> ExplosionDataset {
        dataset(vec![
            explosion("USA", 1945),
            explosion("USA", 1962),
            explosion("USSR", 1949),
            explosion("USSR", 1962),
            explosion("UK", 1952),
            explosion("FRANCE", 1960),
            explosion("CHINA", 1964),
            explosion("INDIA", 1974),
            explosion("PAKIST", 1998),
        ])
    }

    #[test]
    fn toy_scenario() {
        let ds = toy_dataset();
        let subset = filter(&ds, YearRange::new(1945, 1960), &CountrySelection::only(["USA"]));
        let names: Vec<_> = subset.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["USA-1950"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = wide_dataset();
        let sel = CountrySelection::only(["USA", "USSR"]);
        let a = filter(&ds, YearRange::new(1950, 1970), &sel);
        let b = filter(&ds, YearRange::new(1950, 1970), &sel);
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = wide_dataset();
        let years = YearRange::new(1950, 1970);
        let sel = CountrySelection::only(["USA", "USSR", "CHINA"]);
        let subset = filter(&ds, years, &sel);

        for r in subset.iter() {
            assert!(years.contains(r.year) && sel.contains(&r.source_country));
        }
        for (i, r) in ds.records.iter().enumerate() {
            if !subset.indices().contains(&i) {
                assert!(!years.contains(r.year) || !sel.contains(&r.source_country));
            }
        }
        assert_eq!(subset.len(), 3);
    }

    #[test]
    fn explicit_empty_selection_keeps_nothing() {
        let ds = wide_dataset();
        let sel = CountrySelection::Only(BTreeSet::new());
        assert!(sel.is_explicitly_empty());
        assert!(filter(&ds, YearRange::full(&ds), &sel).is_empty());
    }

    #[test]
    fn all_countries_and_full_span_is_identity() {
        let ds = wide_dataset();
        let sel = CountrySelection::Only(distinct_countries(&ds));
        let subset = filter(&ds, YearRange::full(&ds), &sel);
        assert_eq!(subset.len(), ds.len());

        let initial = FilterState::initial(&ds).apply(&ds);
        assert_eq!(initial.indices(), Subset::all(&ds).indices());
    }

    #[test]
    fn year_bounds_are_inclusive_and_inverted_ranges_are_empty() {
        let ds = wide_dataset();
        let edge = filter(&ds, YearRange::new(1962, 1962), &CountrySelection::All);
        assert_eq!(edge.len(), 2);
        let inverted = filter(&ds, YearRange::new(1970, 1950), &CountrySelection::All);
        assert!(inverted.is_empty());
    }

    #[test]
    fn empty_dataset_uses_default_span() {
        let ds = ExplosionDataset::default();
        assert_eq!(YearRange::full(&ds), YearRange::new(1945, 1998));
    }
}
