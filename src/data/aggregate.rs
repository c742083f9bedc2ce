use std::collections::BTreeMap;

use serde::Serialize;

use super::filter::Subset;

/// One point of the yield-vs-year scatter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YieldPoint {
    pub year: i32,
    pub yield_upper: f64,
}

/// One plottable test site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub country: String,
    pub name: String,
}

/// Explosions per year, ascending.
pub fn counts_by_year(subset: &Subset<'_>) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for r in subset.iter() {
        *counts.entry(r.year).or_insert(0) += 1;
    }
    counts
}

/// Explosions per country, most-tested first. Ties go alphabetically.
pub fn counts_by_country(subset: &Subset<'_>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for r in subset.iter() {
        *counts.entry(r.source_country.as_str()).or_insert(0) += 1;
    }
    let mut out: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(country, n)| (country.to_string(), n))
        .collect();
    // stable sort keeps the alphabetical order among equal counts
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// `(year, yield_upper)` per record, in subset order.
pub fn yield_series(subset: &Subset<'_>) -> Vec<YieldPoint> {
    subset
        .iter()
        .map(|r| YieldPoint {
            year: r.year,
            yield_upper: r.yield_upper,
        })
        .collect()
}

/// Records with both coordinates, in subset order.
pub fn geo_points(subset: &Subset<'_>) -> Vec<GeoPoint> {
    subset
        .iter()
        .filter_map(|r| {
            let (latitude, longitude) = r.coordinates()?;
            Some(GeoPoint {
                latitude,
                longitude,
                country: r.source_country.clone(),
                name: r.name.clone(),
            })
        })
        .collect()
}

/// Mean position of `points` as `(latitude, longitude)`.
pub fn geo_centroid(points: &[GeoPoint]) -> Option<(f64, f64)> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.latitude).sum::<f64>() / n;
    let lon = points.iter().map(|p| p.longitude).sum::<f64>() / n;
    Some((lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter, CountrySelection, YearRange};
    use crate::data::model::fixtures::{dataset, explosion, toy_dataset};

    #[test]
    fn usa_counts_by_year() {
        let ds = toy_dataset();
        let usa = filter(&ds, YearRange::full(&ds), &CountrySelection::only(["USA"]));
        let counts = counts_by_year(&usa);
        assert_eq!(counts, BTreeMap::from([(1950, 1), (1998, 1)]));
    }

    #[test]
    fn country_counts_are_descending_with_alphabetical_ties() {
        let ds = dataset(vec![
            explosion("UK", 1952),
            explosion("USSR", 1955),
            explosion("USA", 1950),
            explosion("USA", 1951),
            explosion("FRANCE", 1960),
        ]);
        let counts = counts_by_country(&Subset::all(&ds));
        let order: Vec<_> = counts.iter().map(|(c, n)| (c.as_str(), *n)).collect();
        assert_eq!(order, vec![("USA", 2), ("FRANCE", 1), ("UK", 1), ("USSR", 1)]);
    }

    #[test]
    fn totals_are_preserved() {
        let ds = toy_dataset();
        let subset = Subset::all(&ds);
        let by_year: usize = counts_by_year(&subset).values().sum();
        let by_country: usize = counts_by_country(&subset).iter().map(|(_, n)| n).sum();
        assert_eq!(by_year, subset.len());
        assert_eq!(by_country, subset.len());
    }

    #[test]
    fn yield_series_follows_subset_order() {
        let ds = toy_dataset();
        let series = yield_series(&Subset::all(&ds));
        let years: Vec<_> = series.iter().map(|p| p.year).collect();
        assert_eq!(years, vec![1950, 1955, 1998]);
    }

    #[test]
    fn geo_points_skip_missing_coordinates() {
        let mut no_lat = explosion("FRANCE", 1960);
        no_lat.latitude = None;
        let ds = dataset(vec![explosion("USA", 1950), no_lat]);
        let subset = Subset::all(&ds);
        let points = geo_points(&subset);
        assert_eq!(points.len(), 1);
        assert!(points.len() < subset.len());
        assert_eq!(points[0].country, "USA");

        let complete = toy_dataset();
        assert_eq!(geo_points(&Subset::all(&complete)).len(), complete.len());
    }

    #[test]
    fn centroid_is_the_mean() {
        let points = vec![
            GeoPoint {
                latitude: 10.0,
                longitude: -20.0,
                country: "A".into(),
                name: "a".into(),
            },
            GeoPoint {
                latitude: 30.0,
                longitude: 40.0,
                country: "B".into(),
                name: "b".into(),
            },
        ];
        assert_eq!(geo_centroid(&points), Some((20.0, 10.0)));
        assert_eq!(geo_centroid(&[]), None);
    }
}
