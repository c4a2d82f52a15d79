// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race directory filtering, sorting and pagination.
//!
//! Everything here is a pure function of the race list, the filter spec and
//! "today"; the whole pipeline is recomputed for every request.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Race;

/// Races per directory page.
pub const PAGE_SIZE: usize = 12;

/// Top of the distance slider. Selecting it means "no upper bound".
pub const MAX_SLIDER_DISTANCE: f64 = 200.0;

/// Sort order for the race list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum SortKey {
    #[default]
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "distanceAsc")]
    DistanceAsc,
    #[serde(rename = "distanceDesc")]
    DistanceDesc,
}

/// Directory filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FilterSpec {
    pub query: String,
    /// Inclusive distance range in km
    pub min_distance: f64,
    pub max_distance: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub regions: BTreeSet<String>,
    pub only_upcoming: bool,
    pub sort: SortKey,
    /// 1-based page
    pub page: usize,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            query: String::new(),
            min_distance: 0.0,
            max_distance: MAX_SLIDER_DISTANCE,
            start_date: None,
            end_date: None,
            regions: BTreeSet::new(),
            only_upcoming: true,
            sort: SortKey::Date,
            page: 1,
        }
    }
}

impl FilterSpec {
    /// True when a free-text search is active.
    pub fn is_searching(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// An active search always disables the upcoming-only filter.
    pub fn effective_only_upcoming(&self) -> bool {
        self.only_upcoming && !self.is_searching()
    }

    fn matches_query(&self, race: &Race) -> bool {
        race.name
            .to_lowercase()
            .contains(&self.query.to_lowercase())
    }

    fn matches_distance(&self, race: &Race) -> bool {
        let Some(distances) = race.distance_numeric.as_deref() else {
            return false;
        };
        let unbounded = self.max_distance >= MAX_SLIDER_DISTANCE;
        distances.iter().any(|&d| {
            if unbounded {
                d >= self.min_distance
            } else {
                d >= self.min_distance && d <= self.max_distance
            }
        })
    }

    fn matches_date_range(&self, race: &Race) -> bool {
        if self.start_date.is_none() && self.end_date.is_none() {
            return true;
        }
        let Some(date) = race.race_date() else {
            return false;
        };
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }

    fn matches_region(&self, race: &Race) -> bool {
        if self.regions.is_empty() {
            return true;
        }
        race.region
            .as_ref()
            .is_some_and(|region| self.regions.contains(region))
    }

    fn matches_upcoming(&self, race: &Race, today: NaiveDate) -> bool {
        if !self.effective_only_upcoming() {
            return true;
        }
        race.race_date().is_some_and(|date| date >= today)
    }

    /// All predicates ANDed.
    pub fn matches(&self, race: &Race, today: NaiveDate) -> bool {
        self.matches_query(race)
            && self.matches_distance(race)
            && self.matches_date_range(race)
            && self.matches_region(race)
            && self.matches_upcoming(race, today)
    }
}

/// Compare by date; unparseable dates go last so the order stays total.
fn compare_dates(a: &Race, b: &Race) -> Ordering {
    match (a.race_date(), b.race_date()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Filter and sort races for the directory.
pub fn filter_and_sort<'a>(races: &'a [Race], spec: &FilterSpec, today: NaiveDate) -> Vec<&'a Race> {
    let mut filtered: Vec<&Race> = races.iter().filter(|r| spec.matches(r, today)).collect();

    match spec.sort {
        SortKey::Date => filtered.sort_by(|a, b| compare_dates(a, b)),
        SortKey::DistanceAsc => {
            filtered.sort_by(|a, b| a.primary_distance().total_cmp(&b.primary_distance()))
        }
        SortKey::DistanceDesc => {
            filtered.sort_by(|a, b| b.primary_distance().total_cmp(&a.primary_distance()))
        }
    }

    filtered
}

/// Number of pages needed for `len` items.
pub fn total_pages(len: usize) -> usize {
    len.div_ceil(PAGE_SIZE)
}

/// One page of items. Out-of-range pages (including 0) are empty.
pub fn paginate<T>(items: &[T], page: usize) -> &[T] {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(PAGE_SIZE))
    else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}

/// Sorted, de-duplicated regions for the region filter.
pub fn available_regions(races: &[Race]) -> Vec<String> {
    races
        .iter()
        .filter_map(|r| r.region.as_deref())
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn race(id: i64, name: &str, date: &str, distances: Option<Vec<f64>>) -> Race {
        Race {
            id,
            slug: format!("race-{}", id),
            name: name.to_string(),
            date: date.to_string(),
            location: "Oslo".to_string(),
            region: Some("Oslo".to_string()),
            distance: vec![],
            distance_numeric: distances,
            distance_km: None,
            elevation_m: None,
            description: None,
            url: None,
            status_note: None,
            image_url: None,
            strava_route_id: None,
        }
    }

    fn all_dates() -> FilterSpec {
        FilterSpec {
            only_upcoming: false,
            ..FilterSpec::default()
        }
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let races = vec![
            race(1, "Oslo Ultra", "2026-01-01", Some(vec![50.0])),
            race(2, "Bergen Fjord", "2026-01-01", Some(vec![50.0])),
        ];
        let spec = FilterSpec {
            query: "OSLO".to_string(),
            ..all_dates()
        };
        let result = filter_and_sort(&races, &spec, ymd(2025, 1, 1));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_search_overrides_upcoming() {
        let today = ymd(2026, 10, 19);
        let races = vec![
            race(1, "Oslo Backyard", "2025-05-01", Some(vec![100.0])),
            race(2, "Oslo Ultra", "2027-05-01", Some(vec![50.0])),
        ];
        let searching = FilterSpec {
            query: "oslo".to_string(),
            only_upcoming: true,
            ..FilterSpec::default()
        };
        let ids: Vec<_> = filter_and_sort(&races, &searching, today)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        let browsing = FilterSpec::default();
        let ids: Vec<_> = filter_and_sort(&races, &browsing, today)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_whitespace_query_keeps_upcoming() {
        let races = vec![race(1, "Gammelt løp", "2020-05-01", Some(vec![60.0]))];
        let spec = FilterSpec {
            query: "  ".to_string(),
            ..FilterSpec::default()
        };
        assert!(filter_and_sort(&races, &spec, ymd(2026, 1, 1)).is_empty());
    }

    #[test]
    fn test_race_today_counts_as_upcoming() {
        let races = vec![race(1, "I dag", "2026-10-19", Some(vec![60.0]))];
        let result = filter_and_sort(&races, &FilterSpec::default(), ymd(2026, 10, 19));
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_slider_sentinel_is_unbounded() {
        let races = vec![race(1, "Lang", "2026-01-01", Some(vec![250.0]))];
        let spec = FilterSpec {
            min_distance: 50.0,
            max_distance: MAX_SLIDER_DISTANCE,
            ..all_dates()
        };
        assert_eq!(filter_and_sort(&races, &spec, ymd(2025, 1, 1)).len(), 1);

        let capped = FilterSpec {
            max_distance: 199.0,
            ..spec
        };
        assert!(filter_and_sort(&races, &capped, ymd(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_missing_numeric_distance_never_matches() {
        let races = vec![race(1, "Uten distanse", "2026-01-01", None)];
        assert!(filter_and_sort(&races, &all_dates(), ymd(2025, 1, 1)).is_empty());
    }

    #[test]
    fn test_any_distance_in_range_matches() {
        let races = vec![race(1, "Flere", "2026-01-01", Some(vec![10.0, 55.0, 160.0]))];
        let spec = FilterSpec {
            min_distance: 50.0,
            max_distance: 60.0,
            ..all_dates()
        };
        assert_eq!(filter_and_sort(&races, &spec, ymd(2025, 1, 1)).len(), 1);
    }

    #[test]
    fn test_date_range_is_inclusive_and_drops_bad_dates() {
        let races = vec![
            race(1, "Start", "2026-06-01", Some(vec![50.0])),
            race(2, "End", "2026-06-30", Some(vec![50.0])),
            race(3, "After", "2026-07-01", Some(vec![50.0])),
            race(4, "TBA", "ikke satt", Some(vec![50.0])),
        ];
        let spec = FilterSpec {
            start_date: Some(ymd(2026, 6, 1)),
            end_date: Some(ymd(2026, 6, 30)),
            ..all_dates()
        };
        let ids: Vec<_> = filter_and_sort(&races, &spec, ymd(2025, 1, 1))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        // No bounds: the undated race is kept.
        assert_eq!(filter_and_sort(&races, &all_dates(), ymd(2025, 1, 1)).len(), 4);
    }

    #[test]
    fn test_region_selection() {
        let mut trondelag = race(2, "Trøndelag", "2026-01-01", Some(vec![50.0]));
        trondelag.region = Some("Trøndelag".to_string());
        let mut unknown = race(3, "Uten fylke", "2026-01-01", Some(vec![50.0]));
        unknown.region = None;
        let races = vec![race(1, "Oslo", "2026-01-01", Some(vec![50.0])), trondelag, unknown];

        let spec = FilterSpec {
            regions: BTreeSet::from(["Trøndelag".to_string()]),
            ..all_dates()
        };
        let ids: Vec<_> = filter_and_sort(&races, &spec, ymd(2025, 1, 1))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2]);
        assert_eq!(available_regions(&races), vec!["Oslo", "Trøndelag"]);
    }

    #[test]
    fn test_sort_by_date_puts_bad_dates_last() {
        let races = vec![
            race(1, "Sen", "2026-09-01", Some(vec![50.0])),
            race(2, "Ukjent", "?", Some(vec![50.0])),
            race(3, "Tidlig", "2026-02-01", Some(vec![50.0])),
        ];
        let ids: Vec<_> = filter_and_sort(&races, &all_dates(), ymd(2025, 1, 1))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_by_distance() {
        let races = vec![
            race(1, "Mellom", "2026-01-01", Some(vec![80.0, 20.0])),
            race(2, "Kort", "2026-01-01", Some(vec![50.0])),
            race(3, "Lang", "2026-01-01", Some(vec![160.0])),
        ];
        let asc = FilterSpec {
            sort: SortKey::DistanceAsc,
            ..all_dates()
        };
        let ids: Vec<_> = filter_and_sort(&races, &asc, ymd(2025, 1, 1))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![2, 1, 3]);

        let desc = FilterSpec {
            sort: SortKey::DistanceDesc,
            ..all_dates()
        };
        let ids: Vec<_> = filter_and_sort(&races, &desc, ymd(2025, 1, 1))
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_pagination() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(total_pages(items.len()), 3);
        assert_eq!(paginate(&items, 1).len(), PAGE_SIZE);
        assert_eq!(paginate(&items, 3), &[24]);
        assert!(paginate(&items, 4).is_empty());
        assert!(paginate(&items, 0).is_empty());
        assert_eq!(total_pages(0), 0);
    }

    #[test]
    fn test_sort_key_wire_names() {
        assert_eq!(
            serde_json::to_string(&SortKey::DistanceAsc).unwrap(),
            "\"distanceAsc\""
        );
        let parsed: SortKey = serde_json::from_str("\"distanceDesc\"").unwrap();
        assert_eq!(parsed, SortKey::DistanceDesc);
    }
}
