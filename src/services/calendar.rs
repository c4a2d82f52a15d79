// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Month calendar grid and by-day event index.
//!
//! The grid is always 6 weeks of 7 days, Monday first, padded with days
//! from the neighbouring months so the layout never jumps between months.

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Race;

pub const DAYS_PER_WEEK: usize = 7;
pub const WEEKS_PER_GRID: usize = 6;
pub const CELLS_PER_GRID: usize = DAYS_PER_WEEK * WEEKS_PER_GRID;

/// Race markers shown inside a cell before collapsing into "+N flere".
pub const MAX_MARKERS_PER_DAY: usize = 3;

/// One day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarCell {
    pub iso: NaiveDate,
    /// Day of month (1-31)
    pub day: u32,
    pub in_month: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Week {
    pub days: Vec<CalendarCell>,
}

/// A 6x7 month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MonthGrid {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &CalendarCell> {
        self.weeks.iter().flat_map(|w| w.days.iter())
    }

    /// Position (week, weekday) of a date in the grid.
    pub fn position_of(&self, date: NaiveDate) -> Option<(usize, usize)> {
        self.weeks.iter().enumerate().find_map(|(wi, week)| {
            week.days
                .iter()
                .position(|cell| cell.iso == date)
                .map(|di| (wi, di))
        })
    }
}

/// Years the calendar can show. Grids at the edges still fit in chrono's range.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// First day of the month, pulled into `MIN_YEAR..=MAX_YEAR`.
fn first_of_month(date: NaiveDate) -> NaiveDate {
    let clamped = if date.year() < MIN_YEAR {
        NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1)
    } else if date.year() > MAX_YEAR {
        NaiveDate::from_ymd_opt(MAX_YEAR, 12, 1)
    } else {
        date.with_day(1)
    };
    clamped.unwrap_or(date)
}

fn is_supported(date: NaiveDate) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&date.year())
}

/// Build the 42-cell grid for the month containing `reference`.
pub fn build_month(reference: NaiveDate) -> MonthGrid {
    let first = first_of_month(reference);
    let leading = first.weekday().num_days_from_monday() as i64;
    let start = first - Duration::days(leading);

    let cells: Vec<CalendarCell> = start
        .iter_days()
        .take(CELLS_PER_GRID)
        .map(|iso| CalendarCell {
            iso,
            day: iso.day(),
            in_month: iso.year() == first.year() && iso.month() == first.month(),
        })
        .collect();

    let weeks = cells
        .chunks(DAYS_PER_WEEK)
        .map(|days| Week {
            days: days.to_vec(),
        })
        .collect();

    MonthGrid {
        year: first.year(),
        month: first.month(),
        weeks,
    }
}

/// Something that can be placed on the calendar.
pub trait CalendarEvent {
    fn event_date(&self) -> Option<NaiveDate>;
    fn event_name(&self) -> &str;
}

impl CalendarEvent for Race {
    fn event_date(&self) -> Option<NaiveDate> {
        self.race_date()
    }

    fn event_name(&self) -> &str {
        &self.name
    }
}

/// Group events by calendar day, each day sorted by name.
///
/// Events without a parseable date are left out.
pub fn index_events_by_day<E: CalendarEvent>(events: &[E]) -> BTreeMap<NaiveDate, Vec<&E>> {
    let mut index: BTreeMap<NaiveDate, Vec<&E>> = BTreeMap::new();

    for event in events {
        match event.event_date() {
            Some(date) => index.entry(date).or_default().push(event),
            None => {
                tracing::debug!(
                    name = event.event_name(),
                    "Skipping calendar event with unparseable date"
                );
            }
        }
    }

    for list in index.values_mut() {
        // Stable, so equal names keep input order.
        list.sort_by(|a, b| a.event_name().cmp(b.event_name()));
    }

    index
}

/// The displayed month. Always the first day of that month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MonthCursor(NaiveDate);

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self(first_of_month(date))
    }

    pub fn first_day(&self) -> NaiveDate {
        self.0
    }

    /// Previous month; stays put at the first supported month.
    pub fn previous(self) -> Self {
        self.0
            .checked_sub_months(Months::new(1))
            .filter(|d| is_supported(*d))
            .map_or(self, Self)
    }

    /// Next month; stays put at the last supported month.
    pub fn next(self) -> Self {
        self.0
            .checked_add_months(Months::new(1))
            .filter(|d| is_supported(*d))
            .map_or(self, Self)
    }

    pub fn today(today: NaiveDate) -> Self {
        Self::containing(today)
    }

    pub fn grid(&self) -> MonthGrid {
        build_month(self.0)
    }

    /// `YYYY-MM` key used in URLs.
    pub fn key(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }

    /// Parse a `YYYY-MM` key with a four-digit year in the supported range.
    pub fn parse_key(raw: &str) -> Option<Self> {
        let (year, month) = raw.trim().split_once('-')?;
        if year.len() != 4 || month.len() != 2 {
            return None;
        }
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return None;
        }
        NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, 1)
            .filter(|d| is_supported(*d))
            .map(Self)
    }
}

/// Toggle the expanded day: selecting the open day closes it.
pub fn toggle_day(active: Option<NaiveDate>, day: NaiveDate) -> Option<NaiveDate> {
    if active == Some(day) {
        None
    } else {
        Some(day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Vertical {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Horizontal {
    AlignLeft,
    AlignRight,
}

/// Where the expanded day panel opens relative to its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PanelPlacement {
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl PanelPlacement {
    /// Flip up for the bottom two rows and left-anchored-right for the two
    /// rightmost columns, so the panel stays inside the grid.
    pub fn for_cell(week_index: usize, weekday_index: usize, week_count: usize) -> Self {
        let vertical = if week_index + 2 >= week_count {
            Vertical::Above
        } else {
            Vertical::Below
        };
        let horizontal = if weekday_index + 2 >= DAYS_PER_WEEK {
            Horizontal::AlignRight
        } else {
            Horizontal::AlignLeft
        };
        Self {
            vertical,
            horizontal,
        }
    }
}
