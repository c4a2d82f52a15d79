// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race calendar view.

use crate::error::{AppError, Result};
use crate::models::Race;
use crate::routes::races::{RaceFilterQuery, RaceSummary};
use crate::services::calendar::{
    index_events_by_day, MonthCursor, PanelPlacement, MAX_MARKERS_PER_DAY,
};
use crate::services::race_filter::filter_and_sort;
use crate::time_utils::{format_month_header_nb, format_weekday_date_nb, today_local, WEEKDAYS_NB};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/calendar", get(get_calendar))
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    /// `YYYY-MM`, defaults to the current month
    pub month: Option<String>,
    /// Day to expand (`YYYY-MM-DD`)
    pub day: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarDayView {
    pub iso: NaiveDate,
    pub day: u32,
    pub in_month: bool,
    pub is_today: bool,
    /// At most `MAX_MARKERS_PER_DAY` race markers
    pub races: Vec<CalendarRaceMarker>,
    /// Races beyond the markers ("+N flere")
    pub more: usize,
}

#[derive(Serialize, Clone)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarRaceMarker {
    pub slug: String,
    pub name: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarWeekView {
    pub days: Vec<CalendarDayView>,
}

/// The expanded day panel.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExpandedDay {
    pub iso: NaiveDate,
    /// e.g. "lør. 1. februar 2025"
    pub label: String,
    pub placement: PanelPlacement,
    pub races: Vec<RaceSummary>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    /// e.g. "Februar 2025"
    pub header: String,
    pub month_key: String,
    pub previous: String,
    pub next: String,
    pub today_month: String,
    pub weekdays: Vec<String>,
    pub weeks: Vec<CalendarWeekView>,
    pub expanded: Option<ExpandedDay>,
}

fn marker(race: &Race) -> CalendarRaceMarker {
    CalendarRaceMarker {
        slug: race.slug.clone(),
        name: race.name.clone(),
    }
}

/// Lay out the month containing `cursor` with `races` placed on their days.
pub fn build_calendar(
    cursor: MonthCursor,
    races: &[Race],
    today: NaiveDate,
    expand: Option<NaiveDate>,
) -> Result<CalendarResponse> {
    let grid = cursor.grid();
    let by_day: BTreeMap<NaiveDate, Vec<&Race>> = index_events_by_day(races);

    let expanded = expand
        .map(|day| {
            let (week, weekday) = grid.position_of(day).ok_or_else(|| {
                AppError::BadRequest(format!("Day {} is not shown in {}", day, cursor.key()))
            })?;
            Ok::<_, AppError>(ExpandedDay {
                iso: day,
                label: format_weekday_date_nb(day),
                placement: PanelPlacement::for_cell(week, weekday, grid.weeks.len()),
                races: by_day
                    .get(&day)
                    .map(|list| list.iter().map(|r| RaceSummary::from(*r)).collect())
                    .unwrap_or_default(),
            })
        })
        .transpose()?;

    let weeks = grid
        .weeks
        .iter()
        .map(|week| CalendarWeekView {
            days: week
                .days
                .iter()
                .map(|cell| {
                    let day_races = by_day.get(&cell.iso).map(Vec::as_slice).unwrap_or_default();
                    CalendarDayView {
                        iso: cell.iso,
                        day: cell.day,
                        in_month: cell.in_month,
                        is_today: cell.iso == today,
                        races: day_races
                            .iter()
                            .take(MAX_MARKERS_PER_DAY)
                            .map(|r| marker(r))
                            .collect(),
                        more: day_races.len().saturating_sub(MAX_MARKERS_PER_DAY),
                    }
                })
                .collect(),
        })
        .collect();

    Ok(CalendarResponse {
        year: grid.year,
        month: grid.month,
        header: format_month_header_nb(grid.year, grid.month),
        month_key: cursor.key(),
        previous: cursor.previous().key(),
        next: cursor.next().key(),
        today_month: MonthCursor::today(today).key(),
        weekdays: WEEKDAYS_NB.iter().map(|d| d.to_string()).collect(),
        weeks,
        expanded,
    })
}

async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(calendar): Query<CalendarQuery>,
    Query(filters): Query<RaceFilterQuery>,
) -> Result<Json<CalendarResponse>> {
    let today = today_local();

    let cursor = match calendar.month.as_deref().map(str::trim).filter(|m| !m.is_empty()) {
        Some(raw) => MonthCursor::parse_key(raw).ok_or_else(|| {
            AppError::BadRequest("Invalid 'month' parameter: must be YYYY-MM".to_string())
        })?,
        None => MonthCursor::today(today),
    };

    let day = calendar
        .day
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest("Invalid 'day' parameter: must be YYYY-MM-DD".to_string())
            })
        })
        .transpose()?;

    let spec = filters.into_spec()?;
    let races = state.db.get_races().await?;
    let shown: Vec<Race> = filter_and_sort(&races, &spec, today)
        .into_iter()
        .cloned()
        .collect();

    tracing::debug!(month = %cursor.key(), races = shown.len(), "Building calendar");

    Ok(Json(build_calendar(cursor, &shown, today, day)?))
}
