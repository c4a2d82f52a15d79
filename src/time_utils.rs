// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date parsing and Norwegian date formatting.

use chrono::{DateTime, Datelike, Local, NaiveDate, SecondsFormat, Utc};

const MONTHS_NB: [&str; 12] = [
    "januar",
    "februar",
    "mars",
    "april",
    "mai",
    "juni",
    "juli",
    "august",
    "september",
    "oktober",
    "november",
    "desember",
];

/// Short Norwegian weekday names, Monday first.
pub const WEEKDAYS_NB: [&str; 7] = ["man", "tir", "ons", "tor", "fre", "lør", "søn"];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a race date into a calendar day.
///
/// Accepts a plain `YYYY-MM-DD` day or an RFC3339 timestamp; any time of day
/// is discarded. Returns `None` for anything else.
pub fn parse_race_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local).date_naive());
    }

    // Postgres `timestamp` columns come back without an offset.
    chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

/// Start of the current local day.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Norwegian long date, e.g. "3. oktober 2025".
pub fn format_date_nb(date: NaiveDate) -> String {
    format!(
        "{}. {} {}",
        date.day(),
        MONTHS_NB[date.month0() as usize],
        date.year()
    )
}

/// Norwegian date with weekday, e.g. "lør. 1. februar 2025".
pub fn format_weekday_date_nb(date: NaiveDate) -> String {
    format!(
        "{}. {}",
        WEEKDAYS_NB[date.weekday().num_days_from_monday() as usize],
        format_date_nb(date)
    )
}

/// Format a raw race date for display, falling back to the raw value.
pub fn format_raw_date_nb(raw: &str) -> String {
    parse_race_date(raw)
        .map(format_date_nb)
        .unwrap_or_else(|| raw.to_string())
}

/// Month header for the calendar, e.g. "Februar 2025".
pub fn format_month_header_nb(year: i32, month: u32) -> String {
    let name = MONTHS_NB
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default();
    let mut chars = name.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("{} {}", capitalized, year)
}
