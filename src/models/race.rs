// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race model as stored in the `races` table.
//!
//! The store is loosely typed: `distance` may arrive as a JSON list or as a
//! comma-separated string, and `distance_numeric` may hold anything. Both are
//! normalized here so the rest of the crate only sees one shape.

use crate::time_utils::parse_race_date;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One ultra-running event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Race {
    pub id: i64,
    pub slug: String,
    pub name: String,
    /// Race day as stored (usually `YYYY-MM-DD`)
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub location: String,
    /// County ("fylke")
    #[serde(default)]
    pub region: Option<String>,
    /// Declared distance labels, e.g. `["50K", "100K"]`
    #[serde(default, deserialize_with = "deserialize_distance_labels")]
    pub distance: Vec<String>,
    /// Numeric distances in km, used for range filtering
    #[serde(default, deserialize_with = "deserialize_distance_numeric")]
    pub distance_numeric: Option<Vec<f64>>,
    /// Legacy single distance column
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub elevation_m: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub status_note: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub strava_route_id: Option<String>,
}

impl Race {
    /// Parsed race day, `None` when the stored value is not a date.
    pub fn race_date(&self) -> Option<NaiveDate> {
        parse_race_date(&self.date)
    }

    /// First numeric distance, 0 when missing (sort key).
    pub fn primary_distance(&self) -> f64 {
        self.distance_numeric
            .as_deref()
            .and_then(|d| d.first().copied())
            .unwrap_or(0.0)
    }

    /// Badge derived from the status note.
    pub fn status(&self) -> Option<StatusNote> {
        self.status_note.as_deref().and_then(StatusNote::parse)
    }

    /// External URL with a scheme, if any.
    pub fn external_url(&self) -> Option<String> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| {
                if u.starts_with("http") {
                    u.to_string()
                } else {
                    format!("https://{}", u)
                }
            })
    }
}

/// Category of a status note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    SoldOut,
    FewSpots,
    Soon,
    Other,
}

/// Status badge shown on race cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StatusNote {
    pub kind: StatusKind,
    /// Short badge text
    pub label: String,
}

impl StatusNote {
    /// Classify a free-text status note. Blank notes have no badge.
    pub fn parse(note: &str) -> Option<Self> {
        let trimmed = note.trim();
        if trimmed.is_empty() {
            return None;
        }

        let (kind, label) = match trimmed.to_lowercase().as_str() {
            "utsolgt" => (StatusKind::SoldOut, "Utsolgt".to_string()),
            "få plasser igjen" => (StatusKind::FewSpots, "Få plasser".to_string()),
            "snart" => (StatusKind::Soon, "Snart".to_string()),
            _ => (StatusKind::Other, trimmed.to_string()),
        };
        Some(Self { kind, label })
    }
}

/// Strip list punctuation left over from stringified arrays.
fn clean_label(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '"' | '\''))
        .collect();
    let cleaned = cleaned.trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

fn deserialize_distance_labels<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let labels = match value {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                serde_json::Value::String(s) => clean_label(s),
                serde_json::Value::Number(n) => clean_label(&n.to_string()),
                _ => None,
            })
            .collect(),
        Some(serde_json::Value::String(s)) => s.split(',').filter_map(clean_label).collect(),
        _ => Vec::new(),
    };
    Ok(labels)
}

fn deserialize_distance_numeric<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(items)) => Some(
            items
                .iter()
                .filter_map(serde_json::Value::as_f64)
                .filter(|n| n.is_finite() && *n >= 0.0)
                .collect(),
        ),
        _ => None,
    })
}
