// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race directory and race detail routes.

use crate::error::{AppError, Result};
use crate::models::{Comment, CommentThread, Race, StatusNote};
use crate::services::race_filter::{
    available_regions, filter_and_sort, paginate, total_pages, FilterSpec, SortKey, PAGE_SIZE,
};
use crate::time_utils::{format_date_nb, format_raw_date_nb, format_utc_rfc3339, today_local};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Characters of the description shown before "Vis mer".
const DESCRIPTION_PREVIEW_CHARS: usize = 200;
const MAX_QUERY_LEN: usize = 100;

/// Race routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/races", get(list_races))
        .route("/api/races/{slug}", get(get_race_by_slug))
        .route("/api/race/{id}", get(get_race_by_id))
}

// ─── Filter Parameters ───────────────────────────────────────

/// Directory filter query parameters, shared with the calendar route.
#[derive(Debug, Default, Deserialize)]
pub struct RaceFilterQuery {
    /// Free-text search on race name
    pub q: Option<String>,
    /// Distance range in km
    pub min: Option<f64>,
    pub max: Option<f64>,
    /// Date bounds (YYYY-MM-DD)
    pub start: Option<String>,
    pub end: Option<String>,
    /// Comma-separated regions
    pub region: Option<String>,
    /// Only races today or later (default true)
    pub upcoming: Option<bool>,
    pub sort: Option<SortKey>,
    /// Pagination: page number (1-indexed)
    pub page: Option<usize>,
}

fn parse_bound(name: &str, raw: Option<&str>) -> Result<Option<NaiveDate>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                AppError::BadRequest(format!("Invalid '{}' parameter: must be YYYY-MM-DD", name))
            })
        })
        .transpose()
}

impl RaceFilterQuery {
    /// Validate and convert into a filter spec.
    pub fn into_spec(self) -> Result<FilterSpec> {
        let defaults = FilterSpec::default();

        let query = self.q.unwrap_or_default();
        if query.chars().count() > MAX_QUERY_LEN {
            return Err(AppError::BadRequest("Search query too long".to_string()));
        }

        let min_distance = self.min.unwrap_or(defaults.min_distance);
        let max_distance = self.max.unwrap_or(defaults.max_distance);
        if !min_distance.is_finite() || !max_distance.is_finite() || min_distance < 0.0 {
            return Err(AppError::BadRequest(
                "Distance bounds must be non-negative numbers".to_string(),
            ));
        }
        if min_distance > max_distance {
            return Err(AppError::BadRequest(
                "'min' must not exceed 'max'".to_string(),
            ));
        }

        let page = self.page.unwrap_or(1);
        if page < 1 {
            return Err(AppError::BadRequest(
                "Page must be greater than 0".to_string(),
            ));
        }

        let regions = self
            .region
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect();

        Ok(FilterSpec {
            query,
            min_distance,
            max_distance,
            start_date: parse_bound("start", self.start.as_deref())?,
            end_date: parse_bound("end", self.end.as_deref())?,
            regions,
            only_upcoming: self.upcoming.unwrap_or(defaults.only_upcoming),
            sort: self.sort.unwrap_or_default(),
            page,
        })
    }
}

// ─── Race Summaries ──────────────────────────────────────────

/// Race card in the directory.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RaceSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    pub slug: String,
    pub name: String,
    pub date: String,
    /// Norwegian display date, e.g. "14. juni 2025"
    pub date_display: String,
    pub location: String,
    pub region: Option<String>,
    pub distances: Vec<String>,
    pub status: Option<StatusNote>,
    pub image_url: Option<String>,
    /// Official race website
    pub url: Option<String>,
    /// Link to the race page on this site
    pub href: String,
}

impl From<&Race> for RaceSummary {
    fn from(race: &Race) -> Self {
        Self {
            id: race.id,
            slug: race.slug.clone(),
            name: race.name.clone(),
            date: race.date.clone(),
            date_display: format_raw_date_nb(&race.date),
            location: race.location.clone(),
            region: race.region.clone(),
            distances: race.distance.clone(),
            status: race.status(),
            image_url: race.image_url.clone(),
            url: race.external_url(),
            href: format!("/{}", urlencoding::encode(&race.slug)),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RacesResponse {
    pub races: Vec<RaceSummary>,
    pub page: usize,
    pub per_page: usize,
    /// Races matching the filters
    pub total: usize,
    /// All races in the directory
    pub total_races: usize,
    pub total_pages: usize,
    /// Region facet for the filter panel
    pub regions: Vec<String>,
}

/// List races with filtering, sorting and pagination.
async fn list_races(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RaceFilterQuery>,
) -> Result<Json<RacesResponse>> {
    let spec = params.into_spec()?;

    tracing::debug!(
        query = %spec.query,
        min = spec.min_distance,
        max = spec.max_distance,
        regions = spec.regions.len(),
        upcoming = spec.only_upcoming,
        sort = ?spec.sort,
        page = spec.page,
        "Fetching races"
    );

    let races = state.db.get_races().await?;
    let filtered = filter_and_sort(&races, &spec, today_local());

    Ok(Json(RacesResponse {
        races: paginate(&filtered, spec.page)
            .iter()
            .map(|r| RaceSummary::from(*r))
            .collect(),
        page: spec.page,
        per_page: PAGE_SIZE,
        total: filtered.len(),
        total_races: races.len(),
        total_pages: total_pages(filtered.len()),
        regions: available_regions(&races),
    }))
}

// ─── Race Detail ─────────────────────────────────────────────

/// Public view of a comment (email is never exposed).
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommentView {
    pub name: String,
    pub comment: String,
    pub created_at: String,
    pub created_at_display: String,
}

impl From<&Comment> for CommentView {
    fn from(c: &Comment) -> Self {
        Self {
            name: c.name.clone(),
            comment: c.comment.clone(),
            created_at: format_utc_rfc3339(c.created_at),
            created_at_display: format_date_nb(c.created_at.date_naive()),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RaceDetailResponse {
    pub race: RaceSummary,
    pub elevation_m: Option<f64>,
    /// Legacy single distance
    pub distance_km: Option<f64>,
    pub description: Option<String>,
    /// Shortened description when the full one is long
    pub description_preview: Option<String>,
    pub strava_route_id: Option<String>,
    /// Newest first
    pub comments: Vec<CommentView>,
}

/// First `DESCRIPTION_PREVIEW_CHARS` characters plus an ellipsis, or `None`
/// when the description is short enough to show in full.
pub fn description_preview(description: &str) -> Option<String> {
    if description.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return None;
    }
    let head: String = description.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    Some(format!("{}…", head))
}

async fn race_detail(state: &AppState, race: Race) -> Result<RaceDetailResponse> {
    let thread = CommentThread::from_fetched(state.db.get_comments_for_race(race.id).await?);

    Ok(RaceDetailResponse {
        race: RaceSummary::from(&race),
        elevation_m: race.elevation_m,
        distance_km: race.distance_km,
        description_preview: race.description.as_deref().and_then(description_preview),
        description: race.description,
        strava_route_id: race.strava_route_id.filter(|id| !id.trim().is_empty()),
        comments: thread.comments().iter().map(CommentView::from).collect(),
    })
}

/// Get a race page by slug.
async fn get_race_by_slug(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<RaceDetailResponse>> {
    let race = state
        .db
        .get_race_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Race {} not found", slug)))?;

    Ok(Json(race_detail(&state, race).await?))
}

/// Get a race page by numeric ID.
async fn get_race_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<RaceDetailResponse>> {
    let race = state
        .db
        .get_race_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Race {} not found", id)))?;

    Ok(Json(race_detail(&state, race).await?))
}
