// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race comment submission.

use crate::error::{AppError, Result};
use crate::models::NewComment;
use crate::routes::races::CommentView;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub const COMMENT_THANKS_MESSAGE: &str = "Takk! Kommentaren er sendt inn.";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/races/{slug}/comments", post(post_comment))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CommentCreatedResponse {
    pub message: String,
    /// The stored comment, to prepend to the local thread
    pub comment: CommentView,
}

/// Add a comment to a race. One comment per email per race.
async fn post_comment(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
    Json(form): Json<NewComment>,
) -> Result<(StatusCode, Json<CommentCreatedResponse>)> {
    form.validate()?;

    let race = state
        .db
        .get_race_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Race {} not found", slug)))?;

    let row = form.into_row(race.id, Utc::now());
    let stored = state.db.insert_comment(&row).await?;

    tracing::info!(race_id = race.id, slug = %race.slug, "Comment added");

    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            message: COMMENT_THANKS_MESSAGE.to_string(),
            comment: CommentView::from(&stored),
        }),
    ))
}
