// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Newsletter signup.

use crate::error::Result;
use crate::models::NewSubscriber;
use crate::AppState;
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

pub const NEWSLETTER_THANKS_MESSAGE: &str = "Takk for at du meldte deg på!";

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/newsletter", post(subscribe))
}

#[derive(Serialize)]
pub struct SubscribeResponse {
    pub message: String,
}

async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(form): Json<NewSubscriber>,
) -> Result<(StatusCode, Json<SubscribeResponse>)> {
    form.validate()?;
    state.db.insert_subscriber(&form.into_row(Utc::now())).await?;

    tracing::info!("Newsletter subscriber added");

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            message: NEWSLETTER_THANKS_MESSAGE.to_string(),
        }),
    ))
}
