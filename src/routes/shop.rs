// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shop placeholder.

use crate::AppState;
use axum::{routing::get, Json, Router};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/shop", get(shop))
}

#[derive(Serialize)]
pub struct ShopResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub detail: &'static str,
}

async fn shop() -> Json<ShopResponse> {
    Json(ShopResponse {
        status: "under_construction",
        message: "Nettbutikken er under arbeid",
        detail: "Kommer snart…",
    })
}
