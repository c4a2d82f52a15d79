// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{Request, Response};
use chrono::{Duration, NaiveDate};
use langelop::config::Config;
use langelop::db::memory::Seed;
use langelop::db::RaceDb;
use langelop::models::Race;
use langelop::routes::create_router;
use langelop::services::ArticleService;
use langelop::time_utils::today_local;
use langelop::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Build a race row the way the store returns it.
#[allow(dead_code)]
pub fn race(id: i64, name: &str, date: NaiveDate, region: &str, distances: &[f64]) -> Race {
    serde_json::from_value(json!({
        "id": id,
        "slug": format!("lop-{}", id),
        "name": name,
        "date": date.format("%Y-%m-%d").to_string(),
        "location": region,
        "region": region,
        "distance": distances.iter().map(|d| format!("{}K", d)).collect::<Vec<_>>(),
        "distance_numeric": distances,
        "description": "Et langt løp.",
        "url": "example.no",
    }))
    .expect("valid race fixture")
}

/// A small directory around today:
/// 1 Femundløpet (+30d, Innlandet, 50/100), 2 Oslo Ultra (-30d, Oslo, 60),
/// 3 Oslo Trail (+10d, Oslo, 100), 4 Kystultra (+60d, Rogaland, 250),
/// 5 Vinterløpet (unparseable date).
#[allow(dead_code)]
pub fn default_races() -> Vec<Race> {
    let today = today_local();
    let mut tba = race(5, "Vinterløpet", today, "Troms", &[80.0]);
    tba.date = "TBA".to_string();

    vec![
        race(1, "Femundløpet", today + Duration::days(30), "Innlandet", &[50.0, 100.0]),
        race(2, "Oslo Ultra", today - Duration::days(30), "Oslo", &[60.0]),
        race(3, "Oslo Trail", today + Duration::days(10), "Oslo", &[100.0]),
        race(4, "Kystultra", today + Duration::days(60), "Rogaland", &[250.0]),
        tba,
    ]
}

/// Create a test app on an in-memory store seeded with `races`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with(races: Vec<Race>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let db = RaceDb::in_memory(Seed {
        races,
        comments: Vec::new(),
    });
    let article_service = ArticleService::load_from_file(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/data/articles.json"
    ))
    .expect("article catalog");

    let state = Arc::new(AppState {
        config,
        db,
        article_service,
    });

    (create_router(state.clone()), state)
}

#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(default_races())
}

#[allow(dead_code)]
pub async fn get(app: axum::Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn post_json(app: axum::Router, uri: &str, body: Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
