// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Health, articles and shop routes.

use axum::http::{header, StatusCode};

mod common;

#[tokio::test]
async fn test_health_and_security_headers() {
    let (app, _state) = common::create_test_app();

    let response = common::get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");

    let body = common::body_json(response).await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_articles() {
    let (app, _state) = common::create_test_app();

    let body = common::body_json(common::get(app.clone(), "/api/articles").await).await;
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 3);
    assert_eq!(articles[2]["slug"], "tips-til-din-forste-50k");
    assert_eq!(articles[2]["date_display"], "25. august 2025");
    assert_eq!(articles[2]["href"], "/artikler/tips-til-din-forste-50k");

    let response = common::get(app.clone(), "/api/articles/lop-med-mange-hoydemeter").await;
    assert_eq!(response.status(), StatusCode::OK);
    let article = common::body_json(response).await;
    assert_eq!(article["focus_article"], "center 70%");
    assert!(article["content"].as_str().unwrap().contains("## 1. Bruk trappene"));

    let missing = common::get(app, "/api/articles/finnes-ikke").await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shop_placeholder() {
    let (app, _state) = common::create_test_app();

    let body = common::body_json(common::get(app, "/api/shop").await).await;
    assert_eq!(body["status"], "under_construction");
    assert_eq!(body["message"], "Nettbutikken er under arbeid");
}
