// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Comment and newsletter submission tests.

use axum::http::{header, StatusCode};
use langelop::error::AppError;
use serde_json::json;

mod common;

#[tokio::test]
async fn test_comment_is_listed_first() {
    let (app, _state) = common::create_test_app();

    let first = common::post_json(
        app.clone(),
        "/api/races/lop-1/comments",
        json!({"name": "Kari", "email": "kari@example.no", "comment": "Flott løype"}),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(first.headers()[header::CACHE_CONTROL], "no-store");
    let body = common::body_json(first).await;
    assert_eq!(body["message"], "Takk! Kommentaren er sendt inn.");
    assert_eq!(body["comment"]["name"], "Kari");
    assert!(body["comment"].get("email").is_none());

    let second = common::post_json(
        app.clone(),
        "/api/races/lop-1/comments",
        json!({"name": "Ola", "email": "ola@example.no", "comment": "  Tøft!  "}),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CREATED);

    let detail = common::body_json(common::get(app, "/api/races/lop-1").await).await;
    let comments = detail["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["name"], "Ola");
    assert_eq!(comments[0]["comment"], "Tøft!");
    assert_eq!(comments[1]["name"], "Kari");
    assert!(comments.iter().all(|c| c.get("email").is_none()));
}

#[tokio::test]
async fn test_duplicate_comment_conflict() {
    let (app, _state) = common::create_test_app();
    let form = json!({"name": "Kari", "email": "kari@example.no", "comment": "Igjen"});

    let first = common::post_json(app.clone(), "/api/races/lop-1/comments", form.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let dup = common::post_json(app.clone(), "/api/races/lop-1/comments", form.clone()).await;
    assert_eq!(dup.status(), StatusCode::CONFLICT);
    let body = common::body_json(dup).await;
    assert_eq!(body["error"], "already_commented");
    assert_eq!(body["message"], AppError::ALREADY_COMMENTED_MESSAGE);

    // Same email on another race is fine.
    let other = common::post_json(app, "/api/races/lop-3/comments", form).await;
    assert_eq!(other.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_comment_validation() {
    let (app, _state) = common::create_test_app();

    let blank = common::post_json(
        app.clone(),
        "/api/races/lop-1/comments",
        json!({"name": "   ", "email": "kari@example.no", "comment": "Hei"}),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(blank).await;
    assert_eq!(body["error"], "validation_error");
    assert_eq!(body["message"], AppError::MISSING_FIELDS_MESSAGE);

    let missing = common::post_json(
        app.clone(),
        "/api/races/lop-1/comments",
        json!({"name": "Kari"}),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let unknown_race = common::post_json(
        app,
        "/api/races/finnes-ikke/comments",
        json!({"name": "Kari", "email": "kari@example.no", "comment": "Hei"}),
    )
    .await;
    assert_eq!(unknown_race.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_newsletter_signup() {
    let (app, state) = common::create_test_app();

    let response = common::post_json(
        app.clone(),
        "/api/newsletter",
        json!({"email": "loper@example.no"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Takk for at du meldte deg på!");

    let dup = common::post_json(
        app.clone(),
        "/api/newsletter",
        json!({"email": "loper@example.no"}),
    )
    .await;
    assert_eq!(dup.status(), StatusCode::CONFLICT);
    let body = common::body_json(dup).await;
    assert_eq!(body["message"], "Denne e-posten er allerede registrert.");

    let invalid = common::post_json(app, "/api/newsletter", json!({"email": "ikke-epost"})).await;
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    assert_eq!(state.db.subscriber_count().await, Some(1));
}
