// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::http::StatusCode;
use axum::response::IntoResponse;
use langelop::error::AppError;
use langelop::models::NewSubscriber;
use validator::Validate;

#[test]
fn test_conflict_messages() {
    assert_eq!(
        AppError::AlreadySubscribed.user_message().as_deref(),
        Some("Denne e-posten er allerede registrert.")
    );
    assert_eq!(
        AppError::AlreadyCommented.user_message().as_deref(),
        Some("Denne e-posten har allerede kommentert på dette løpet.")
    );
    assert_eq!(
        AppError::AlreadyCommented.into_response().status(),
        StatusCode::CONFLICT
    );
}

#[test]
fn test_store_failures_are_generic() {
    let err = AppError::Database("connection refused".to_string());
    assert_eq!(
        err.user_message().as_deref(),
        Some(AppError::GENERIC_FAILURE_MESSAGE)
    );
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

    let err = AppError::Internal(anyhow::anyhow!("boom"));
    assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_validation_maps_to_bad_request() {
    let errors = NewSubscriber {
        email: "ikke-epost".to_string(),
    }
    .validate()
    .unwrap_err();
    let err = AppError::from(errors);
    assert_eq!(
        err.user_message().as_deref(),
        Some("Vennligst skriv inn en gyldig e-postadresse.")
    );
    assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn test_lookup_errors_have_no_form_message() {
    assert_eq!(AppError::NotFound("race".to_string()).user_message(), None);
    assert_eq!(
        AppError::BadRequest("page".to_string()).into_response().status(),
        StatusCode::BAD_REQUEST
    );
}
