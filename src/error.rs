// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Email already subscribed")]
    AlreadySubscribed,

    #[error("Email already commented on this race")]
    AlreadyCommented,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Shown when a newsletter signup hits the unique email constraint.
    pub const ALREADY_SUBSCRIBED_MESSAGE: &'static str = "Denne e-posten er allerede registrert.";
    /// Shown when a (race, email) pair has already commented.
    pub const ALREADY_COMMENTED_MESSAGE: &'static str =
        "Denne e-posten har allerede kommentert på dette løpet.";
    /// Shown for every other store failure.
    pub const GENERIC_FAILURE_MESSAGE: &'static str = "Noe gikk galt. Prøv igjen.";
    /// Shown when a required form field is blank.
    pub const MISSING_FIELDS_MESSAGE: &'static str = "Vennligst fyll ut alle felt.";

    /// User-facing message for form submissions.
    pub fn user_message(&self) -> Option<String> {
        match self {
            AppError::AlreadySubscribed => Some(Self::ALREADY_SUBSCRIBED_MESSAGE.to_string()),
            AppError::AlreadyCommented => Some(Self::ALREADY_COMMENTED_MESSAGE.to_string()),
            AppError::Validation(errors) => Some(first_validation_message(errors)),
            AppError::Database(_) | AppError::Internal(_) => {
                Some(Self::GENERIC_FAILURE_MESSAGE.to_string())
            }
            AppError::NotFound(_) | AppError::BadRequest(_) => None,
        }
    }
}

fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| AppError::MISSING_FIELDS_MESSAGE.to_string())
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.user_message();
        let (status, error, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                Some(errors.to_string()),
            ),
            AppError::AlreadySubscribed => (StatusCode::CONFLICT, "already_subscribed", None),
            AppError::AlreadyCommented => (StatusCode::CONFLICT, "already_commented", None),
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
