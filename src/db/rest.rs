// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PostgREST client for the hosted data store.
//!
//! Handles:
//! - Table selects with `eq.` filters and ordering
//! - Row inserts (optionally returning the stored row)
//! - Mapping the Postgres unique-violation code to a typed error

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Postgres SQLSTATE for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

/// Errors from the REST data store.
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Classify a failed response from its status and body.
pub fn classify_error(status: u16, body: &str) -> RestError {
    let parsed = serde_json::from_str::<PostgrestError>(body).ok();
    let code = parsed.as_ref().and_then(|e| e.code.as_deref());

    if code == Some(UNIQUE_VIOLATION) || (status == 409 && code.is_none()) {
        let message = parsed
            .and_then(|e| e.message)
            .unwrap_or_else(|| body.to_string());
        return RestError::UniqueViolation(message);
    }

    RestError::Status {
        status,
        body: body.to_string(),
    }
}

/// Thin PostgREST client.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Create a client for `{base_url}/rest/v1`.
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: format!("{}/rest/v1", base_url.trim_end_matches('/')),
            api_key: api_key.to_string(),
        }
    }

    fn request(&self, method: reqwest::Method, table: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// `GET /{table}?select=*&...` returning all matching rows.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<T>, RestError> {
        let mut query: Vec<(&str, String)> = vec![("select", "*".to_string())];
        query.extend(filters.iter().cloned());

        let response = self
            .request(reqwest::Method::GET, table)
            .query(&query)
            .send()
            .await
            .map_err(|e| RestError::Request(e.to_string()))?;

        Self::check_response_json(response).await
    }

    /// Insert one row and return the stored representation.
    pub async fn insert_returning<B: Serialize, T: DeserializeOwned>(
        &self,
        table: &str,
        row: &B,
    ) -> Result<Vec<T>, RestError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=representation")
            .json(&[row])
            .send()
            .await
            .map_err(|e| RestError::Request(e.to_string()))?;

        Self::check_response_json(response).await
    }

    /// Insert one row without reading it back.
    pub async fn insert<B: Serialize>(&self, table: &str, row: &B) -> Result<(), RestError> {
        let response = self
            .request(reqwest::Method::POST, table)
            .header("Prefer", "return=minimal")
            .json(&[row])
            .send()
            .await
            .map_err(|e| RestError::Request(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(classify_error(status, &body))
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, RestError> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(classify_error(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RestError::Decode(e.to_string()))
    }
}

/// `column=eq.value` filter.
pub fn eq(column: &str, value: impl ToString) -> (&str, String) {
    (column, format!("eq.{}", value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_code() {
        let body = r#"{"code":"23505","details":"Key (email)=(a@b.no) already exists.","hint":null,"message":"duplicate key value violates unique constraint \"newsletter_subscribers_email_key\""}"#;
        assert!(matches!(
            classify_error(409, body),
            RestError::UniqueViolation(msg) if msg.contains("duplicate key")
        ));
    }

    #[test]
    fn test_other_errors_are_status() {
        let body = r#"{"code":"42501","message":"permission denied for table comments"}"#;
        assert!(matches!(
            classify_error(401, body),
            RestError::Status { status: 401, .. }
        ));
        assert!(matches!(
            classify_error(500, "upstream timeout"),
            RestError::Status { status: 500, .. }
        ));
    }

    #[test]
    fn test_bare_conflict_is_unique_violation() {
        assert!(matches!(
            classify_error(409, ""),
            RestError::UniqueViolation(_)
        ));
    }

    #[test]
    fn test_eq_filter() {
        assert_eq!(eq("slug", "femundlopet"), ("slug", "eq.femundlopet".to_string()));
        assert_eq!(eq("id", 42), ("id", "eq.42".to_string()));
    }
}
