// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data store wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Races (read-only; all filtering happens in the service layer)
//! - Comments (per race, newest first; insert)
//! - Newsletter subscribers (insert)

use crate::config::Config;
use crate::db::memory::{MemoryTables, Seed, UniqueViolation};
use crate::db::rest::{eq, RestClient, RestError};
use crate::db::tables;
use crate::error::AppError;
use crate::models::subscriber::Subscriber;
use crate::models::{Comment, Race};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
enum Backend {
    Rest(RestClient),
    Memory(Arc<RwLock<MemoryTables>>),
    Offline,
}

/// Race directory database client.
#[derive(Clone)]
pub struct RaceDb {
    backend: Backend,
}

impl RaceDb {
    /// Connect to the hosted REST data store.
    pub fn new_rest(base_url: &str, api_key: &str) -> Self {
        tracing::info!(url = base_url, "Using hosted data store");
        Self {
            backend: Backend::Rest(RestClient::new(base_url, api_key)),
        }
    }

    /// In-memory store seeded with races and comments.
    pub fn in_memory(seed: Seed) -> Self {
        tracing::info!(
            races = seed.races.len(),
            comments = seed.comments.len(),
            "Using in-memory data store"
        );
        Self {
            backend: Backend::Memory(Arc::new(RwLock::new(MemoryTables::from_seed(seed)))),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Pick a backend from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        if let (Some(url), Some(key)) = (&config.database_url, &config.database_api_key) {
            return Ok(Self::new_rest(url, key));
        }

        let seed = match &config.seed_path {
            Some(path) => Seed::load_from_file(path).map_err(|e| {
                AppError::Database(format!("Failed to load seed file {}: {}", path, e))
            })?,
            None => Seed::default(),
        };
        Ok(Self::in_memory(seed))
    }

    fn offline() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── Race Operations ─────────────────────────────────────────

    /// Fetch every race. No filtering is pushed to the store.
    pub async fn get_races(&self) -> Result<Vec<Race>, AppError> {
        match &self.backend {
            Backend::Rest(client) => client
                .select(tables::RACES, &[])
                .await
                .map_err(store_error),
            Backend::Memory(tables) => Ok(tables.read().await.races().to_vec()),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Fetch a race by slug.
    pub async fn get_race_by_slug(&self, slug: &str) -> Result<Option<Race>, AppError> {
        match &self.backend {
            Backend::Rest(client) => {
                let rows: Vec<Race> = client
                    .select(tables::RACES, &[eq("slug", slug), ("limit", "1".to_string())])
                    .await
                    .map_err(store_error)?;
                Ok(rows.into_iter().next())
            }
            Backend::Memory(tables) => Ok(tables.read().await.race_by_slug(slug).cloned()),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Fetch a race by numeric ID.
    pub async fn get_race_by_id(&self, id: i64) -> Result<Option<Race>, AppError> {
        match &self.backend {
            Backend::Rest(client) => {
                let rows: Vec<Race> = client
                    .select(tables::RACES, &[eq("id", id), ("limit", "1".to_string())])
                    .await
                    .map_err(store_error)?;
                Ok(rows.into_iter().next())
            }
            Backend::Memory(tables) => Ok(tables.read().await.race_by_id(id).cloned()),
            Backend::Offline => Err(Self::offline()),
        }
    }

    // ─── Comment Operations ──────────────────────────────────────

    /// Comments for a race, newest first.
    pub async fn get_comments_for_race(&self, race_id: i64) -> Result<Vec<Comment>, AppError> {
        match &self.backend {
            Backend::Rest(client) => client
                .select(
                    tables::COMMENTS,
                    &[
                        eq("race_id", race_id),
                        ("order", "created_at.desc,id.desc".to_string()),
                    ],
                )
                .await
                .map_err(store_error),
            Backend::Memory(tables) => Ok(tables.read().await.comments_for_race(race_id)),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Insert a comment and return the stored row.
    pub async fn insert_comment(&self, comment: &Comment) -> Result<Comment, AppError> {
        let result = match &self.backend {
            Backend::Rest(client) => {
                let rows: Vec<Comment> = client
                    .insert_returning(tables::COMMENTS, comment)
                    .await
                    .map_err(|e| match e {
                        RestError::UniqueViolation(_) => AppError::AlreadyCommented,
                        other => store_error(other),
                    })?;
                // Some policies hide inserted rows; fall back to what was sent.
                Ok(rows.into_iter().next().unwrap_or_else(|| comment.clone()))
            }
            Backend::Memory(tables) => tables
                .write()
                .await
                .insert_comment(comment)
                .map_err(|UniqueViolation| AppError::AlreadyCommented),
            Backend::Offline => Err(Self::offline()),
        };

        if result.is_ok() {
            tracing::info!(race_id = comment.race_id, "Comment stored");
        }
        result
    }

    // ─── Newsletter Operations ───────────────────────────────────

    /// Insert a newsletter subscriber.
    pub async fn insert_subscriber(&self, subscriber: &Subscriber) -> Result<(), AppError> {
        match &self.backend {
            Backend::Rest(client) => client
                .insert(tables::NEWSLETTER_SUBSCRIBERS, subscriber)
                .await
                .map_err(|e| match e {
                    RestError::UniqueViolation(_) => AppError::AlreadySubscribed,
                    other => store_error(other),
                }),
            Backend::Memory(tables) => tables
                .write()
                .await
                .insert_subscriber(subscriber)
                .map_err(|UniqueViolation| AppError::AlreadySubscribed),
            Backend::Offline => Err(Self::offline()),
        }
    }

    /// Number of stored subscribers (in-memory backend only).
    pub async fn subscriber_count(&self) -> Option<usize> {
        match &self.backend {
            Backend::Memory(tables) => Some(tables.read().await.subscribers().len()),
            _ => None,
        }
    }
}

fn store_error(err: RestError) -> AppError {
    AppError::Database(err.to_string())
}
