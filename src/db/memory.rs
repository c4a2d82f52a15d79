// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory tables for tests and local development.
//!
//! Mirrors the store's constraints that the application depends on:
//! unique `(race_id, email)` on comments and unique `email` on subscribers.

use crate::models::subscriber::Subscriber;
use crate::models::{Comment, Race};
use serde::Deserialize;
use std::path::Path;

/// Rejected insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniqueViolation;

/// Seed file layout: `{"races": [...], "comments": [...]}`.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub races: Vec<Race>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Seed {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&json)?)
    }
}

#[derive(Debug, Default)]
pub struct MemoryTables {
    races: Vec<Race>,
    comments: Vec<Comment>,
    subscribers: Vec<Subscriber>,
    next_comment_id: i64,
}

impl MemoryTables {
    pub fn from_seed(seed: Seed) -> Self {
        let next_comment_id = seed
            .comments
            .iter()
            .filter_map(|c| c.id)
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            races: seed.races,
            comments: seed.comments,
            subscribers: Vec::new(),
            next_comment_id,
        }
    }

    pub fn races(&self) -> &[Race] {
        &self.races
    }

    pub fn race_by_slug(&self, slug: &str) -> Option<&Race> {
        self.races.iter().find(|r| r.slug == slug)
    }

    pub fn race_by_id(&self, id: i64) -> Option<&Race> {
        self.races.iter().find(|r| r.id == id)
    }

    /// Comments for a race, newest first.
    pub fn comments_for_race(&self, race_id: i64) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|c| c.race_id == race_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        comments
    }

    pub fn insert_comment(&mut self, comment: &Comment) -> Result<Comment, UniqueViolation> {
        let duplicate = self
            .comments
            .iter()
            .any(|c| c.race_id == comment.race_id && c.email == comment.email);
        if duplicate {
            return Err(UniqueViolation);
        }

        let mut stored = comment.clone();
        stored.id = Some(self.next_comment_id);
        self.next_comment_id += 1;
        self.comments.push(stored.clone());
        Ok(stored)
    }

    pub fn insert_subscriber(&mut self, subscriber: &Subscriber) -> Result<(), UniqueViolation> {
        if self.subscribers.iter().any(|s| s.email == subscriber.email) {
            return Err(UniqueViolation);
        }
        self.subscribers.push(subscriber.clone());
        Ok(())
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }
}
