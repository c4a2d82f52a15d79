// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Langeløp: a directory of ultra-running races in Norway
//!
//! This crate provides the backend API for the race directory, the race
//! calendar, race comments, newsletter signups and the article section.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;
pub mod view_state;

use config::Config;
use db::RaceDb;
use services::ArticleService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: RaceDb,
    pub article_service: ArticleService,
}
