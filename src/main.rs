// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Langeløp API Server
//!
//! Serves the ultra-running race directory, calendar, comments, newsletter
//! signups and articles on top of the hosted data store.

use langelop::{config::Config, db::RaceDb, services::ArticleService, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Langeløp API");

    // Data store (hosted REST API, or in-memory without credentials)
    let db = RaceDb::from_config(&config)?;

    // Load article catalog
    tracing::info!(path = %config.articles_path, "Loading articles");
    let article_service = ArticleService::load_from_file(&config.articles_path)?;
    tracing::info!(
        count = article_service.articles().len(),
        "Article catalog loaded"
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        article_service,
    });

    // Build router
    let app = langelop::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("langelop=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
