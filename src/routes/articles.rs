// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Article section.

use crate::error::{AppError, Result};
use crate::models::Article;
use crate::time_utils::format_raw_date_nb;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/articles", get(list_articles))
        .route("/api/articles/{slug}", get(get_article))
}

/// Article with display fields.
#[derive(Serialize)]
pub struct ArticleView {
    #[serde(flatten)]
    pub article: Article,
    pub date_display: String,
    pub href: String,
}

impl From<&Article> for ArticleView {
    fn from(article: &Article) -> Self {
        Self {
            date_display: format_raw_date_nb(&article.date),
            href: article.href(),
            article: article.clone(),
        }
    }
}

#[derive(Serialize)]
pub struct ArticlesResponse {
    pub articles: Vec<ArticleView>,
}

async fn list_articles(State(state): State<Arc<AppState>>) -> Json<ArticlesResponse> {
    Json(ArticlesResponse {
        articles: state
            .article_service
            .articles()
            .iter()
            .map(ArticleView::from)
            .collect(),
    })
}

async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Json<ArticleView>> {
    state
        .article_service
        .find(&slug)
        .map(|a| Json(ArticleView::from(a)))
        .ok_or_else(|| AppError::NotFound(format!("Article {} not found", slug)))
}
