// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Static article catalog, loaded once at startup.

use crate::models::Article;
use std::fs;
use std::path::Path;

/// Service holding the article catalog in publication order.
#[derive(Default, Clone)]
pub struct ArticleService {
    articles: Vec<Article>,
}

impl ArticleService {
    /// Load articles from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArticleError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| ArticleError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load articles from a JSON array.
    pub fn load_from_json(json_data: &str) -> Result<Self, ArticleError> {
        let articles: Vec<Article> = serde_json::from_str(json_data)
            .map_err(|e| ArticleError::ParseError(e.to_string()))?;

        let mut seen = std::collections::HashSet::new();
        for article in &articles {
            if article.slug.trim().is_empty() {
                return Err(ArticleError::InvalidSlug(article.title.clone()));
            }
            if !seen.insert(article.slug.as_str()) {
                return Err(ArticleError::DuplicateSlug(article.slug.clone()));
            }
        }

        tracing::info!(count = articles.len(), "Loaded articles");
        Ok(Self { articles })
    }

    /// All articles in catalog order.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Find an article by slug.
    pub fn find(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }
}

/// Errors from loading the article catalog.
#[derive(Debug, thiserror::Error)]
pub enum ArticleError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse articles: {0}")]
    ParseError(String),

    #[error("Article has an empty slug: {0}")]
    InvalidSlug(String),

    #[error("Duplicate article slug: {0}")]
    DuplicateSlug(String),
}
