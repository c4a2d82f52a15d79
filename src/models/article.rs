// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Article model for the static article section.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One article from the static catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Article {
    pub slug: String,
    pub title: String,
    /// Publication day (`YYYY-MM-DD`)
    pub date: String,
    pub author: String,
    pub excerpt: String,
    #[serde(default)]
    pub image: Option<String>,
    /// CSS object-position for the list thumbnail
    #[serde(default)]
    pub focus_list: Option<String>,
    /// CSS object-position for the article hero image
    #[serde(default)]
    pub focus_article: Option<String>,
    #[serde(default)]
    pub ingress: Option<String>,
    /// Markdown source, rendered by the frontend
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Site-relative link to the article page.
    pub fn href(&self) -> String {
        format!("/artikler/{}", urlencoding::encode(&self.slug))
    }
}
