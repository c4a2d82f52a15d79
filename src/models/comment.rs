// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Race comments ("erfaringer fra andre løpere").

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Comment row as stored in the `comments` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Store-assigned ID (absent until inserted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub race_id: i64,
    pub name: String,
    pub email: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Comment form submission.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewComment {
    #[validate(
        length(max = 100, message = "Navnet er for langt."),
        custom(function = "not_blank", message = "Vennligst fyll ut alle felt.")
    )]
    pub name: String,
    #[validate(email(message = "Ugyldig e-postadresse."))]
    pub email: String,
    #[validate(
        length(max = 5000, message = "Kommentaren er for lang."),
        custom(function = "not_blank", message = "Vennligst fyll ut alle felt.")
    )]
    pub comment: String,
}

impl NewComment {
    /// Build the row to insert for a race.
    pub fn into_row(self, race_id: i64, created_at: DateTime<Utc>) -> Comment {
        Comment {
            id: None,
            race_id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            comment: self.comment.trim().to_string(),
            created_at,
        }
    }
}

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Locally held comment list for one race, newest first.
///
/// New comments are prepended optimistically without re-fetching, so the
/// order matches what `created_at desc` fetches return.
#[derive(Debug, Clone, Default)]
pub struct CommentThread {
    comments: Vec<Comment>,
}

impl CommentThread {
    /// Build from fetched rows, enforcing newest-first order.
    pub fn from_fetched(mut comments: Vec<Comment>) -> Self {
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Self { comments }
    }

    /// Prepend a freshly stored comment.
    pub fn push_new(&mut self, comment: Comment) {
        self.comments.insert(0, comment);
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }
}
