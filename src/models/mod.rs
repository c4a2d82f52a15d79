// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod article;
pub mod comment;
pub mod race;
pub mod subscriber;

pub use article::Article;
pub use comment::{Comment, CommentThread, NewComment};
pub use race::{Race, StatusKind, StatusNote};
pub use subscriber::NewSubscriber;
