// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod article;
pub mod calendar;
pub mod race_filter;

pub use article::{ArticleError, ArticleService};
pub use calendar::{build_month, index_events_by_day, MonthCursor, MonthGrid, PanelPlacement};
pub use race_filter::{filter_and_sort, paginate, FilterSpec, SortKey};
