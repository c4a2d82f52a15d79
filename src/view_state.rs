// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Directory page view state with pure reducer transitions.
//!
//! The frontend keeps one `ViewState` and feeds it `Action`s; every
//! transition returns a new state. The filter part is the same `FilterSpec`
//! the `/api/races` endpoint accepts.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::services::calendar::{toggle_day, MonthCursor};
use crate::services::race_filter::{FilterSpec, SortKey, MAX_SLIDER_DISTANCE};

/// Regions that swallow pointer interactions instead of dismissing popovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiRegion {
    RegionDropdown,
    DayPanel,
}

/// Calendar part of the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarView {
    pub cursor: MonthCursor,
    /// Day whose detail panel is open
    pub active_day: Option<NaiveDate>,
}

/// Message shown under a form after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum FormMessage {
    Success(String),
    Error(String),
}

/// Submission state of a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub submitting: bool,
    pub message: Option<FormMessage>,
}

impl FormState {
    fn submit(self) -> Self {
        if self.submitting {
            return self;
        }
        Self {
            submitting: true,
            message: None,
        }
    }

    fn finish(message: FormMessage) -> Self {
        Self {
            submitting: false,
            message: Some(message),
        }
    }
}

/// The whole directory page state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub filter: FilterSpec,
    pub region_dropdown_open: bool,
    pub mobile_filter_open: bool,
    pub calendar_open: bool,
    pub calendar: CalendarView,
    pub comment_form: FormState,
    pub newsletter_form: FormState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetQuery { query: String },
    SetDistanceRange { min: f64, max: f64 },
    SetStartDate { date: Option<NaiveDate> },
    SetEndDate { date: Option<NaiveDate> },
    ToggleRegion { region: String },
    ToggleUpcoming,
    SetSort { sort: SortKey },
    SetPage { page: usize },
    ResetFilters,
    ToggleRegionDropdown,
    ToggleMobileFilter,
    ToggleCalendar,
    PreviousMonth,
    NextMonth,
    CurrentMonth { today: NaiveDate },
    SelectDay { date: NaiveDate },
    CloseDay,
    /// Pointer down anywhere; `inside` names the registered region hit, if any.
    Interaction { inside: Option<UiRegion> },
    SubmitComment,
    CommentSucceeded { message: String },
    CommentFailed { message: String },
    SubmitNewsletter,
    NewsletterSucceeded { message: String },
    NewsletterFailed { message: String },
}

impl ViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            filter: FilterSpec::default(),
            region_dropdown_open: false,
            mobile_filter_open: false,
            calendar_open: false,
            calendar: CalendarView {
                cursor: MonthCursor::today(today),
                active_day: None,
            },
            comment_form: FormState::default(),
            newsletter_form: FormState::default(),
        }
    }

    /// Apply one action.
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::SetQuery { query } => {
                self.filter.query = query;
                self.filter.page = 1;
            }
            Action::SetDistanceRange { min, max } => {
                let min = if min.is_finite() {
                    min.clamp(0.0, MAX_SLIDER_DISTANCE)
                } else {
                    0.0
                };
                let max = if max.is_finite() {
                    max.clamp(min, MAX_SLIDER_DISTANCE)
                } else {
                    MAX_SLIDER_DISTANCE
                };
                self.filter.min_distance = min;
                self.filter.max_distance = max;
                self.filter.page = 1;
            }
            Action::SetStartDate { date } => {
                self.filter.start_date = date;
                self.filter.page = 1;
            }
            Action::SetEndDate { date } => {
                self.filter.end_date = date;
                self.filter.page = 1;
            }
            Action::ToggleRegion { region } => {
                if !self.filter.regions.remove(&region) {
                    self.filter.regions.insert(region);
                }
                self.filter.page = 1;
            }
            Action::ToggleUpcoming => {
                self.filter.only_upcoming = !self.filter.only_upcoming;
                self.filter.page = 1;
            }
            Action::SetSort { sort } => {
                self.filter.sort = sort;
                self.filter.page = 1;
            }
            Action::SetPage { page } => {
                self.filter.page = page.max(1);
            }
            Action::ResetFilters => {
                // Upcoming-only and sort order survive a reset.
                self.filter = FilterSpec {
                    only_upcoming: self.filter.only_upcoming,
                    sort: self.filter.sort,
                    ..FilterSpec::default()
                };
            }
            Action::ToggleRegionDropdown => {
                self.region_dropdown_open = !self.region_dropdown_open;
            }
            Action::ToggleMobileFilter => {
                self.mobile_filter_open = !self.mobile_filter_open;
            }
            Action::ToggleCalendar => {
                self.calendar_open = !self.calendar_open;
                self.calendar.active_day = None;
            }
            Action::PreviousMonth => {
                self.calendar.cursor = self.calendar.cursor.previous();
                self.calendar.active_day = None;
            }
            Action::NextMonth => {
                self.calendar.cursor = self.calendar.cursor.next();
                self.calendar.active_day = None;
            }
            Action::CurrentMonth { today } => {
                self.calendar.cursor = MonthCursor::today(today);
                self.calendar.active_day = None;
            }
            Action::SelectDay { date } => {
                self.calendar.active_day = toggle_day(self.calendar.active_day, date);
            }
            Action::CloseDay => {
                self.calendar.active_day = None;
            }
            Action::Interaction { inside } => {
                if inside != Some(UiRegion::RegionDropdown) {
                    self.region_dropdown_open = false;
                }
                if inside != Some(UiRegion::DayPanel) {
                    self.calendar.active_day = None;
                }
            }
            Action::SubmitComment => {
                self.comment_form = self.comment_form.submit();
            }
            Action::CommentSucceeded { message } => {
                self.comment_form = FormState::finish(FormMessage::Success(message));
            }
            Action::CommentFailed { message } => {
                self.comment_form = FormState::finish(FormMessage::Error(message));
            }
            Action::SubmitNewsletter => {
                self.newsletter_form = self.newsletter_form.submit();
            }
            Action::NewsletterSucceeded { message } => {
                self.newsletter_form = FormState::finish(FormMessage::Success(message));
            }
            Action::NewsletterFailed { message } => {
                self.newsletter_form = FormState::finish(FormMessage::Error(message));
            }
        }
        self
    }
}
