//! Database layer (hosted data store).

pub mod memory;
pub mod rest;
pub mod store;

pub use store::RaceDb;

/// Table names as constants.
pub mod tables {
    pub const RACES: &str = "races";
    pub const COMMENTS: &str = "comments";
    pub const NEWSLETTER_SUBSCRIBERS: &str = "newsletter_subscribers";
}
