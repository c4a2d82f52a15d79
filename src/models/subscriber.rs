//! Newsletter subscriber model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Newsletter signup form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct NewSubscriber {
    #[validate(email(message = "Vennligst skriv inn en gyldig e-postadresse."))]
    pub email: String,
}

/// Row stored in `newsletter_subscribers`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Subscriber {
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl NewSubscriber {
    pub fn into_row(self, created_at: DateTime<Utc>) -> Subscriber {
        Subscriber {
            email: self.email.trim().to_string(),
            created_at,
        }
    }
}
