//! Normalized notification events and their outbound payload

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ExtractionError;

/// A notification worth forwarding.
///
/// INVARIANT: at least one of `title` or `message` is non-empty. Fields are
/// private so the only way to obtain an event is through [`Self::new`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationEvent {
    package_id: String,
    title: String,
    message: String,
    posted_at: i64,
}

impl NotificationEvent {
    /// Build an event, rejecting one with neither title nor message.
    pub fn new(
        package_id: impl Into<String>,
        title: impl Into<String>,
        message: impl Into<String>,
        posted_at: i64,
    ) -> Result<Self, ExtractionError> {
        let title = title.into();
        let message = message.into();
        if title.is_empty() && message.is_empty() {
            return Err(ExtractionError::EmptyContent);
        }
        Ok(Self {
            package_id: package_id.into(),
            title,
            message,
            posted_at,
        })
    }

    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Post time in epoch milliseconds.
    pub fn posted_at(&self) -> i64 {
        self.posted_at
    }
}

/// Payload handed to the subscriber.
///
/// Serializes to a mapping with exactly the keys `packageName`, `title`,
/// `message` and `timeStamp`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPayload {
    pub package_name: String,
    pub title: String,
    pub message: String,
    pub time_stamp: i64,
}

impl EventPayload {
    /// The payload as a JSON mapping.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "packageName": self.package_name,
            "title": self.title,
            "message": self.message,
            "timeStamp": self.time_stamp,
        })
    }
}

impl From<NotificationEvent> for EventPayload {
    fn from(event: NotificationEvent) -> Self {
        Self {
            package_name: event.package_id,
            title: event.title,
            message: event.message,
            time_stamp: event.posted_at,
        }
    }
}
