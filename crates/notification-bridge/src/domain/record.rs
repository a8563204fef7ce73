//! Raw notification records as pushed by the OS notification bus
//!
//! A record is read-only input. The extras mapping sits behind the
//! [`NotificationExtras`] trait because the platform bundle can fault on
//! access; the extractor treats any such fault as "no event".

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::ExtractionError;

/// Fallible key lookup over a notification's extras mapping.
pub trait NotificationExtras: Send + Sync + fmt::Debug {
    /// Look up a single key. `Ok(None)` means the key is absent.
    fn lookup(&self, key: &str) -> Result<Option<Value>, ExtractionError>;
}

impl NotificationExtras for Map<String, Value> {
    fn lookup(&self, key: &str) -> Result<Option<Value>, ExtractionError> {
        Ok(self.get(key).cloned())
    }
}

impl NotificationExtras for HashMap<String, Value> {
    fn lookup(&self, key: &str) -> Result<Option<Value>, ExtractionError> {
        Ok(self.get(key).cloned())
    }
}

/// The notification object attached to a record.
#[derive(Clone, Debug, Default)]
pub struct NotificationContent {
    /// Extras bundle; `None` when the platform delivered no bundle.
    pub extras: Option<Arc<dyn NotificationExtras>>,
}

impl NotificationContent {
    /// Content carrying the given extras mapping.
    pub fn with_extras(extras: impl NotificationExtras + 'static) -> Self {
        Self {
            extras: Some(Arc::new(extras)),
        }
    }
}

/// Unprocessed notification as delivered by the bus.
#[derive(Clone, Debug)]
pub struct RawNotificationRecord {
    /// Identifier of the posting application.
    pub package_name: String,
    /// Notification payload; `None` when the platform delivered none.
    pub notification: Option<NotificationContent>,
    /// Post time in epoch milliseconds.
    pub post_time: i64,
}

impl RawNotificationRecord {
    /// Record with a notification payload but no extras bundle.
    pub fn new(package_name: impl Into<String>, post_time: i64) -> Self {
        Self {
            package_name: package_name.into(),
            notification: Some(NotificationContent::default()),
            post_time,
        }
    }

    /// Record whose notification payload is missing entirely.
    pub fn without_notification(package_name: impl Into<String>, post_time: i64) -> Self {
        Self {
            package_name: package_name.into(),
            notification: None,
            post_time,
        }
    }

    /// Attach an extras mapping, creating the notification payload if needed.
    #[must_use]
    pub fn with_extras(mut self, extras: impl NotificationExtras + 'static) -> Self {
        self.notification = Some(NotificationContent::with_extras(extras));
        self
    }

    /// Build a record from a JSON object of extras.
    ///
    /// Anything other than an object (including `null`) yields a record with
    /// no extras bundle.
    pub fn from_json_extras(package_name: impl Into<String>, extras: Value, post_time: i64) -> Self {
        let record = Self::new(package_name, post_time);
        match extras {
            Value::Object(map) => record.with_extras(map),
            _ => record,
        }
    }

    /// The extras bundle, if both the payload and the bundle are present.
    pub fn extras(&self) -> Result<&dyn NotificationExtras, ExtractionError> {
        let content = self
            .notification
            .as_ref()
            .ok_or_else(|| ExtractionError::MissingNotification {
                package: self.package_name.clone(),
            })?;

        content
            .extras
            .as_deref()
            .ok_or_else(|| ExtractionError::MissingExtras {
                package: self.package_name.clone(),
            })
    }
}
