//! Error types for the notification bridge
//!
//! None of these errors ever leave the core entry points: extraction and
//! delivery faults are logged and converted into dropped events. They exist so
//! that the internal paths can use `?` and so that logs carry a stable label.

use std::any::Any;

use thiserror::Error;

/// Errors raised while turning a raw record into a [`NotificationEvent`].
///
/// [`NotificationEvent`]: crate::domain::NotificationEvent
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Notification payload missing for package: {package}")]
    MissingNotification { package: String },

    #[error("Notification extras missing for package: {package}")]
    MissingExtras { package: String },

    #[error("Extras lookup failed for key {key}: {reason}")]
    Lookup { key: String, reason: String },

    #[error("Extras value for key {key} is not text: found {found}")]
    Malformed { key: String, found: &'static str },

    #[error("Extras access panicked: {0}")]
    Panicked(String),

    #[error("Notification has neither title nor message")]
    EmptyContent,
}

impl ExtractionError {
    /// Short stable label for structured logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ExtractionError::MissingNotification { .. } => "missing_notification",
            ExtractionError::MissingExtras { .. } => "missing_extras",
            ExtractionError::Lookup { .. } => "extras_lookup_failed",
            ExtractionError::Malformed { .. } => "extras_malformed",
            ExtractionError::Panicked(_) => "extras_panicked",
            ExtractionError::EmptyContent => "empty_content",
        }
    }

    /// Whether the record simply lacked data, as opposed to faulting.
    pub fn is_absent_data(&self) -> bool {
        matches!(
            self,
            ExtractionError::MissingNotification { .. } | ExtractionError::MissingExtras { .. }
        )
    }
}

/// Errors raised by a subscriber handle while accepting a payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("Subscriber rejected event ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("Subscriber stream closed")]
    Closed,

    #[error("Subscriber panicked: {0}")]
    Panicked(String),
}

impl DeliveryError {
    /// Short stable label for structured logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            DeliveryError::Rejected { .. } => "delivery_rejected",
            DeliveryError::Closed => "delivery_closed",
            DeliveryError::Panicked(_) => "delivery_panicked",
        }
    }
}

/// Errors surfaced to the host side of the in-memory transport.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BridgeError {
    #[error("No handler registered on channel: {channel}")]
    NoHandler { channel: String },
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Channel name must not be empty: {0}")]
    EmptyChannelName(&'static str),

    #[error("Command and event channels must differ: {0}")]
    DuplicateChannelName(String),

    #[error("Extras key must not be empty: {0}")]
    EmptyExtrasKey(&'static str),

    #[error("Unknown extras key preset: {0} (expected plain or android)")]
    UnknownKeyPreset(String),
}

/// Render a caught panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
