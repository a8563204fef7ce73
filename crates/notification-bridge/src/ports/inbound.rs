//! Inbound Ports (Driving Ports)
//!
//! Calls that arrive at the bridge from outside: records from the OS bus,
//! commands on the command channel, and subscribe/unsubscribe on the event
//! channel. Implementations must return normally for any input.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::RawNotificationRecord;
use crate::ports::outbound::EventSink;

/// Capability the OS notification bus pushes records into.
///
/// Called on the bus's own thread; must never block.
pub trait NotificationListener: Send + Sync {
    /// A notification was posted.
    fn on_notification_posted(&self, record: RawNotificationRecord);

    /// A notification was removed. Nothing is forwarded for removals.
    fn on_notification_removed(&self, _record: RawNotificationRecord) {}
}

/// A command received on the command channel.
#[derive(Clone, Debug, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub arguments: Option<Value>,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Option<Value>) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Reply to a [`MethodCall`].
#[derive(Clone, Debug, PartialEq)]
pub enum MethodResult {
    Success(Value),
    Error {
        code: String,
        message: Option<String>,
        details: Option<Value>,
    },
    /// The handler does not know the method
    NotImplemented,
}

/// Handler for the command channel.
pub trait MethodCallHandler: Send + Sync {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult;
}

/// Handler for the event channel's subscribe/unsubscribe calls.
pub trait StreamHandler: Send + Sync {
    /// A subscriber connected; `events` is its delivery handle.
    fn on_listen(&self, arguments: Option<Value>, events: Arc<dyn EventSink>);

    /// The subscriber disconnected.
    fn on_cancel(&self, arguments: Option<Value>);
}
