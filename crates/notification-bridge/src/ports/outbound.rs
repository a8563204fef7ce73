//! Outbound Ports (Driven Ports)
//!
//! What the bridge needs from the host runtime: a delivery handle for the
//! subscriber and a messenger on which channel handlers are registered.

use std::sync::Arc;

use crate::domain::EventPayload;
use crate::error::DeliveryError;
use crate::ports::inbound::{MethodCallHandler, StreamHandler};

/// Delivery handle of the currently connected subscriber.
///
/// `success` is invoked on the producer's thread, outside any lock held by
/// the bridge. A slow implementation slows the producer; it never stalls
/// attach/detach.
pub trait EventSink: Send + Sync {
    /// Accept one payload.
    fn success(&self, payload: EventPayload) -> Result<(), DeliveryError>;
}

/// Host-runtime transport on which channel handlers are registered.
///
/// Passing `None` unregisters the handler for that channel.
pub trait BinaryMessenger: Send + Sync {
    fn set_method_call_handler(&self, channel: &str, handler: Option<Arc<dyn MethodCallHandler>>);

    fn set_stream_handler(&self, channel: &str, handler: Option<Arc<dyn StreamHandler>>);
}
