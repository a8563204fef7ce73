//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - OS bus listener, command and stream handlers
//! - Driven Ports (outbound) - subscriber delivery handle, host messenger

pub mod inbound;
pub mod outbound;

pub use inbound::{MethodCall, MethodCallHandler, MethodResult, NotificationListener, StreamHandler};
pub use outbound::{BinaryMessenger, EventSink};
