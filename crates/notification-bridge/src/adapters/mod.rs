//! Adapters Layer
//!
//! Connects the pipeline to the host runtime and the OS bus.
//!
//! ## Adapters
//!
//! - `NotificationsBridge` - lifecycle manager for the command/event channel pair
//! - `NotificationListenerService` - OS bus listener feeding the shared sink
//! - `MethodChannel` / `EventChannel` - named channels on a host messenger
//! - `InMemoryMessenger` - in-process host messenger
//! - `ChannelEventSink` - subscriber handle backed by a tokio channel

pub mod bridge;
pub mod channel_sink;
pub mod channels;
pub mod listener;
pub mod messenger;

pub use bridge::{BridgeLifecycle, NotificationsBridge};
pub use channel_sink::{ChannelEventSink, EventPayloadStream};
pub use channels::{ApplicationContext, EventChannel, MethodChannel, PluginBinding};
pub use listener::NotificationListenerService;
pub use messenger::InMemoryMessenger;
