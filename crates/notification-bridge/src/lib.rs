//! # Notification Bridge
//!
//! Extracts notification-posted events from an OS notification bus and
//! forwards them to at most one subscriber connected through a host runtime's
//! command/event channel pair.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): records, events, `Extractor`
//! - **Ports Layer** (`ports/`): `NotificationListener`, `StreamHandler`,
//!   `MethodCallHandler` (driving); `EventSink`, `BinaryMessenger` (driven)
//! - **Service Layer** (`service/`): `DistributionSink` and its `SubscriberSlot`
//! - **Adapters Layer** (`adapters/`): `NotificationsBridge`,
//!   `NotificationListenerService`, channels, in-memory messenger, channel sink
//!
//! ```text
//! OS bus ──record──► NotificationListenerService ──► Extractor
//!                                                       │
//!                                       None ◄──────────┤
//!                                                       ▼
//!                    NotificationsBridge ──attach──► DistributionSink ──► subscriber
//!                    (event channel)     ──detach──►
//! ```
//!
//! ## Invariants
//!
//! - A `NotificationEvent` always has a non-empty title or message.
//! - At most one subscriber is attached; the last attach wins.
//! - No core entry point fails or panics outward: faults become log lines.
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use notification_bridge::{
//!     ApplicationContext, BridgeConfig, ChannelEventSink, InMemoryMessenger,
//!     NotificationListener, NotificationsBridge, PluginBinding, RawNotificationRecord,
//!     EVENT_CHANNEL,
//! };
//!
//! let messenger = Arc::new(InMemoryMessenger::new());
//! let bridge = NotificationsBridge::new(BridgeConfig::default());
//! bridge.on_attached_to_engine(PluginBinding::new(
//!     ApplicationContext::new("com.example.host"),
//!     messenger.clone(),
//! ));
//!
//! let (sink, _stream) = ChannelEventSink::new();
//! messenger.listen(EVENT_CHANNEL, None, Arc::new(sink)).unwrap();
//!
//! let listener = bridge.listener();
//! listener.on_notification_posted(RawNotificationRecord::from_json_extras(
//!     "com.a",
//!     serde_json::json!({"title": "T"}),
//!     1000,
//! ));
//! assert_eq!(bridge.sink().metrics().snapshot().events_delivered, 1);
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{
    ApplicationContext, BridgeLifecycle, ChannelEventSink, EventChannel, EventPayloadStream,
    InMemoryMessenger, MethodChannel, NotificationListenerService, NotificationsBridge,
    PluginBinding,
};
pub use config::{BridgeConfig, ExtractorConfig, EVENT_CHANNEL, METHOD_CHANNEL};
pub use domain::{
    EventPayload, Extractor, NotificationContent, NotificationEvent, NotificationExtras,
    RawNotificationRecord,
};
pub use error::{BridgeError, ConfigError, DeliveryError, ExtractionError};
pub use metrics::{MetricsSnapshot, PipelineMetrics};
pub use ports::{
    BinaryMessenger, EventSink, MethodCall, MethodCallHandler, MethodResult,
    NotificationListener, StreamHandler,
};
pub use service::{DistributionSink, SubscriberSlot, SubscriptionId};
