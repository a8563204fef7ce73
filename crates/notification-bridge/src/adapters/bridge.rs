//! # Bridge Lifecycle Manager
//!
//! Pairs a command channel and an event channel with the host runtime and
//! connects them to the [`DistributionSink`].
//!
//! ```text
//!                 on_attached_to_engine(binding)
//!   ┌────────────┐ ─────────────────────────────► ┌──────────┐
//!   │ Unattached │                                │ Attached │
//!   └────────────┘ ◄───────────────────────────── └──────────┘
//!                 on_detached_from_engine()
//!
//!   Attached:   command channel ──► on_method_call  ──► NotImplemented
//!               event channel   ──► on_listen(sink) ──► DistributionSink::attach
//!                               ──► on_cancel       ──► DistributionSink::detach
//!   any state:  OS bus record   ──► Extractor ──► DistributionSink::send
//! ```
//!
//! Detaching clears both handlers and drops every reference taken from the
//! host (channels, messenger, application context). Attach and detach run
//! under a transition lock, so every registration is paired with exactly one
//! teardown even when the host calls them from several threads. The state
//! mutex itself is never held while calling into the messenger.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::adapters::channels::{ApplicationContext, EventChannel, MethodChannel, PluginBinding};
use crate::adapters::listener::NotificationListenerService;
use crate::config::BridgeConfig;
use crate::domain::{Extractor, RawNotificationRecord};
use crate::metrics::PipelineMetrics;
use crate::ports::{EventSink, MethodCall, MethodCallHandler, MethodResult, NotificationListener, StreamHandler};
use crate::service::DistributionSink;

/// Observable lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BridgeLifecycle {
    Unattached,
    Attached,
}

/// Everything the bridge holds while attached to a host runtime.
struct Attachment {
    context: ApplicationContext,
    method_channel: MethodChannel,
    event_channel: EventChannel,
}

impl Attachment {
    /// Unregister both handlers from the messenger.
    fn release(&self) {
        self.method_channel.set_method_call_handler(None);
        self.event_channel.set_stream_handler(None);
    }
}

/// The bridge between the host runtime and the notification pipeline.
pub struct NotificationsBridge {
    config: BridgeConfig,
    listener: NotificationListenerService,
    sink: Arc<DistributionSink>,
    attachment: Mutex<Option<Attachment>>,
    transition: Mutex<()>,
}

impl NotificationsBridge {
    /// Build a bridge with its own sink and extractor.
    pub fn new(config: BridgeConfig) -> Arc<Self> {
        let metrics = Arc::new(PipelineMetrics::new());
        let extractor = Arc::new(Extractor::new(config.extractor.clone(), metrics.clone()));
        let sink = Arc::new(DistributionSink::new(metrics));
        Self::with_components(config, extractor, sink)
    }

    /// Build a bridge around an existing extractor and sink.
    pub fn with_components(
        config: BridgeConfig,
        extractor: Arc<Extractor>,
        sink: Arc<DistributionSink>,
    ) -> Arc<Self> {
        Arc::new(Self {
            listener: NotificationListenerService::new(extractor, sink.clone()),
            config,
            sink,
            attachment: Mutex::new(None),
            transition: Mutex::new(()),
        })
    }

    /// Create both channels on the binding's messenger and register this
    /// bridge as their handler.
    ///
    /// Attaching while already attached tears the previous attachment down
    /// first.
    pub fn on_attached_to_engine(self: &Arc<Self>, binding: PluginBinding) {
        let _transition = self.transition.lock();

        let previous = self.attachment.lock().take();
        if let Some(previous) = previous {
            warn!(
                app = %previous.context.package_name,
                "Bridge attached while already attached, releasing previous engine"
            );
            previous.release();
        }

        let method_channel =
            MethodChannel::new(binding.messenger.clone(), self.config.method_channel.as_str());
        method_channel.set_method_call_handler(Some(self.clone() as Arc<dyn MethodCallHandler>));

        let event_channel =
            EventChannel::new(binding.messenger.clone(), self.config.event_channel.as_str());
        event_channel.set_stream_handler(Some(self.clone() as Arc<dyn StreamHandler>));

        info!(
            app = %binding.application_context.package_name,
            method_channel = %method_channel.name(),
            event_channel = %event_channel.name(),
            "Bridge attached to engine"
        );

        *self.attachment.lock() = Some(Attachment {
            context: binding.application_context,
            method_channel,
            event_channel,
        });
    }

    /// Unregister both handlers and release every host reference.
    ///
    /// No-op when not attached.
    pub fn on_detached_from_engine(&self) {
        let _transition = self.transition.lock();

        let attachment = self.attachment.lock().take();
        let Some(attachment) = attachment else {
            debug!("Detach from engine requested while unattached");
            return;
        };

        attachment.release();

        info!(app = %attachment.context.package_name, "Bridge detached from engine");
    }

    pub fn lifecycle(&self) -> BridgeLifecycle {
        if self.is_attached() {
            BridgeLifecycle::Attached
        } else {
            BridgeLifecycle::Unattached
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.lock().is_some()
    }

    /// Cached application context while attached.
    pub fn application_context(&self) -> Option<ApplicationContext> {
        self.attachment.lock().as_ref().map(|a| a.context.clone())
    }

    /// Listener adapter for the OS bus, sharing this bridge's sink.
    pub fn listener(&self) -> NotificationListenerService {
        self.listener.clone()
    }

    pub fn sink(&self) -> &Arc<DistributionSink> {
        &self.sink
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }
}

impl MethodCallHandler for NotificationsBridge {
    fn on_method_call(&self, call: &MethodCall) -> MethodResult {
        debug!(method = %call.method, "Command received, no commands are defined");
        MethodResult::NotImplemented
    }
}

impl StreamHandler for NotificationsBridge {
    fn on_listen(&self, _arguments: Option<Value>, events: Arc<dyn EventSink>) {
        self.sink.attach(events);
    }

    fn on_cancel(&self, _arguments: Option<Value>) {
        self.sink.detach();
    }
}

impl NotificationListener for NotificationsBridge {
    fn on_notification_posted(&self, record: RawNotificationRecord) {
        self.listener.on_notification_posted(record);
    }
}
