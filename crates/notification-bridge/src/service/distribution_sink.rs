//! # Distribution Sink
//!
//! At-most-one-subscriber delivery target for normalized events.
//!
//! ```text
//!  host thread                       bus thread
//!  attach(h) ──┐                 ┌── send(event)
//!  detach()  ──┼─► SubscriberSlot ◄┘   │ clone current handle (under lock)
//!              │   Mutex<Option<_>>    │ release lock
//!                                      ▼
//!                                 handle.success(payload)
//! ```
//!
//! ## Rules
//! - Last attach wins; a superseded handle is dropped silently.
//! - `send` reads the slot once. No lock is held while the subscriber runs.
//! - No subscriber: the event is discarded (no queue, no replay).
//! - Delivery faults (error or panic) are logged; the subscriber stays attached.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, trace};
use uuid::Uuid;

use crate::domain::{EventPayload, NotificationEvent};
use crate::error::{panic_message, DeliveryError};
use crate::metrics::PipelineMetrics;
use crate::ports::EventSink;

/// Identifier of one attach, used to correlate log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone)]
struct Subscriber {
    id: SubscriptionId,
    handle: Arc<dyn EventSink>,
}

/// Holds zero or one subscriber handle.
#[derive(Default)]
pub struct SubscriberSlot {
    current: Mutex<Option<Subscriber>>,
}

impl SubscriberSlot {
    fn replace(&self, subscriber: Subscriber) -> Option<Subscriber> {
        self.current.lock().replace(subscriber)
    }

    fn take(&self) -> Option<Subscriber> {
        self.current.lock().take()
    }

    fn current(&self) -> Option<Subscriber> {
        self.current.lock().clone()
    }

    pub fn is_occupied(&self) -> bool {
        self.current.lock().is_some()
    }
}

/// Forwards events to the attached subscriber, if any.
pub struct DistributionSink {
    slot: SubscriberSlot,
    metrics: Arc<PipelineMetrics>,
}

impl Default for DistributionSink {
    fn default() -> Self {
        Self::new(Arc::new(PipelineMetrics::new()))
    }
}

impl DistributionSink {
    pub fn new(metrics: Arc<PipelineMetrics>) -> Self {
        Self {
            slot: SubscriberSlot::default(),
            metrics,
        }
    }

    /// Attach `handle`, replacing any previous subscriber.
    pub fn attach(&self, handle: Arc<dyn EventSink>) {
        let id = SubscriptionId::new();
        let previous = self.slot.replace(Subscriber { id, handle });

        match previous {
            Some(old) => debug!(
                subscription = %id,
                superseded = %old.id,
                "Subscriber attached, previous subscriber superseded"
            ),
            None => info!(subscription = %id, "Subscriber attached"),
        }
    }

    /// Clear the current subscriber. No-op when none is attached.
    pub fn detach(&self) {
        match self.slot.take() {
            Some(old) => info!(subscription = %old.id, "Subscriber detached"),
            None => debug!("Detach requested with no subscriber attached"),
        }
    }

    /// Deliver `event` to the attached subscriber, or discard it.
    pub fn send(&self, event: NotificationEvent) {
        let Some(subscriber) = self.slot.current() else {
            PipelineMetrics::incr(&self.metrics.events_discarded);
            trace!(package = %event.package_id(), "No subscriber attached, event discarded");
            return;
        };

        let package = event.package_id().to_string();
        let payload = EventPayload::from(event);

        let result = panic::catch_unwind(AssertUnwindSafe(|| subscriber.handle.success(payload)))
            .unwrap_or_else(|p| Err(DeliveryError::Panicked(panic_message(p.as_ref()))));

        match result {
            Ok(()) => PipelineMetrics::incr(&self.metrics.events_delivered),
            Err(e) => {
                PipelineMetrics::incr(&self.metrics.delivery_failures);
                error!(
                    subscription = %subscriber.id,
                    package = %package,
                    reason = e.as_label(),
                    error = %e,
                    "Error sending notification event"
                );
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        self.slot.is_occupied()
    }

    /// Id of the current subscription, if any.
    pub fn subscription_id(&self) -> Option<SubscriptionId> {
        self.slot.current().map(|s| s.id)
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.metrics
    }
}
