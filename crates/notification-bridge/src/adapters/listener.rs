//! OS bus listener adapter
//!
//! The host instantiates this and hands it to the notification bus. It shares
//! its [`DistributionSink`] with the bridge, so records pushed here reach
//! whichever subscriber the bridge last attached. Records arriving while
//! nobody is subscribed are dropped by the sink.

use std::sync::Arc;

use crate::domain::{Extractor, RawNotificationRecord};
use crate::ports::NotificationListener;
use crate::service::DistributionSink;

/// Routes bus records through the extractor into the sink.
#[derive(Clone)]
pub struct NotificationListenerService {
    extractor: Arc<Extractor>,
    sink: Arc<DistributionSink>,
}

impl NotificationListenerService {
    pub fn new(extractor: Arc<Extractor>, sink: Arc<DistributionSink>) -> Self {
        Self { extractor, sink }
    }
}

impl NotificationListener for NotificationListenerService {
    fn on_notification_posted(&self, record: RawNotificationRecord) {
        if let Some(event) = self.extractor.extract(&record) {
            self.sink.send(event);
        }
    }
}
