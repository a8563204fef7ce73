//! Pipeline counters
//!
//! Thread-safe counters shared by the extractor and the distribution sink.
//! The bus thread and the host thread both update them, so every field is an
//! atomic and `snapshot()` takes a relaxed, point-in-time copy.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Counters for the extraction and distribution pipeline.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Raw records handed to the extractor
    pub records_received: AtomicU64,
    /// Records that produced an event
    pub events_extracted: AtomicU64,
    /// Records dropped because title and message were both empty
    pub records_without_content: AtomicU64,
    /// Records dropped because the payload or extras bundle was absent
    pub records_missing_extras: AtomicU64,
    /// Records dropped because reading the extras faulted
    pub extraction_failures: AtomicU64,
    /// Events accepted by the subscriber
    pub events_delivered: AtomicU64,
    /// Events discarded because nobody was subscribed
    pub events_discarded: AtomicU64,
    /// Events the subscriber rejected or panicked on
    pub delivery_failures: AtomicU64,
}

/// Point-in-time copy of [`PipelineMetrics`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub records_received: u64,
    pub events_extracted: u64,
    pub records_without_content: u64,
    pub records_missing_extras: u64,
    pub extraction_failures: u64,
    pub events_delivered: u64,
    pub events_discarded: u64,
    pub delivery_failures: u64,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn incr(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Copy all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_received: self.records_received.load(Ordering::Relaxed),
            events_extracted: self.events_extracted.load(Ordering::Relaxed),
            records_without_content: self.records_without_content.load(Ordering::Relaxed),
            records_missing_extras: self.records_missing_extras.load(Ordering::Relaxed),
            extraction_failures: self.extraction_failures.load(Ordering::Relaxed),
            events_delivered: self.events_delivered.load(Ordering::Relaxed),
            events_discarded: self.events_discarded.load(Ordering::Relaxed),
            delivery_failures: self.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

impl MetricsSnapshot {
    /// Records that did not turn into an event, for any reason.
    pub fn records_dropped(&self) -> u64 {
        self.records_without_content + self.records_missing_extras + self.extraction_failures
    }
}
