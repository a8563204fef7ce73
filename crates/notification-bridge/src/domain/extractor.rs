//! Extraction of normalized events from raw records
//!
//! ```text
//! record ──► extras? ──no──► warn, None
//!              │
//!              ▼
//!   title  = extras[title_key]           (or "")
//!   text   = extras[text_key]            (or "")
//!   text   = extras[big_text_key] if text is empty
//!              │
//!              ▼
//!   title and text empty? ──yes──► debug, None
//!              │
//!              ▼
//!        NotificationEvent
//! ```
//!
//! Faults while reading the extras (lookup errors, non-text values, panics in
//! the bundle implementation) are logged at error level and yield `None`, so
//! one malformed notification never disturbs the ones after it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::config::ExtractorConfig;
use crate::domain::event::NotificationEvent;
use crate::domain::record::{NotificationExtras, RawNotificationRecord};
use crate::error::{panic_message, ExtractionError};
use crate::metrics::PipelineMetrics;

/// Turns raw records into [`NotificationEvent`]s.
#[derive(Debug)]
pub struct Extractor {
    config: ExtractorConfig,
    metrics: Arc<PipelineMetrics>,
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new(ExtractorConfig::default(), Arc::new(PipelineMetrics::new()))
    }
}

impl Extractor {
    pub fn new(config: ExtractorConfig, metrics: Arc<PipelineMetrics>) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract an event, or `None` when the record carries nothing to forward.
    ///
    /// Never panics and never returns an error: every fault is logged here.
    pub fn extract(&self, record: &RawNotificationRecord) -> Option<NotificationEvent> {
        PipelineMetrics::incr(&self.metrics.records_received);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_extract(record)))
            .unwrap_or_else(|payload| Err(ExtractionError::Panicked(panic_message(payload.as_ref()))));

        match outcome {
            Ok(event) => {
                PipelineMetrics::incr(&self.metrics.events_extracted);
                Some(event)
            }
            Err(ExtractionError::EmptyContent) => {
                PipelineMetrics::incr(&self.metrics.records_without_content);
                debug!(
                    package = %record.package_name,
                    "Skipping notification with empty title and text"
                );
                None
            }
            Err(e) if e.is_absent_data() => {
                PipelineMetrics::incr(&self.metrics.records_missing_extras);
                warn!(package = %record.package_name, reason = e.as_label(), "{}", e);
                None
            }
            Err(e) => {
                PipelineMetrics::incr(&self.metrics.extraction_failures);
                error!(
                    package = %record.package_name,
                    reason = e.as_label(),
                    error = %e,
                    "Error processing notification"
                );
                None
            }
        }
    }

    /// Extraction with faults surfaced as errors.
    pub fn try_extract(
        &self,
        record: &RawNotificationRecord,
    ) -> Result<NotificationEvent, ExtractionError> {
        let extras = record.extras()?;

        let title = read_text(extras, &self.config.title_key)?;
        let mut message = read_text(extras, &self.config.text_key)?;
        if message.is_empty() {
            message = read_text(extras, &self.config.big_text_key)?;
        }

        NotificationEvent::new(record.package_name.as_str(), title, message, record.post_time)
    }
}

/// Read a key as text; absent and null both read as "".
fn read_text(extras: &dyn NotificationExtras, key: &str) -> Result<String, ExtractionError> {
    match extras.lookup(key)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Array(_)) => Err(ExtractionError::Malformed {
            key: key.to_string(),
            found: "array",
        }),
        Some(Value::Object(_)) => Err(ExtractionError::Malformed {
            key: key.to_string(),
            found: "object",
        }),
    }
}
