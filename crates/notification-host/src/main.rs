//! # Notification Host
//!
//! Simulates the host runtime around the notification bridge.
//!
//! ## Startup Sequence
//!
//! 1. Load logging and bridge configuration from the environment
//! 2. Attach the bridge to an in-memory messenger (creates both channels)
//! 3. Subscribe a channel-backed sink on the event channel
//! 4. Read JSON-lines records from stdin on a dedicated thread (the "OS bus")
//! 5. Print every delivered payload as one JSON line on stdout
//! 6. On end of input: unsubscribe, detach, log the pipeline counters
//!
//! ## Input format
//!
//! ```text
//! {"package_name": "com.mail", "extras": {"title": "Inbox", "big_text": "3 new"}, "post_time": 1000}
//! {"package_name": "com.chat", "extras": null, "post_time": 1001}
//! {"package_name": "com.chat", "extras": {"title": "x"}, "post_time": 1002, "removed": true}
//! ```

use std::io::{self, BufRead};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use tokio_stream::StreamExt;
use tracing::{info, warn};

use bridge_telemetry::{init_logging, TelemetryConfig};
use notification_bridge::{
    ApplicationContext, BridgeConfig, ChannelEventSink, InMemoryMessenger, NotificationListener,
    NotificationsBridge, PluginBinding, RawNotificationRecord,
};

/// One line of input.
#[derive(Debug, Deserialize)]
struct RecordLine {
    package_name: String,
    #[serde(default)]
    extras: Value,
    post_time: i64,
    #[serde(default)]
    removed: bool,
}

/// Push every parseable line into `listener`; returns the number of records.
fn read_records<R: BufRead>(reader: R, listener: &impl NotificationListener) -> usize {
    let mut records = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "Failed to read input, stopping");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let parsed: RecordLine = match serde_json::from_str(&line) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(line = index + 1, error = %e, "Skipping unparseable record");
                continue;
            }
        };

        let record =
            RawNotificationRecord::from_json_extras(parsed.package_name, parsed.extras, parsed.post_time);
        if parsed.removed {
            listener.on_notification_removed(record);
        } else {
            listener.on_notification_posted(record);
        }
        records += 1;
    }

    records
}

#[tokio::main]
async fn main() -> Result<()> {
    let telemetry = TelemetryConfig::from_env();
    init_logging(&telemetry).context("failed to initialize logging")?;

    let config = BridgeConfig::from_env().context("invalid bridge configuration")?;
    let event_channel = config.event_channel.clone();

    let messenger = Arc::new(InMemoryMessenger::new());
    let bridge = NotificationsBridge::new(config);
    bridge.on_attached_to_engine(PluginBinding::new(
        ApplicationContext::new(telemetry.service_name.clone()),
        messenger.clone(),
    ));

    let (sink, mut stream) = ChannelEventSink::new();
    messenger
        .listen(&event_channel, None, Arc::new(sink))
        .context("failed to subscribe to event channel")?;

    let printer = tokio::spawn(async move {
        let mut printed = 0usize;
        while let Some(payload) = stream.next().await {
            match serde_json::to_string(&payload) {
                Ok(line) => {
                    println!("{line}");
                    printed += 1;
                }
                Err(e) => warn!(error = %e, "Failed to encode payload"),
            }
        }
        printed
    });

    let listener = bridge.listener();
    let records = tokio::task::spawn_blocking(move || read_records(io::stdin().lock(), &listener))
        .await
        .context("record reader thread failed")?;

    // Dropping the subscriber closes the stream once it is drained.
    messenger
        .cancel(&event_channel, None)
        .context("failed to unsubscribe from event channel")?;
    let printed = printer.await.context("printer task failed")?;
    bridge.on_detached_from_engine();

    let snapshot = bridge.sink().metrics().snapshot();
    info!(records, printed, metrics = ?snapshot, "Input exhausted, host shutting down");

    Ok(())
}
