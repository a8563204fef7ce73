//! Channel-backed subscriber handle
//!
//! Gives async consumers a [`Stream`] of payloads. `success` never blocks: the
//! channel is unbounded, and the host side decides how fast to drain it.

use std::pin::Pin;
use std::task::{Context, Poll};

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_stream::Stream;

use crate::domain::EventPayload;
use crate::error::DeliveryError;
use crate::ports::EventSink;

/// [`EventSink`] forwarding payloads into an unbounded channel.
#[derive(Clone, Debug)]
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<EventPayload>,
}

impl ChannelEventSink {
    /// Create a sink and the stream it feeds.
    pub fn new() -> (Self, EventPayloadStream) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self { tx },
            EventPayloadStream {
                inner: UnboundedReceiverStream::new(rx),
            },
        )
    }

    /// Whether the receiving stream is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl EventSink for ChannelEventSink {
    fn success(&self, payload: EventPayload) -> Result<(), DeliveryError> {
        self.tx.send(payload).map_err(|_| DeliveryError::Closed)
    }
}

/// Stream of payloads delivered to a [`ChannelEventSink`].
///
/// Ends once every sink clone has been dropped.
#[derive(Debug)]
pub struct EventPayloadStream {
    inner: UnboundedReceiverStream<EventPayload>,
}

impl Stream for EventPayloadStream {
    type Item = EventPayload;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
