//! In-process host messenger
//!
//! Stores command and stream handlers by channel name and lets the host side
//! drive them. Handlers are cloned out of the registry before they are
//! invoked, so a handler may re-register or unregister itself while running.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::error::BridgeError;
use crate::ports::{BinaryMessenger, EventSink, MethodCall, MethodCallHandler, MethodResult, StreamHandler};

/// Host-side messenger keeping handlers in memory.
#[derive(Default)]
pub struct InMemoryMessenger {
    method_handlers: RwLock<HashMap<String, Arc<dyn MethodCallHandler>>>,
    stream_handlers: RwLock<HashMap<String, Arc<dyn StreamHandler>>>,
}

impl InMemoryMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Send a command to the handler registered on `channel`.
    pub fn invoke_method(&self, channel: &str, call: &MethodCall) -> Result<MethodResult, BridgeError> {
        let handler = self.method_handlers.read().get(channel).cloned();
        let handler = handler.ok_or_else(|| BridgeError::NoHandler {
            channel: channel.to_string(),
        })?;
        Ok(handler.on_method_call(call))
    }

    /// Subscribe `events` on `channel`.
    pub fn listen(
        &self,
        channel: &str,
        arguments: Option<Value>,
        events: Arc<dyn EventSink>,
    ) -> Result<(), BridgeError> {
        let handler = self.stream_handler(channel)?;
        handler.on_listen(arguments, events);
        Ok(())
    }

    /// Unsubscribe from `channel`.
    pub fn cancel(&self, channel: &str, arguments: Option<Value>) -> Result<(), BridgeError> {
        let handler = self.stream_handler(channel)?;
        handler.on_cancel(arguments);
        Ok(())
    }

    pub fn has_method_call_handler(&self, channel: &str) -> bool {
        self.method_handlers.read().contains_key(channel)
    }

    pub fn has_stream_handler(&self, channel: &str) -> bool {
        self.stream_handlers.read().contains_key(channel)
    }

    fn stream_handler(&self, channel: &str) -> Result<Arc<dyn StreamHandler>, BridgeError> {
        self.stream_handlers
            .read()
            .get(channel)
            .cloned()
            .ok_or_else(|| BridgeError::NoHandler {
                channel: channel.to_string(),
            })
    }
}

impl BinaryMessenger for InMemoryMessenger {
    fn set_method_call_handler(&self, channel: &str, handler: Option<Arc<dyn MethodCallHandler>>) {
        let mut handlers = self.method_handlers.write();
        match handler {
            Some(h) => {
                handlers.insert(channel.to_string(), h);
                debug!(channel, "Method call handler registered");
            }
            None => {
                handlers.remove(channel);
                debug!(channel, "Method call handler cleared");
            }
        }
    }

    fn set_stream_handler(&self, channel: &str, handler: Option<Arc<dyn StreamHandler>>) {
        let mut handlers = self.stream_handlers.write();
        match handler {
            Some(h) => {
                handlers.insert(channel.to_string(), h);
                debug!(channel, "Stream handler registered");
            }
            None => {
                handlers.remove(channel);
                debug!(channel, "Stream handler cleared");
            }
        }
    }
}
