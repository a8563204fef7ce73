//! Named channels bound to a host messenger
//!
//! A channel owns nothing but its name and a messenger reference; setting a
//! handler registers it on the messenger under that name.

use std::fmt;
use std::sync::Arc;

use crate::ports::{BinaryMessenger, MethodCallHandler, StreamHandler};

/// Opaque handle to the host application's context.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplicationContext {
    pub package_name: String,
}

impl ApplicationContext {
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
        }
    }
}

/// What the host runtime hands the bridge when attaching it.
#[derive(Clone)]
pub struct PluginBinding {
    pub application_context: ApplicationContext,
    pub messenger: Arc<dyn BinaryMessenger>,
}

impl PluginBinding {
    pub fn new(application_context: ApplicationContext, messenger: Arc<dyn BinaryMessenger>) -> Self {
        Self {
            application_context,
            messenger,
        }
    }
}

impl fmt::Debug for PluginBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginBinding")
            .field("application_context", &self.application_context)
            .finish_non_exhaustive()
    }
}

/// Command channel.
pub struct MethodChannel {
    name: String,
    messenger: Arc<dyn BinaryMessenger>,
}

impl MethodChannel {
    pub fn new(messenger: Arc<dyn BinaryMessenger>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messenger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_method_call_handler(&self, handler: Option<Arc<dyn MethodCallHandler>>) {
        self.messenger.set_method_call_handler(&self.name, handler);
    }
}

/// Event channel.
pub struct EventChannel {
    name: String,
    messenger: Arc<dyn BinaryMessenger>,
}

impl EventChannel {
    pub fn new(messenger: Arc<dyn BinaryMessenger>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messenger,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_stream_handler(&self, handler: Option<Arc<dyn StreamHandler>>) {
        self.messenger.set_stream_handler(&self.name, handler);
    }
}
