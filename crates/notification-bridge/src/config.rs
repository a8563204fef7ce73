//! Bridge configuration
//!
//! # Example
//!
//! ```
//! use notification_bridge::{BridgeConfig, ExtractorConfig};
//!
//! let config = BridgeConfig {
//!     extractor: ExtractorConfig::android(),
//!     ..BridgeConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.extractor.big_text_key, "android.bigText");
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default command channel name.
pub const METHOD_CHANNEL: &str = "notifications.methodChannel";

/// Default event channel name.
pub const EVENT_CHANNEL: &str = "notifications.eventChannel";

/// Which extras keys hold the title, primary text and expanded text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub title_key: String,
    pub text_key: String,
    /// Fallback used when the primary text is empty
    pub big_text_key: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            title_key: "title".to_string(),
            text_key: "text".to_string(),
            big_text_key: "big_text".to_string(),
        }
    }
}

impl ExtractorConfig {
    /// Keys used by the Android notification extras bundle.
    pub fn android() -> Self {
        Self {
            title_key: "android.title".to_string(),
            text_key: "android.text".to_string(),
            big_text_key: "android.bigText".to_string(),
        }
    }

    /// Resolve a preset name (`plain` or `android`).
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_lowercase().as_str() {
            "plain" | "" => Ok(Self::default()),
            "android" => Ok(Self::android()),
            other => Err(ConfigError::UnknownKeyPreset(other.to_string())),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title_key.is_empty() {
            return Err(ConfigError::EmptyExtrasKey("title_key"));
        }
        if self.text_key.is_empty() {
            return Err(ConfigError::EmptyExtrasKey("text_key"));
        }
        if self.big_text_key.is_empty() {
            return Err(ConfigError::EmptyExtrasKey("big_text_key"));
        }
        Ok(())
    }
}

/// Channel names and extraction settings for a bridge instance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Command channel name
    pub method_channel: String,
    /// Event channel name
    pub event_channel: String,
    pub extractor: ExtractorConfig,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            method_channel: METHOD_CHANNEL.to_string(),
            event_channel: EVENT_CHANNEL.to_string(),
            extractor: ExtractorConfig::default(),
        }
    }
}

impl BridgeConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `NB_METHOD_CHANNEL`: command channel (default: notifications.methodChannel)
    /// - `NB_EVENT_CHANNEL`: event channel (default: notifications.eventChannel)
    /// - `NB_EXTRAS_KEYS`: `plain` or `android` (default: plain)
    pub fn from_env() -> Result<Self, ConfigError> {
        let extractor = match env::var("NB_EXTRAS_KEYS") {
            Ok(preset) => ExtractorConfig::from_preset(&preset)?,
            Err(_) => ExtractorConfig::default(),
        };

        let config = Self {
            method_channel: env::var("NB_METHOD_CHANNEL")
                .unwrap_or_else(|_| METHOD_CHANNEL.to_string()),
            event_channel: env::var("NB_EVENT_CHANNEL")
                .unwrap_or_else(|_| EVENT_CHANNEL.to_string()),
            extractor,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.method_channel.is_empty() {
            return Err(ConfigError::EmptyChannelName("method_channel"));
        }
        if self.event_channel.is_empty() {
            return Err(ConfigError::EmptyChannelName("event_channel"));
        }
        if self.method_channel == self.event_channel {
            return Err(ConfigError::DuplicateChannelName(
                self.method_channel.clone(),
            ));
        }
        self.extractor.validate()
    }
}
