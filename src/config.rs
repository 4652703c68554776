//! Viewer configuration.
//!
//! The host page may pass a JSON object when it creates the viewer; every
//! field is optional and falls back to [`ViewerConfig::default`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::document::PDF_MIME;
use crate::error::ConfigError;

/// Tunables for the viewer shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// MIME types accepted from the file picker.
    pub accepted_mime_types: Vec<String>,
    /// How long ordinary notifications stay on screen.
    pub notification_ms: u32,
    /// How long the welcome notification stays on screen.
    pub welcome_ms: u32,
    /// Whether to greet the user once at startup.
    pub show_welcome: bool,
    /// Console log level for the browser build.
    pub log_level: log::Level,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            accepted_mime_types: vec![PDF_MIME.to_owned()],
            notification_ms: 3000,
            welcome_ms: 4000,
            show_welcome: true,
            log_level: log::Level::Info,
        }
    }
}

impl ViewerConfig {
    /// Parse a host-supplied JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or mistyped fields,
    /// and [`ConfigError::NoAcceptedTypes`] if the accepted type list is empty.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.accepted_mime_types.is_empty() {
            return Err(ConfigError::NoAcceptedTypes);
        }
        Ok(config)
    }

    /// Whether a file with this MIME type may be opened.
    #[must_use]
    pub fn accepts(&self, mime: &str) -> bool {
        self.accepted_mime_types.iter().any(|m| m.eq_ignore_ascii_case(mime))
    }
}
