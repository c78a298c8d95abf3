//! Session configuration
//!
//! Close delays match the length of the exit animations the view layer
//! plays; the open delay only has to be long enough for the entity to be
//! mounted one tick before its open flag is set.

use crate::error::ConfigError;
use insight_core::assembler::{DEFAULT_PANEL_LIMIT, DEFAULT_SAMPLE_SIZE};
use insight_export::DEFAULT_FILE_NAME;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated search latency
    pub search_latency_ms: u64,
    /// Delay between mounting a modal entity and setting its open flag
    pub modal_open_delay_ms: u64,
    /// Delay between clearing a modal's open flag and dropping its entity
    pub modal_close_delay_ms: u64,
    /// Exit animation window of the all-panels view
    pub overlay_exit_delay_ms: u64,
    /// Panels shown next to the result count
    pub sample_size: usize,
    /// Upper bound on generated panel records
    pub panel_limit: usize,
    /// Seed for panel identifiers; entropy when absent
    pub seed: Option<u64>,
    /// File name offered for downloaded reports
    pub export_file_name: String,
}

impl SessionConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a fixed RNG seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With a different simulated search latency
    #[inline]
    #[must_use]
    pub fn with_search_latency(mut self, latency: Duration) -> Self {
        self.search_latency_ms = duration_ms(latency);
        self
    }

    /// With different modal staging delays
    #[inline]
    #[must_use]
    pub fn with_modal_delays(mut self, open: Duration, close: Duration) -> Self {
        self.modal_open_delay_ms = duration_ms(open);
        self.modal_close_delay_ms = duration_ms(close);
        self
    }

    /// With a different exit window for the all-panels view
    #[inline]
    #[must_use]
    pub fn with_overlay_exit_delay(mut self, delay: Duration) -> Self {
        self.overlay_exit_delay_ms = duration_ms(delay);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_export_file_name(mut self, name: impl Into<String>) -> Self {
        self.export_file_name = name.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }

    #[inline]
    #[must_use]
    pub fn modal_open_delay(&self) -> Duration {
        Duration::from_millis(self.modal_open_delay_ms)
    }

    #[inline]
    #[must_use]
    pub fn modal_close_delay(&self) -> Duration {
        Duration::from_millis(self.modal_close_delay_ms)
    }

    #[inline]
    #[must_use]
    pub fn overlay_exit_delay(&self) -> Duration {
        Duration::from_millis(self.overlay_exit_delay_ms)
    }

    /// Parse a TOML document; missing keys keep their defaults
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded session configuration");
        Ok(config)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_latency_ms: 1_500,
            modal_open_delay_ms: 20,
            modal_close_delay_ms: 300,
            overlay_exit_delay_ms: 300,
            sample_size: DEFAULT_SAMPLE_SIZE,
            panel_limit: DEFAULT_PANEL_LIMIT,
            seed: None,
            export_file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
