// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Per-deployment kiosk configuration.
//!
//! Loaded from a TOML file whose path is the first command-line argument.
//! Every field has a default, so a missing file (or a file with only a few
//! overrides) is fine; compile-time defaults live in `settings.rs`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::settings;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KioskConfig {
    /// Backend base URL for device registration; `None` disables it.
    pub backend_url: Option<String>,
    /// Google Sheets URL (full or CSV-export form) for the tenant list.
    pub sheet_url: Option<String>,
    /// Floor-plan SVG path.
    pub svg_path: Option<PathBuf>,
    /// Where the device identity JSON lives.
    pub device_store_path: PathBuf,
    pub idle_timeout_secs: u64,
    pub nav_refresh_secs: u64,
    pub device_poll_secs: u64,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            backend_url: None,
            sheet_url: None,
            svg_path: None,
            device_store_path: PathBuf::from("kiosk-device.json"),
            idle_timeout_secs: settings::timing::IDLE_TIMEOUT.as_secs(),
            nav_refresh_secs: settings::timing::NAV_REFRESH_INTERVAL.as_secs(),
            device_poll_secs: settings::timing::DEVICE_POLL_INTERVAL.as_secs(),
        }
    }
}

impl KioskConfig {
    /// Parse a config file. Unknown keys are an error so typos surface.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let config = Self::load(path)?;
                tracing::info!("Loaded config from {}", path.display());
                Ok(config)
            }
            None => {
                tracing::info!("No config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn nav_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.nav_refresh_secs)
    }

    pub fn device_poll_interval(&self) -> Duration {
        Duration::from_secs(self.device_poll_secs)
    }
}
