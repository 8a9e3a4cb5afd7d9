// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Compile-time kiosk settings.
//!
//! These are the stable operational defaults. Per-deployment values (URLs,
//! file paths, timing overrides) live in the TOML config handled by
//! `config.rs`.

use std::time::Duration;

// ============================================================================
// MAP VIEWER SETTINGS
// ============================================================================
/// Minimum zoom level (30% of original size)
const MIN_ZOOM: f64 = 0.3;

/// Maximum zoom level (10x original size)
const MAX_ZOOM: f64 = 10.0;

/// Zoom applied when centering on a selected feature
const TARGET_FEATURE_ZOOM: f64 = 3.0;

// ============================================================================
// TIMING SETTINGS
// ============================================================================
/// Inactivity on the navigation screen before snapping back to landing
const IDLE_TIMEOUT: Duration = Duration::from_secs(120);

/// How often the idle condition is evaluated
const IDLE_CHECK_PERIOD: Duration = Duration::from_secs(5);

/// Background navigation-frame refresh interval while landing is visible
const NAV_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Device config re-fetch interval
const DEVICE_POLL_INTERVAL: Duration = Duration::from_secs(15);

/// How long fetched sheet data is considered fresh
const SHEET_CACHE_DURATION: Duration = Duration::from_secs(5 * 60);

// ============================================================================
// SHARE SETTINGS
// ============================================================================
/// Pixel size of the generated share QR image (square)
const QR_IMAGE_SIZE: u32 = 300;

/// Map viewer settings
pub mod viewport {
    pub const MIN_ZOOM: f64 = super::MIN_ZOOM;
    pub const MAX_ZOOM: f64 = super::MAX_ZOOM;
    pub const TARGET_FEATURE_ZOOM: f64 = super::TARGET_FEATURE_ZOOM;
}

/// Timing settings
pub mod timing {
    use std::time::Duration;

    pub const IDLE_TIMEOUT: Duration = super::IDLE_TIMEOUT;
    pub const IDLE_CHECK_PERIOD: Duration = super::IDLE_CHECK_PERIOD;
    pub const NAV_REFRESH_INTERVAL: Duration = super::NAV_REFRESH_INTERVAL;
    pub const DEVICE_POLL_INTERVAL: Duration = super::DEVICE_POLL_INTERVAL;
    pub const SHEET_CACHE_DURATION: Duration = super::SHEET_CACHE_DURATION;
}

/// Share settings
pub mod share {
    pub const QR_IMAGE_SIZE: u32 = super::QR_IMAGE_SIZE;
}
