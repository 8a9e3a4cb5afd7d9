// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Wayfinder: headless core for a touchscreen kiosk wayfinding app.
//!
//! Floor-plan geometry comes from an SVG export, tenant data from a shared
//! Google Sheet (with a built-in mock fallback), and the kiosk shell runs
//! a landing/navigation two-frame state machine with idle handling, a
//! slideshow, and device registration against a fleet backend.

use std::path::PathBuf;

use anyhow::{Result, bail};

pub mod config;
pub mod data;
pub mod device;
pub mod floorplan;
pub mod geometry;
pub mod kiosk;
pub mod model;
pub mod settings;
pub mod slideshow;
pub mod viewport;

use config::KioskConfig;
use device::{DeviceClient, DeviceStore};

/// Entry point for the wayfinder kiosk core.
///
/// This is a one-shot startup: load, validate, register, report. The
/// timing overrides in [`KioskConfig`] (`idle_timeout()`,
/// `nav_refresh_interval()`, `device_poll_interval()`) are for the
/// embedding shell, which passes them to
/// [`kiosk::KioskController::with_timing`] and
/// [`device::ConfigPoller::new`] when it starts its event loop.
pub fn run() -> Result<()> {
    // Initialize tracing subscriber (can be controlled via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("wayfinder=info".parse().unwrap()),
        )
        .init();

    let config = KioskConfig::load_or_default(handle_command_line_args().as_deref())?;

    let loaded = data::load_all(config.svg_path.as_deref(), config.sheet_url.as_deref());
    if loaded.floor_plan.is_none() && loaded.directory.is_empty() {
        bail!("no floor plan and no directory data; nothing to serve");
    }

    let stats = loaded.directory.statistics();
    tracing::info!(
        "Directory ready: {} locations across {} categories",
        loaded.directory.len(),
        stats.by_category.len()
    );
    if let Some(plan) = &loaded.floor_plan {
        tracing::info!(
            "Floor plan ready: {} features, viewBox {}x{}",
            plan.features.len(),
            plan.view_box.width,
            plan.view_box.height
        );
    }

    if let Some(backend_url) = &config.backend_url {
        register_device(backend_url, &config)?;
    } else {
        tracing::info!("No backend configured, skipping device registration");
    }

    Ok(())
}

/// Handle command-line arguments: an optional config file path.
fn handle_command_line_args() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() <= 1 {
        return None;
    }
    Some(PathBuf::from(&args[1]))
}

/// Register with the fleet backend and log the current assignment.
///
/// Registration failures are not fatal: the kiosk still works standalone.
fn register_device(backend_url: &str, config: &KioskConfig) -> Result<()> {
    let store = DeviceStore::new(config.device_store_path.clone());
    let client = DeviceClient::new(backend_url, store)?;

    match client.init() {
        Ok(record) => {
            match client.fetch_config(&record.device_id) {
                Ok(assignment) if assignment.is_assigned => {
                    let slides = assignment
                        .landing_page
                        .map(|p| p.slides.len())
                        .unwrap_or(0);
                    tracing::info!(
                        "Device {} assigned ({} landing slides)",
                        record.device_id,
                        slides
                    );
                }
                Ok(_) => tracing::info!("Device {} not yet assigned", record.device_id),
                Err(err) => tracing::warn!("Cannot fetch device config: {err:#}"),
            }
        }
        Err(err) => tracing::warn!("Device registration failed: {err:#}"),
    }
    Ok(())
}
