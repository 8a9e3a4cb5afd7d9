// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Kiosk shell state machine.
//!
//! The shell hosts two frames (landing and navigation) and mediates every
//! message between them. The controller is a pure state machine: inbound
//! messages and clock checks go in, frame-addressed outbound messages come
//! out, and the host loop does the actual delivery. All clock-driven
//! behavior takes `now` as a parameter so tests can drive time directly.

use std::time::{Duration, Instant};

use super::messages::{self, FrameMessage};
use crate::settings;
use crate::slideshow::SliderConfig;

/// Which frame is in front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Navigation,
}

/// A delivery instruction for the host loop.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    ToLanding(FrameMessage),
    ToNavigation(FrameMessage),
    /// Reload the navigation frame from a cache-busted URL.
    ReloadNavigation,
}

/// State machine behind the kiosk shell.
#[derive(Debug)]
pub struct KioskController {
    view: View,
    landing_ready: bool,
    navigation_ready: bool,
    last_activity: Instant,
    last_refresh: Instant,
    pending_slider_config: Option<SliderConfig>,
    idle_timeout: Duration,
    refresh_interval: Duration,
}

impl KioskController {
    pub fn new(now: Instant) -> Self {
        Self::with_timing(
            now,
            settings::timing::IDLE_TIMEOUT,
            settings::timing::NAV_REFRESH_INTERVAL,
        )
    }

    pub fn with_timing(now: Instant, idle_timeout: Duration, refresh_interval: Duration) -> Self {
        Self {
            view: View::Landing,
            landing_ready: false,
            navigation_ready: false,
            last_activity: now,
            last_refresh: now,
            pending_slider_config: None,
            idle_timeout,
            refresh_interval,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn navigation_ready(&self) -> bool {
        self.navigation_ready
    }

    /// How often hosts should call [`Self::check_idle`].
    pub fn idle_check_period() -> Duration {
        settings::timing::IDLE_CHECK_PERIOD
    }

    /// Decode and handle one raw frame message.
    ///
    /// Undecodable messages are logged and dropped; they do not count as
    /// activity.
    pub fn handle_raw(&mut self, text: &str, now: Instant) -> Vec<Outbound> {
        match messages::decode(text) {
            Ok(message) => self.handle_message(message, now),
            Err(err) => {
                tracing::warn!("Dropping frame message: {err:#}");
                Vec::new()
            }
        }
    }

    /// Handle one decoded frame message. Every handled message counts as
    /// user/frame activity for idle purposes.
    pub fn handle_message(&mut self, message: FrameMessage, now: Instant) -> Vec<Outbound> {
        self.last_activity = now;

        match message {
            FrameMessage::LandingReady => {
                self.landing_ready = true;
                vec![Outbound::ToLanding(FrameMessage::Init)]
            }
            FrameMessage::NavigationReady => {
                self.navigation_ready = true;
                let mut out = vec![Outbound::ToNavigation(FrameMessage::Init)];
                if let Some(config) = &self.pending_slider_config {
                    out.push(Outbound::ToNavigation(FrameMessage::UpdateMiniSlider(
                        config.clone(),
                    )));
                }
                out
            }
            FrameMessage::CreateRoute(request) => {
                self.view = View::Navigation;
                vec![
                    Outbound::ToNavigation(FrameMessage::CreateRoute(request)),
                    Outbound::ToNavigation(FrameMessage::Activate),
                ]
            }
            FrameMessage::ShowNavigation => {
                self.view = View::Navigation;
                vec![Outbound::ToNavigation(FrameMessage::Activate)]
            }
            FrameMessage::ShowLanding => {
                self.view = View::Landing;
                vec![Outbound::ToLanding(FrameMessage::Activate)]
            }
            FrameMessage::BackToHome => {
                self.view = View::Landing;
                vec![
                    Outbound::ToNavigation(FrameMessage::HideRoute),
                    Outbound::ToLanding(FrameMessage::Activate),
                ]
            }
            FrameMessage::SliderConfigUpdated(config) => {
                let mut out = Vec::new();
                if self.navigation_ready {
                    out.push(Outbound::ToNavigation(FrameMessage::UpdateMiniSlider(
                        config.clone(),
                    )));
                }
                self.pending_slider_config = Some(config);
                out
            }
            FrameMessage::VersionUpdate { version } => {
                tracing::info!("Frame reports version {version}");
                Vec::new()
            }
            // Status notifications and echoes of our own sends: activity only.
            FrameMessage::RouteReady
            | FrameMessage::RouteActivated
            | FrameMessage::HideRoute
            | FrameMessage::Activate
            | FrameMessage::Init
            | FrameMessage::UpdateMiniSlider(_) => Vec::new(),
        }
    }

    /// Snap back to landing after idle time on the navigation screen.
    ///
    /// Hosts call this on the [`Self::idle_check_period`] cadence. The
    /// snap itself counts as activity, so one idle window produces
    /// exactly one reset no matter how often the check runs.
    pub fn check_idle(&mut self, now: Instant) -> Vec<Outbound> {
        if self.view != View::Navigation {
            return Vec::new();
        }
        if now.duration_since(self.last_activity) < self.idle_timeout {
            return Vec::new();
        }
        tracing::info!("Idle timeout, returning to landing");
        self.view = View::Landing;
        self.last_activity = now;
        vec![
            Outbound::ToNavigation(FrameMessage::HideRoute),
            Outbound::ToLanding(FrameMessage::Activate),
        ]
    }

    /// Periodically reload the hidden navigation frame while landing is
    /// visible, so it picks up fresh data before its next use.
    pub fn check_refresh(&mut self, now: Instant) -> Option<Outbound> {
        if self.view != View::Landing {
            return None;
        }
        if now.duration_since(self.last_refresh) < self.refresh_interval {
            return None;
        }
        self.last_refresh = now;
        self.navigation_ready = false;
        Some(Outbound::ReloadNavigation)
    }
}

/// Append a cache-busting `t` query parameter to a frame URL.
pub fn cache_busted(src: &str, timestamp_millis: u64) -> String {
    let base = src.split(['?', '#']).next().unwrap_or(src);
    format!("{base}?t={timestamp_millis}")
}
