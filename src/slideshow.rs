// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0

//! Landing-screen slideshow state.
//!
//! Slide content and transition timing arrive from the backend as part of
//! the kiosk's landing-page assignment and can be replaced at runtime via
//! the frame protocol. Advancement is elapsed-time driven so the host loop
//! only has to call [`SlideShow::tick`].

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// One slide, currently image-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub image_url: String,
}

/// Slide list plus transition timing, as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderConfig {
    #[serde(default)]
    pub slides: Vec<Slide>,
    /// Milliseconds between slide transitions.
    #[serde(default = "default_transition")]
    pub transition_duration: u64,
}

fn default_transition() -> u64 {
    5000
}

/// Advancing slideshow over a [`SliderConfig`].
#[derive(Debug, Clone)]
pub struct SlideShow {
    slides: Vec<Slide>,
    index: usize,
    interval: Duration,
    last_advance: Option<Instant>,
}

impl SlideShow {
    pub fn new(config: SliderConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.transition_duration),
            slides: config.slides,
            index: 0,
            last_advance: None,
        }
    }

    pub fn current(&self) -> Option<&Slide> {
        self.slides.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Step to the next slide, wrapping at the end.
    pub fn advance(&mut self) {
        if self.slides.is_empty() {
            return;
        }
        self.index = (self.index + 1) % self.slides.len();
    }

    /// Replace the slide set, keeping the show position when it still fits.
    pub fn apply_config(&mut self, config: SliderConfig) {
        self.interval = Duration::from_millis(config.transition_duration);
        self.slides = config.slides;
        if self.index >= self.slides.len() {
            self.index = 0;
        }
    }

    /// Advance when the transition interval has elapsed since the last
    /// advancement (or since the first tick). Returns whether it advanced.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(last) = self.last_advance else {
            self.last_advance = Some(now);
            return false;
        };
        if now.duration_since(last) < self.interval || self.slides.len() < 2 {
            return false;
        }
        self.advance();
        self.last_advance = Some(now);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slides(names: &[&str]) -> Vec<Slide> {
        names
            .iter()
            .map(|n| Slide {
                image_url: format!("https://cdn.example.com/{n}.jpg"),
            })
            .collect()
    }

    fn config(names: &[&str], ms: u64) -> SliderConfig {
        SliderConfig {
            slides: slides(names),
            transition_duration: ms,
        }
    }

    #[test]
    fn advance_wraps_around() {
        let mut show = SlideShow::new(config(&["a", "b", "c"], 1000));
        show.advance();
        show.advance();
        show.advance();
        assert!(show.current().unwrap().image_url.contains("a.jpg"));
    }

    #[test]
    fn advance_on_empty_show_is_a_no_op() {
        let mut show = SlideShow::new(config(&[], 1000));
        show.advance();
        assert!(show.current().is_none());
    }

    #[test]
    fn tick_advances_only_after_the_interval() {
        let mut show = SlideShow::new(config(&["a", "b"], 1000));
        let t0 = Instant::now();

        assert!(!show.tick(t0));
        assert!(!show.tick(t0 + Duration::from_millis(500)));
        assert!(show.tick(t0 + Duration::from_millis(1100)));
        assert!(show.current().unwrap().image_url.contains("b.jpg"));
        // Interval restarts from the advancement.
        assert!(!show.tick(t0 + Duration::from_millis(1500)));
    }

    #[test]
    fn apply_config_clamps_the_index() {
        let mut show = SlideShow::new(config(&["a", "b", "c"], 1000));
        show.advance();
        show.advance();
        show.apply_config(config(&["x"], 2000));
        assert!(show.current().unwrap().image_url.contains("x.jpg"));
    }

    #[test]
    fn config_defaults_apply_when_fields_are_missing() {
        let cfg: SliderConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.slides.is_empty());
        assert_eq!(cfg.transition_duration, 5000);

        let cfg: SliderConfig =
            serde_json::from_str(r#"{"slides":[{"imageUrl":"u"}],"transitionDuration":800}"#)
                .unwrap();
        assert_eq!(cfg.slides[0].image_url, "u");
        assert_eq!(cfg.transition_duration, 800);
    }
}
