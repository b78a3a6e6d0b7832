//! Carousel configuration.
//!
//! Options are deserialised with camelCase keys (`autoplayDelay`,
//! `pauseOnHover`, `loop`) and can also be loaded from environment variables.

use crate::error::{CarouselError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default autoplay delay in milliseconds
pub const DEFAULT_AUTOPLAY_DELAY_MS: u64 = 3000;

/// Recognised carousel options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Advance automatically on a timer
    pub autoplay: bool,
    /// Milliseconds between autoplay advances
    pub autoplay_delay: u64,
    /// Suspend autoplay while the pointer hovers the carousel
    pub pause_on_hover: bool,
    /// Wrap from the last item back to the first
    #[serde(rename = "loop")]
    pub loop_items: bool,
    /// Render as round cards (layout only)
    pub round: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay: false,
            autoplay_delay: DEFAULT_AUTOPLAY_DELAY_MS,
            pause_on_hover: false,
            loop_items: false,
            round: false,
        }
    }
}

impl CarouselConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `CAROUSEL_AUTOPLAY`, `CAROUSEL_AUTOPLAY_DELAY_MS`,
    /// `CAROUSEL_PAUSE_ON_HOVER`, `CAROUSEL_LOOP` and `CAROUSEL_ROUND`.
    /// Missing or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            autoplay: env_flag("CAROUSEL_AUTOPLAY").unwrap_or(defaults.autoplay),
            autoplay_delay: env::var("CAROUSEL_AUTOPLAY_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.autoplay_delay),
            pause_on_hover: env_flag("CAROUSEL_PAUSE_ON_HOVER").unwrap_or(defaults.pause_on_hover),
            loop_items: env_flag("CAROUSEL_LOOP").unwrap_or(defaults.loop_items),
            round: env_flag("CAROUSEL_ROUND").unwrap_or(defaults.round),
        }
    }

    /// Parse configuration from a JSON object
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Decode`] if the JSON is malformed, or
    /// [`CarouselError::InvalidConfig`] if it fails [`CarouselConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can drive the engine
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfig`] if autoplay is enabled with a
    /// zero delay.
    pub fn validate(&self) -> Result<()> {
        if self.autoplay && self.autoplay_delay == 0 {
            return Err(CarouselError::InvalidConfig(
                "autoplayDelay must be greater than zero when autoplay is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Delay between autoplay advances
    #[must_use]
    pub const fn autoplay_delay(&self) -> Duration {
        Duration::from_millis(self.autoplay_delay)
    }

    /// Enable or disable autoplay
    #[must_use]
    pub const fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Set the autoplay delay
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // delays beyond u64 milliseconds are not meaningful
    pub const fn with_autoplay_delay(mut self, delay: Duration) -> Self {
        self.autoplay_delay = delay.as_millis() as u64;
        self
    }

    /// Pause autoplay while hovered
    #[must_use]
    pub const fn with_pause_on_hover(mut self, pause_on_hover: bool) -> Self {
        self.pause_on_hover = pause_on_hover;
        self
    }

    /// Enable or disable looping
    #[must_use]
    pub const fn with_loop(mut self, loop_items: bool) -> Self {
        self.loop_items = loop_items;
        self
    }

    /// Enable or disable round cards
    #[must_use]
    pub const fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert!(!config.autoplay);
        assert_eq!(config.autoplay_delay(), Duration::from_secs(3));
        assert!(!config.pause_on_hover);
        assert!(!config.loop_items);
        assert!(!config.round);
    }

    #[test]
    fn test_from_json_uses_camel_case_and_defaults() {
        let config = CarouselConfig::from_json(r#"{"autoplay": true, "pauseOnHover": true, "loop": true}"#)
            .unwrap();

        assert!(config.autoplay);
        assert!(config.pause_on_hover);
        assert!(config.loop_items);
        assert_eq!(config.autoplay_delay, DEFAULT_AUTOPLAY_DELAY_MS);
    }

    #[test]
    fn test_zero_delay_rejected_when_autoplaying() {
        let result = CarouselConfig::from_json(r#"{"autoplay": true, "autoplayDelay": 0}"#);
        assert!(matches!(result, Err(CarouselError::InvalidConfig(_))));

        // Without autoplay the delay is never used.
        let idle = CarouselConfig::default().with_autoplay_delay(Duration::ZERO);
        assert!(idle.validate().is_ok());
    }

    #[test]
    fn test_malformed_json() {
        let result = CarouselConfig::from_json("{autoplay");
        assert!(matches!(result, Err(CarouselError::Decode(_))));
    }

    #[test]
    fn test_builders() {
        let config = CarouselConfig::default()
            .with_autoplay(true)
            .with_autoplay_delay(Duration::from_millis(1500))
            .with_pause_on_hover(true)
            .with_loop(true)
            .with_round(true);

        assert_eq!(config.autoplay_delay, 1500);
        assert!(config.autoplay && config.pause_on_hover && config.loop_items && config.round);
    }
}
