//! Overlay controller configuration.
//!
//! All fields have defaults; a config file only needs the ones it changes.

use std::time::Duration;

use serde::Deserialize;

use lawlens_core::DEFAULT_STATUTE_LINK_PREFIX;

use crate::placement::Size;

/// Tunables for the overlay controller.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// How long the pointer must rest on a trigger before its overlay opens.
    pub intent_delay_ms: u64,
    /// How long an unhovered overlay lingers before closing.
    pub hide_delay_ms: u64,
    /// Overlay width in pixels.
    pub overlay_width: f64,
    /// Overlay height in pixels.
    pub overlay_height: f64,
    /// Gap between a trigger and a top-level overlay below it.
    pub gap_below: f64,
    /// Gap between a trigger and a nested overlay beside it.
    pub gap_side: f64,
    /// Path prefix identifying statute links.
    pub statute_link_prefix: String,
    /// Mutation batches with more records than this are ignored.
    pub max_mutation_burst: usize,
}

impl ControllerConfig {
    /// Hover-intent delay.
    pub fn intent_delay(&self) -> Duration {
        Duration::from_millis(self.intent_delay_ms)
    }

    /// Hide delay.
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    /// Overlay size.
    pub fn overlay_size(&self) -> Size {
        Size {
            width: self.overlay_width,
            height: self.overlay_height,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            intent_delay_ms: 300,
            hide_delay_ms: 1000,
            overlay_width: 256.0,
            overlay_height: 256.0,
            gap_below: 16.0,
            gap_side: 10.0,
            statute_link_prefix: DEFAULT_STATUTE_LINK_PREFIX.to_string(),
            max_mutation_burst: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ControllerConfig::default();
        assert_eq!(cfg.intent_delay(), Duration::from_millis(300));
        assert_eq!(cfg.hide_delay(), Duration::from_secs(1));
        assert_eq!(cfg.statute_link_prefix, "/law/");
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let cfg: ControllerConfig =
            serde_json::from_str(r#"{ "intent_delay_ms": 150, "max_mutation_burst": 10 }"#).unwrap();
        assert_eq!(cfg.intent_delay_ms, 150);
        assert_eq!(cfg.max_mutation_burst, 10);
        assert_eq!(cfg.hide_delay_ms, 1000);
    }
}
