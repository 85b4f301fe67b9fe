//! Centralized configuration for Trailhead.
//!
//! All tunable parameters are defined here to avoid hard-coded values
//! scattered throughout the codebase.

use std::time::Duration;

/// Central configuration for all Trailhead components.
///
/// Groups related configuration settings into logical sections.
/// Supports environment variable overrides for runtime customization.
#[derive(Debug, Clone, Default)]
pub struct TrailheadConfig {
    pub playback: PlaybackConfig,
    pub persistence: PersistenceConfig,
    pub view: ViewConfig,
}

/// Playback session configuration.
///
/// Controls position sampling and player behavior.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// How often the playback position is sampled and written through
    /// while a video is playing
    pub sample_interval: Duration,
    /// Whether content starts playing as soon as the adapter is ready
    pub autoplay: bool,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_secs(5),
            autoplay: true,
        }
    }
}

/// Progress persistence configuration.
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Key under which the whole progress snapshot is stored
    pub storage_key: &'static str,
    /// Whether the JSON snapshot is pretty-printed (useful for debugging)
    pub pretty_json: bool,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            storage_key: "trailhead-progress",
            pretty_json: false,
        }
    }
}

/// View projection configuration.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    /// Radius of the overall-progress ring, in SVG user units
    pub ring_radius: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self { ring_radius: 90.0 }
    }
}

impl TrailheadConfig {
    /// Creates configuration with environment variable overrides.
    ///
    /// Allows runtime configuration via environment variables while
    /// maintaining sensible defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(interval) = std::env::var("TRAILHEAD_SAMPLE_INTERVAL")
            && let Ok(seconds) = interval.parse::<u64>()
            && seconds > 0
        {
            config.playback.sample_interval = Duration::from_secs(seconds);
        }

        if let Ok(autoplay) = std::env::var("TRAILHEAD_AUTOPLAY") {
            config.playback.autoplay = autoplay.parse().unwrap_or(true);
        }

        if let Ok(radius) = std::env::var("TRAILHEAD_RING_RADIUS")
            && let Ok(value) = radius.parse::<f64>()
            && value > 0.0
        {
            config.view.ring_radius = value;
        }

        config
    }

    /// Creates a configuration optimized for testing.
    pub fn for_testing() -> Self {
        Self {
            persistence: PersistenceConfig {
                pretty_json: false,
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_values() {
        let config = TrailheadConfig::default();

        assert_eq!(config.playback.sample_interval, Duration::from_secs(5));
        assert!(config.playback.autoplay);
        assert_eq!(config.persistence.storage_key, "trailhead-progress");
        assert_eq!(config.view.ring_radius, 90.0);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("TRAILHEAD_SAMPLE_INTERVAL", "10");
            std::env::set_var("TRAILHEAD_AUTOPLAY", "false");
        }

        let config = TrailheadConfig::from_env();

        assert_eq!(config.playback.sample_interval, Duration::from_secs(10));
        assert!(!config.playback.autoplay);

        // Cleanup
        unsafe {
            std::env::remove_var("TRAILHEAD_SAMPLE_INTERVAL");
            std::env::remove_var("TRAILHEAD_AUTOPLAY");
        }
    }

    #[test]
    fn test_env_override_rejects_invalid_values() {
        unsafe {
            std::env::set_var("TRAILHEAD_SAMPLE_INTERVAL", "0");
            std::env::set_var("TRAILHEAD_RING_RADIUS", "not-a-number");
        }

        let config = TrailheadConfig::from_env();

        assert_eq!(config.playback.sample_interval, Duration::from_secs(5));
        assert_eq!(config.view.ring_radius, 90.0);

        unsafe {
            std::env::remove_var("TRAILHEAD_SAMPLE_INTERVAL");
            std::env::remove_var("TRAILHEAD_RING_RADIUS");
        }
    }
}
