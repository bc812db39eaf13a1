//! Announcer configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid configuration JSON
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable parameters for script building and live announcing.
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnouncerConfig {
    /// Pause before each middle item of a station list (ms).
    pub calling_point_delay_ms: u32,

    /// Pause either side of the "and" in a station list (ms).
    pub calling_point_and_delay_ms: u32,

    /// Highest platform number with a combined "platform N for the" clip.
    /// Higher platforms are read as "platform", number, "for the".
    pub max_combined_platform: u32,

    /// Lettered platforms that also have combined clips.
    pub lettered_platforms: Vec<String>,

    /// Only services departing within this many minutes are announced live.
    pub announce_window_mins: i64,

    /// Live services running more than this many minutes late are
    /// announced as delayed.
    pub delayed_threshold_mins: i64,

    /// How long a live service is remembered as already announced (seconds).
    pub announced_ttl_secs: u64,

    /// Maximum number of remembered live services.
    pub announced_capacity: u64,
}

impl AnnouncerConfig {
    /// Load a configuration from a JSON file, filling gaps with defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Returns the announced-service TTL as a Duration.
    pub fn announced_ttl(&self) -> Duration {
        Duration::from_secs(self.announced_ttl_secs)
    }

    /// Returns true if `platform` has a combined "platform N for the" clip.
    ///
    /// Numbered platforms qualify on their leading digits, so `"3a"` counts
    /// as platform 3.
    pub fn has_combined_platform_clip(&self, platform: &str) -> bool {
        let digits: String = platform.chars().take_while(char::is_ascii_digit).collect();

        if let Ok(number) = digits.parse::<u32>()
            && number <= self.max_combined_platform
        {
            return true;
        }

        self.lettered_platforms
            .iter()
            .any(|p| p.eq_ignore_ascii_case(platform))
    }
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            calling_point_delay_ms: 200,
            calling_point_and_delay_ms: 100,
            max_combined_platform: 12,
            lettered_platforms: vec!["a".to_string(), "b".to_string()],
            announce_window_mins: 4,
            delayed_threshold_mins: 5,
            announced_ttl_secs: 60 * 60, // 1 hour
            announced_capacity: 1000,
        }
    }
}
