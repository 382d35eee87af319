//! User configuration — practice defaults loaded from ~/.capo/config.yaml.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Pacing bounds in seconds.
pub const MIN_PACING_SECS: u64 = 2;
pub const MAX_PACING_SECS: u64 = 30;

/// Practice defaults loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Seconds each chord is held in paced modes.
    #[serde(default = "Config::default_pacing_secs")]
    pub pacing_secs: u64,
    /// Metronome tempo in beats per minute.
    #[serde(default = "Config::default_metronome_bpm")]
    pub metronome_bpm: f64,
    /// Whether the metronome starts enabled.
    #[serde(default)]
    pub metronome_on: bool,
    /// Master output volume (0.0 to 1.0).
    #[serde(default = "Config::default_volume")]
    pub volume: f32,
}

impl Config {
    fn default_pacing_secs() -> u64 {
        6
    }

    fn default_metronome_bpm() -> f64 {
        80.0
    }

    fn default_volume() -> f32 {
        0.8
    }

    /// Standard config path (~/.capo/config.yaml).
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".capo").join("config.yaml"))
    }

    /// Load config from the standard path.
    /// Returns None if the file doesn't exist or fails to parse.
    pub fn load() -> Option<Self> {
        let content = std::fs::read_to_string(Self::path()?).ok()?;
        serde_yaml::from_str(&content).ok().map(Self::clamped)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Option<Self> {
        serde_yaml::from_str(yaml).ok().map(Self::clamped)
    }

    fn clamped(mut self) -> Self {
        self.pacing_secs = self.pacing_secs.clamp(MIN_PACING_SECS, MAX_PACING_SECS);
        self.metronome_bpm = self.metronome_bpm.clamp(40.0, 200.0);
        self.volume = self.volume.clamp(0.0, 1.0);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pacing_secs: Self::default_pacing_secs(),
            metronome_bpm: Self::default_metronome_bpm(),
            metronome_on: false,
            volume: Self::default_volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.pacing_secs, 6);
        assert!((config.metronome_bpm - 80.0).abs() < f64::EPSILON);
        assert!(!config.metronome_on);
    }

    #[test]
    fn serialize_deserialize() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = Config::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.pacing_secs, config.pacing_secs);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let config = Config::from_yaml("pacing_secs: 10\n").unwrap();
        assert_eq!(config.pacing_secs, 10);
        assert!((config.metronome_bpm - 80.0).abs() < f64::EPSILON);
        assert!((config.volume - 0.8).abs() < f32::EPSILON);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_yaml("pacing_secs: 500\nmetronome_bpm: 5\nvolume: 3.0\n").unwrap();
        assert_eq!(config.pacing_secs, MAX_PACING_SECS);
        assert!((config.metronome_bpm - 40.0).abs() < f64::EPSILON);
        assert!((config.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn load_missing_file_is_graceful() {
        // ~/.capo/config.yaml may or may not exist; just verify no panic.
        let _ = Config::load();
    }
}
