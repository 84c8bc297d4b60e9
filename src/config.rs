// ================================
// src/config.rs - startup constants and TOML loading
// ================================
use crate::error::{DistanceError, Result};
use serde::Deserialize;
use std::{env, fs, path::Path};

pub const DEFAULT_CONFIG_PATH: &str = "./ld_distance.toml";

/// Node parameters. Loaded once at startup and never mutated afterwards.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    // LiDAR
    pub scan_size: usize,

    // Safe following band (meters, inclusive)
    pub safe_lower: f32,
    pub safe_upper: f32,

    // Bus binding
    pub node_name: String,
    pub scan_topic: String,
    pub distance_topic: String,
    pub queue_depth: usize,

    // Evaluate the follow policy for every extracted distance
    pub follow_enabled: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_size: 453,
            safe_lower: 3.0,
            safe_upper: 8.0,
            node_name: "scan_subscriber".to_string(),
            scan_topic: "scan".to_string(),
            distance_topic: "forward_distance".to_string(),
            queue_depth: 10,
            follow_enabled: false,
        }
    }
}

impl Config {
    /// Load from `CONFIG_PATH`, or from `./ld_distance.toml` when the variable is unset.
    ///
    /// A missing default file falls back to `Config::default()`; an explicit
    /// `CONFIG_PATH` that cannot be read is an error.
    pub fn load() -> Result<Self> {
        Self::load_with(env::var("CONFIG_PATH").ok(), Path::new(DEFAULT_CONFIG_PATH))
    }

    fn load_with(config_path: Option<String>, default_path: &Path) -> Result<Self> {
        match config_path {
            Some(path) => Self::from_file(path),
            None if default_path.exists() => Self::from_file(default_path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let config_str = fs::read_to_string(path)?;
        Self::from_toml(&config_str)
    }

    pub fn from_toml(config_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan_size == 0 {
            return Err(DistanceError::Config("scan_size must be positive".into()));
        }
        if !self.safe_lower.is_finite() || !self.safe_upper.is_finite() {
            return Err(DistanceError::Config(
                "safe band endpoints must be finite".into(),
            ));
        }
        if self.safe_lower > self.safe_upper {
            return Err(DistanceError::Config(format!(
                "safe_lower ({}) exceeds safe_upper ({})",
                self.safe_lower, self.safe_upper
            )));
        }
        if self.queue_depth == 0 {
            return Err(DistanceError::Config("queue_depth must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_sensor() {
        let config = Config::default();
        assert_eq!(config.scan_size, 453);
        assert_eq!(config.safe_lower, 3.0);
        assert_eq!(config.safe_upper, 8.0);
        assert_eq!(config.distance_topic, "forward_distance");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml("safe_upper = 6.5\nfollow_enabled = true\n").unwrap();
        assert_eq!(config.safe_upper, 6.5);
        assert!(config.follow_enabled);
        assert_eq!(config.scan_size, 453);
        assert_eq!(config.scan_topic, "scan");
    }

    #[test]
    fn inverted_band_rejected() {
        let err = Config::from_toml("safe_lower = 9.0\nsafe_upper = 2.0\n").unwrap_err();
        assert!(matches!(err, DistanceError::Config(_)));
    }

    #[test]
    fn zero_scan_size_rejected() {
        assert!(Config::from_toml("scan_size = 0\n").is_err());
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = Config::from_toml("scan_size = \"lots\"").unwrap_err();
        assert!(matches!(err, DistanceError::Config(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scan_size = 360\nqueue_depth = 4").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.scan_size, 360);
        assert_eq!(config.queue_depth, 4);
    }

    #[test]
    fn default_file_absent_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_with(None, &dir.path().join("ld_distance.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn default_file_used_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ld_distance.toml");
        std::fs::write(&path, "safe_lower = 1.5\n").unwrap();

        let config = Config::load_with(None, &path).unwrap();
        assert_eq!(config.safe_lower, 1.5);
    }

    // Every case touching CONFIG_PATH lives in this one test so they never race.
    #[test]
    fn load_follows_config_path_env() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "scan_size = 720\ndistance_topic = \"front\"").unwrap();

        env::set_var("CONFIG_PATH", file.path());
        let config = Config::load().unwrap();
        assert_eq!(config.scan_size, 720);
        assert_eq!(config.distance_topic, "front");

        let dir = tempfile::tempdir().unwrap();
        env::set_var("CONFIG_PATH", dir.path().join("missing.toml"));
        let err = Config::load().unwrap_err();
        assert!(matches!(err, DistanceError::Io(_)));

        // An explicit path wins even when the default file would be readable.
        let default_path = dir.path().join("ld_distance.toml");
        std::fs::write(&default_path, "scan_size = 100\n").unwrap();
        let err = Config::load_with(env::var("CONFIG_PATH").ok(), &default_path).unwrap_err();
        assert!(matches!(err, DistanceError::Io(_)));

        env::remove_var("CONFIG_PATH");
        let config = Config::load_with(env::var("CONFIG_PATH").ok(), &default_path).unwrap();
        assert_eq!(config.scan_size, 100);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, DistanceError::Io(_)));
    }
}
