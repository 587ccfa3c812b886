//! Planner policy configuration.
//!
//! Snap granularity, minimum appointment duration, and grid metrics are
//! policy rather than code; they load from a TOML file under the platform
//! config directory and fall back to the reference defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Reference defaults.
pub const SNAP_MINUTES: u32 = 15;
pub const MIN_DURATION_MINUTES: i64 = 30;
pub const HOURS_TO_LOAD: u32 = 24;
pub const BUFFER_HOURS: u32 = 6;
pub const COLUMN_WIDTH: f32 = 150.0;
pub const ROW_HEIGHT: f32 = 100.0;
pub const RESOURCE_COLUMN_WIDTH: f32 = 288.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Granularity the inverse pixel→time mapping snaps to.
    pub snap_minutes: u32,
    /// Shortest interval a resize may produce.
    pub min_duration_minutes: i64,
    /// Number of hourly columns in the virtual window.
    pub hours_to_load: u32,
    /// Hours loaded beyond the visible window on each side.
    pub buffer_hours: u32,
    pub column_width: f32,
    pub row_height: f32,
    pub resource_column_width: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            snap_minutes: SNAP_MINUTES,
            min_duration_minutes: MIN_DURATION_MINUTES,
            hours_to_load: HOURS_TO_LOAD,
            buffer_hours: BUFFER_HOURS,
            column_width: COLUMN_WIDTH,
            row_height: ROW_HEIGHT,
            resource_column_width: RESOURCE_COLUMN_WIDTH,
        }
    }
}

impl PlannerConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.snap_minutes == 0 || self.snap_minutes > 60 {
            return Err("snap_minutes must be between 1 and 60".to_string());
        }

        if 60 % self.snap_minutes != 0 {
            return Err("snap_minutes must divide evenly into 60".to_string());
        }

        if self.min_duration_minutes <= 0 {
            return Err("min_duration_minutes must be positive".to_string());
        }

        if self.hours_to_load == 0 || self.hours_to_load > 24 {
            return Err("hours_to_load must be between 1 and 24".to_string());
        }

        if self.column_width <= 0.0 || self.row_height <= 0.0 {
            return Err("grid dimensions must be positive".to_string());
        }

        Ok(())
    }

    /// Minimum appointment duration as a chrono duration.
    pub fn min_duration(&self) -> Duration {
        Duration::minutes(self.min_duration_minutes)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PlannerConfig =
            toml::from_str(text).context("Failed to parse planner configuration")?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid planner configuration: {}", e))?;
        Ok(config)
    }

    /// Load a configuration file, falling back to defaults when the file
    /// does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!(
                "No planner config at {:?}, using reference defaults",
                path
            );
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read planner config {:?}", path))?;
        Self::from_toml_str(&text)
    }

    /// Platform config file location (`planner.toml` under the project
    /// config directory), when one can be determined.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "resource-planner")
            .map(|dirs| dirs.config_dir().join("planner.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_constants() {
        let config = PlannerConfig::default();
        assert_eq!(config.snap_minutes, 15);
        assert_eq!(config.min_duration_minutes, 30);
        assert_eq!(config.hours_to_load, 24);
        assert_eq!(config.buffer_hours, 6);
        assert_eq!(config.column_width, 150.0);
        assert_eq!(config.row_height, 100.0);
        assert_eq!(config.resource_column_width, 288.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial_override() {
        let config = PlannerConfig::from_toml_str(
            "snap_minutes = 30\nmin_duration_minutes = 60\n",
        )
        .unwrap();

        assert_eq!(config.snap_minutes, 30);
        assert_eq!(config.min_duration_minutes, 60);
        // Unset fields keep defaults
        assert_eq!(config.hours_to_load, 24);
    }

    #[test]
    fn test_validate_rejects_bad_snap() {
        let mut config = PlannerConfig::default();

        config.snap_minutes = 0;
        assert!(config.validate().is_err());

        config.snap_minutes = 7; // does not divide 60
        assert!(config.validate().is_err());

        config.snap_minutes = 20;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let mut config = PlannerConfig::default();
        config.column_width = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_toml_rejects_invalid() {
        assert!(PlannerConfig::from_toml_str("snap_minutes = 0").is_err());
        assert!(PlannerConfig::from_toml_str("hours_to_load = 48").is_err());
        assert!(PlannerConfig::from_toml_str("not valid toml [").is_err());
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");

        let config = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(config, PlannerConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "row_height = 120.0").unwrap();

        let config = PlannerConfig::load_from(&path).unwrap();
        assert_eq!(config.row_height, 120.0);
        assert_eq!(config.snap_minutes, 15);
    }

    #[test]
    fn test_min_duration() {
        let config = PlannerConfig::default();
        assert_eq!(config.min_duration(), Duration::minutes(30));
    }
}
