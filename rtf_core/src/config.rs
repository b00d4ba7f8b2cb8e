//! Configuration file support for the RtF tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/rtf/config.toml`.

use crate::{DuplicatePolicy, Error, ProgramStyle, ProgressionConfig, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub program: ProgramDefaults,

    #[serde(default)]
    pub rounding: RoundingConfig,
}

/// Defaults for programs generated without explicit flags
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProgramDefaults {
    #[serde(default = "default_style")]
    pub style: ProgramStyle,

    #[serde(default = "default_with_deloads")]
    pub with_deloads: bool,

    #[serde(default)]
    pub duplicate_weeks: DuplicatePolicy,
}

impl Default for ProgramDefaults {
    fn default() -> Self {
        Self {
            style: default_style(),
            with_deloads: default_with_deloads(),
            duplicate_weeks: DuplicatePolicy::default(),
        }
    }
}

/// Per-style rounding increments (kg)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundingConfig {
    #[serde(default = "default_standard_kg")]
    pub standard_kg: f64,

    #[serde(default = "default_hypertrophy_kg")]
    pub hypertrophy_kg: f64,
}

impl Default for RoundingConfig {
    fn default() -> Self {
        Self {
            standard_kg: default_standard_kg(),
            hypertrophy_kg: default_hypertrophy_kg(),
        }
    }
}

impl RoundingConfig {
    pub fn for_style(&self, style: ProgramStyle) -> f64 {
        match style {
            ProgramStyle::Standard => self.standard_kg,
            ProgramStyle::Hypertrophy => self.hypertrophy_kg,
        }
    }
}

// Default value functions
fn default_style() -> ProgramStyle {
    ProgramStyle::Standard
}

fn default_with_deloads() -> bool {
    true
}

fn default_standard_kg() -> f64 {
    ProgramStyle::Standard.default_increment_kg()
}

fn default_hypertrophy_kg() -> f64 {
    ProgramStyle::Hypertrophy.default_increment_kg()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = match dirs::config_dir() {
            Some(dir) => dir,
            None => {
                let home = std::env::var("HOME").map_err(|_| {
                    Error::Config("HOME environment variable not set".into())
                })?;
                PathBuf::from(home).join(".config")
            }
        };
        Ok(base.join("rtf").join("config.toml"))
    }

    /// Reject increments the engine would refuse anyway, at load time
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("rounding.standard_kg", self.rounding.standard_kg),
            ("rounding.hypertrophy_kg", self.rounding.hypertrophy_kg),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Build an engine config from these defaults
    ///
    /// `style`, `with_deloads` and `increment_kg` override the file values
    /// when given.
    pub fn progression_config(
        &self,
        initial_weight: f64,
        style: Option<ProgramStyle>,
        with_deloads: Option<bool>,
        increment_kg: Option<f64>,
    ) -> ProgressionConfig {
        let style = style.unwrap_or(self.program.style);
        let increment = increment_kg.unwrap_or_else(|| self.rounding.for_style(style));

        ProgressionConfig::new(
            initial_weight,
            style,
            with_deloads.unwrap_or(self.program.with_deloads),
        )
        .with_increment(increment)
        .with_duplicate_policy(self.program.duplicate_weeks)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.program.style, ProgramStyle::Standard);
        assert!(config.program.with_deloads);
        assert_eq!(config.rounding.standard_kg, 2.5);
        assert_eq!(config.rounding.hypertrophy_kg, 5.0);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.program.style, parsed.program.style);
        assert_eq!(config.rounding.standard_kg, parsed.rounding.standard_kg);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[program]
style = "HYPERTROPHY"
duplicate_weeks = "reject"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.program.style, ProgramStyle::Hypertrophy);
        assert_eq!(config.program.duplicate_weeks, DuplicatePolicy::Reject);
        assert!(config.program.with_deloads); // default
        assert_eq!(config.rounding.hypertrophy_kg, 5.0); // default
    }

    #[test]
    fn test_unknown_style_rejected() {
        let toml_str = r#"
[program]
style = "POWERLIFTING"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_load_from_rejects_bad_increment() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[rounding]\nstandard_kg = 0.0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_printed_toml_loads_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.rounding.standard_kg = 1.25;
        std::fs::write(&path, config.to_toml().unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.rounding.standard_kg, 1.25);
    }

    #[test]
    fn test_progression_config_overrides() {
        let config = Config::default();

        let from_file = config.progression_config(100.0, None, None, None);
        assert_eq!(from_file.style, ProgramStyle::Standard);
        assert_eq!(from_file.increment_kg(), 2.5);
        assert!(from_file.with_deloads);

        let overridden =
            config.progression_config(100.0, Some(ProgramStyle::Hypertrophy), Some(false), None);
        assert_eq!(overridden.increment_kg(), 5.0);
        assert_eq!(overridden.total_weeks(), 18);

        let explicit = config.progression_config(100.0, None, None, Some(1.0));
        assert_eq!(explicit.increment_kg(), 1.0);
    }
}
