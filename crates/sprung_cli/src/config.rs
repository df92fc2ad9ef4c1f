//! Sprung configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sprung_animation::OscillatorConfig;
use std::fs;
use std::path::Path;

/// Top-level configuration (sprung.toml)
#[derive(Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct SprungConfig {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub spring: OscillatorConfig,
}

/// How the animation is driven
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct RunConfig {
    /// Start position
    #[serde(default)]
    pub from: f64,
    /// Target position
    #[serde(default = "default_to")]
    pub to: f64,
    /// Frames per second of the simulated display
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Give up after this many frames
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
}

fn default_to() -> f64 {
    200.0
}

fn default_fps() -> u32 {
    60
}

fn default_max_frames() -> u64 {
    10_000
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            from: 0.0,
            to: default_to(),
            fps: default_fps(),
            max_frames: default_max_frames(),
        }
    }
}

/// Values given on the command line, taking precedence over the file
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub stiffness: Option<f64>,
    pub damping: Option<f64>,
    pub velocity: Option<f64>,
    pub mass: Option<f64>,
    pub precision: Option<f64>,
    pub fps: Option<u32>,
    pub max_frames: Option<u64>,
}

impl Overrides {
    pub fn apply(&self, config: &mut SprungConfig) {
        if let Some(from) = self.from {
            config.run.from = from;
        }
        if let Some(to) = self.to {
            config.run.to = to;
        }
        if let Some(fps) = self.fps {
            config.run.fps = fps;
        }
        if let Some(max_frames) = self.max_frames {
            config.run.max_frames = max_frames;
        }
        if let Some(k) = self.stiffness {
            config.spring.stiffness = k;
        }
        if let Some(d) = self.damping {
            config.spring.damping = d;
        }
        if let Some(v) = self.velocity {
            config.spring.velocity = v;
        }
        if let Some(m) = self.mass {
            config.spring.mass = m;
        }
        if let Some(precision) = self.precision {
            config.spring.precision = precision;
        }
    }
}

impl SprungConfig {
    /// Load configuration from a file, or from `sprung.toml` inside a directory
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join("sprung.toml")
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            anyhow::bail!("No config found at {}", config_path.display());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = SprungConfig::from_toml("").unwrap();
        assert_eq!(config, SprungConfig::default());
        assert_eq!(config.run.fps, 60);
        assert_eq!(config.spring.stiffness, 0.25);
        assert_eq!(config.spring.mass, 10.0);
    }

    #[test]
    fn test_short_names_and_partial_tables() {
        let config = SprungConfig::from_toml(
            r#"
            [run]
            from = -10.0
            to = 50.0

            [spring]
            k = 0.5
            v = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.run.from, -10.0);
        assert_eq!(config.run.to, 50.0);
        assert_eq!(config.run.max_frames, 10_000);
        assert_eq!(config.spring.stiffness, 0.5);
        assert_eq!(config.spring.velocity, 2.0);
        assert_eq!(config.spring.damping, 1.0);
        assert_eq!(config.spring.precision, 0.0001);
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = SprungConfig::default();
        config.spring.damping = 0.3;
        let text = config.to_toml().unwrap();
        assert_eq!(SprungConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(SprungConfig::from_toml("[spring]\nk = \"stiff\"").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = SprungConfig::default();
        Overrides {
            to: Some(5.0),
            damping: Some(2.0),
            mass: Some(1.0),
            fps: Some(120),
            ..Default::default()
        }
        .apply(&mut config);

        assert_eq!(config.run.from, 0.0);
        assert_eq!(config.run.to, 5.0);
        assert_eq!(config.run.fps, 120);
        assert_eq!(config.spring.damping, 2.0);
        assert_eq!(config.spring.mass, 1.0);
        assert_eq!(config.spring.stiffness, 0.25);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = SprungConfig::load(Path::new("/nonexistent/sprung.toml")).unwrap_err();
        assert!(err.to_string().contains("No config found"));
    }
}
