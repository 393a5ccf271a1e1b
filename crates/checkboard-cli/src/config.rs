//! Configuration file loading for the console driver.
//!
//! Settings live in a TOML file, `checkboard.toml` by default. A missing
//! file is not an error; every setting has a default.

use checkboard_core::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A side of the board as written in the config file.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl From<Side> for Color {
    fn from(side: Side) -> Color {
        match side {
            Side::White => Color::White,
            Side::Black => Color::Black,
        }
    }
}

/// How the board is drawn.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Draw pieces with chess symbols instead of layout letters.
    #[serde(default = "default_unicode")]
    pub unicode: bool,
    /// Print legal destinations of the origin square after a rejected move.
    #[serde(default)]
    pub hints: bool,
}

fn default_unicode() -> bool {
    true
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            unicode: default_unicode(),
            hints: false,
        }
    }
}

/// A scripted remote opponent.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct OpponentConfig {
    /// Which side the opponent plays. Defaults to black.
    #[serde(default = "default_side")]
    pub side: Side,
    /// File with one reply per line, e.g. `52, 36`.
    #[serde(default)]
    pub script: Option<PathBuf>,
}

fn default_side() -> Side {
    Side::Black
}

impl Default for OpponentConfig {
    fn default() -> Self {
        OpponentConfig {
            side: default_side(),
            script: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub opponent: OpponentConfig,
}

impl CliConfig {
    /// Loads the configuration from `path`.
    ///
    /// If the file does not exist, returns the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// or [`ConfigError::ParseError`] if the file contains invalid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: CliConfig = toml::from_str(
            r#"
            [display]
            unicode = false
            hints = true

            [opponent]
            side = "white"
            script = "replies.txt"
            "#,
        )
        .unwrap();

        assert!(!config.display.unicode);
        assert!(config.display.hints);
        assert_eq!(config.opponent.side, Side::White);
        assert_eq!(config.opponent.script, Some(PathBuf::from("replies.txt")));
    }

    #[test]
    fn missing_sections_use_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.display.unicode);
        assert_eq!(config.opponent.side, Side::Black);
        assert_eq!(config.opponent.script, None);
    }

    #[test]
    fn unknown_side_is_rejected() {
        let result: Result<CliConfig, _> = toml::from_str("[opponent]\nside = \"red\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_default() {
        let path = Path::new("does-not-exist/checkboard.toml");
        assert_eq!(CliConfig::load(path).unwrap(), CliConfig::default());
    }

    #[test]
    fn invalid_file_is_an_error() {
        let path = std::env::temp_dir().join(format!("checkboard-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[display\nunicode = ").unwrap();
        let result = CliConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn side_converts_to_color() {
        assert_eq!(Color::from(Side::White), Color::White);
        assert_eq!(Color::from(Side::Black), Color::Black);
    }
}
