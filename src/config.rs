use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

use crate::bullet::BulletGlyph;
use crate::error::{Error, Result};
use crate::styled::Color;

const DEFAULT_TOML: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub bullet: BulletConfig,
    pub code: CodeConfig,
    pub quote: QuoteConfig,
    pub page: PageConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct BulletConfig {
    pub color: Option<Color>,
    pub gap_width: f32,
    pub radius: f32,
}

impl Default for BulletConfig {
    fn default() -> Self {
        Self {
            color: None,
            gap_width: 8.0,
            radius: 3.0,
        }
    }
}

impl BulletConfig {
    pub fn glyph(&self) -> BulletGlyph {
        BulletGlyph {
            gap_width: self.gap_width,
            radius: self.radius,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    pub background: Color,
    pub font: String,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xee, 0xee, 0xee),
            font: "DejaVu Sans Mono".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuoteConfig {
    pub margin: f32,
    pub size: f32,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            margin: 16.0,
            size: 1.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub numbers: bool,
}

impl Config {
    /// The defaults shipped in `default_config.toml`.
    pub fn compiled_default() -> Self {
        // build.rs checks the file's syntax and value types
        Self::from_toml(DEFAULT_TOML).unwrap_or_else(|e| {
            warn!(error = %e, "default_config.toml rejected, using built-in defaults");
            Self::default()
        })
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file, or return the compiled defaults if the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::compiled_default()),
            Err(e) => Err(Error::io(path, e)),
        }
    }
}
