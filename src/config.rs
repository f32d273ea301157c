// SPDX-License-Identifier: MIT
//
// Settings file.
//
// Optional TOML, read from --config or <config dir>/squot/config.toml. A
// missing default file means defaults; a missing explicit file is an error.
// Every field is optional and command-line flags win over the file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use squot_term::color::{Color, ColorMode};

/// Color escape family written by the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorModeSetting {
    /// 24-bit colors.
    #[default]
    TrueColor,
    /// 256-color palette.
    Palette,
}

impl From<ColorModeSetting> for ColorMode {
    fn from(setting: ColorModeSetting) -> Self {
        match setting {
            ColorModeSetting::TrueColor => Self::TrueColor,
            ColorModeSetting::Palette => Self::Palette,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub color_mode: ColorModeSetting,
    /// Canvas width in characters.
    pub width: u16,
    /// Canvas height in characters.
    pub height: u16,
    /// Packed background color: `0x000000nn` palette, `0xFFrrggbb` RGB.
    pub background: u32,
    pub fps: u32,
    pub frames: u32,
    /// Animate on the alternate screen when the terminal has one.
    pub alt_screen: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_mode: ColorModeSetting::TrueColor,
            width: 80,
            height: 24,
            background: 0,
            fps: 30,
            frames: 300,
            alt_screen: true,
        }
    }
}

impl Config {
    /// `<config dir>/squot/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("squot").join("config.toml"))
    }

    /// Load `path`, or the default file if `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::read(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => {
                tracing::debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn read(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading config");
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Parse TOML text and check its values.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.width > 0, "width must be at least 1");
        anyhow::ensure!(self.height > 0, "height must be at least 1");
        anyhow::ensure!(self.fps > 0, "fps must be at least 1");
        self.background_color()?;
        Ok(())
    }

    /// The background as a color.
    pub fn background_color(&self) -> Result<Color> {
        Color::from_packed(self.background).context("background is not a valid packed color")
    }
}
