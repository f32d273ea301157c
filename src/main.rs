// SPDX-License-Identifier: MIT
//
// squot: terminal pictures, lines and sprites drawn with 2×3 sub-pixels.

mod cli;
mod config;
mod demo;

use anyhow::Result;
use clap::Parser;
use squot_term::color::ColorMode;
use tracing_subscriber::EnvFilter;

use crate::cli::{Args, Command};
use crate::config::Config;
use crate::demo::Settings;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load(args.config.as_deref())?;
    let mut settings = settings(&args, &config)?;
    tracing::debug!(?settings, "starting");

    match args.command {
        Command::View { ref path, style } => demo::view(path, style, &settings),
        Command::Lines => demo::lines(&settings),
        Command::Sprites { frames, fps, slow } => {
            if let Some(frames) = frames {
                settings.frames = frames;
            }
            if let Some(fps) = fps {
                anyhow::ensure!(fps > 0, "--fps must be at least 1");
                settings.fps = fps;
            }
            demo::sprites(&settings, slow)
        }
        Command::Sgr => demo::sgr(),
    }
}

/// Logs go to stderr so they never land between escape sequences.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Flags win over the config file.
fn settings(args: &Args, config: &Config) -> Result<Settings> {
    let mode = if args.palette { ColorMode::Palette } else { config.color_mode.into() };
    let width = args.width.unwrap_or(config.width);
    let height = args.height.unwrap_or(config.height);
    anyhow::ensure!(width > 0 && height > 0, "width and height must be at least 1");

    Ok(Settings {
        mode,
        width,
        height,
        background: config.background_color()?,
        fps: config.fps,
        frames: config.frames,
        alt_screen: config.alt_screen,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use squot_term::color::Color;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_come_from_config() {
        let s = settings(&args(&["squot", "lines"]), &Config::default()).unwrap();
        assert_eq!(
            s,
            Settings {
                mode: ColorMode::TrueColor,
                width: 80,
                height: 24,
                background: Color::BLACK,
                fps: 30,
                frames: 300,
                alt_screen: true,
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let config = Config::parse("width = 40\nheight = 10").unwrap();
        let s = settings(&args(&["squot", "--palette", "-H", "12", "lines"]), &config).unwrap();

        assert_eq!(s.mode, ColorMode::Palette);
        assert_eq!(s.width, 40);
        assert_eq!(s.height, 12);
    }

    #[test]
    fn zero_width_flag_rejected() {
        assert!(settings(&args(&["squot", "-W", "0", "sgr"]), &Config::default()).is_err());
    }
}
