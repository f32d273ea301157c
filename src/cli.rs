// SPDX-License-Identifier: MIT
//
// Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "squot")]
#[command(version)]
#[command(about = "Draw pictures, lines and sprites in the terminal with 2×3 sub-character pixels", long_about = None)]
pub struct Args {
    /// Config file (defaults to <config dir>/squot/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Downgrade 24-bit colors to the 256-color palette
    #[arg(long, global = true)]
    pub palette: bool,

    /// Canvas width in characters
    #[arg(short = 'W', long, global = true)]
    pub width: Option<u16>,

    /// Canvas height in characters
    #[arg(short = 'H', long, global = true)]
    pub height: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show a picture (JPEG, PNG, GIF, ...)
    View {
        /// Picture to show
        path: PathBuf,

        /// How pixels map onto characters
        #[arg(short, long, value_enum, default_value_t = ViewStyle::HalfBlock)]
        style: ViewStyle,
    },

    /// Draw a fan of lines on a squot canvas
    Lines,

    /// Bounce sprites around using differential redraw
    Sprites {
        /// Frames to draw (overrides the config file)
        #[arg(long)]
        frames: Option<u32>,

        /// Frames per second (overrides the config file)
        #[arg(long)]
        fps: Option<u32>,

        /// Flush one byte at a time to watch the diff arrive
        #[arg(long)]
        slow: bool,
    },

    /// Show every SGR text attribute
    Sgr,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewStyle {
    /// 2×3 two-color sub-pixels per character
    Squot,
    /// Two full-color pixels per character
    HalfBlock,
    /// One full-color pixel per character
    FullChar,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }

    #[test]
    fn parses_view_with_global_flags() {
        let args = Args::try_parse_from(["squot", "view", "dragon.jpg", "--palette", "-W", "100"]).unwrap();
        assert!(args.palette);
        assert_eq!(args.width, Some(100));
        match args.command {
            Command::View { path, style } => {
                assert_eq!(path, PathBuf::from("dragon.jpg"));
                assert_eq!(style, ViewStyle::HalfBlock);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_sprites_overrides() {
        let args = Args::try_parse_from(["squot", "-vv", "sprites", "--frames", "10", "--slow"]).unwrap();
        assert_eq!(args.verbose, 2);
        assert!(matches!(
            args.command,
            Command::Sprites { frames: Some(10), fps: None, slow: true }
        ));
    }

    #[test]
    fn view_requires_a_path() {
        assert!(Args::try_parse_from(["squot", "view"]).is_err());
    }
}
