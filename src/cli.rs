use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::color::ColorMode;
use crate::discovery::FileMode;

const EXAMPLES: &str = "\
Examples:
  dirtree                     Tree of the current directory, two levels deep
  dirtree -D 4 src            Four levels below src/
  dirtree -F file             Ignore git and walk the filesystem
  dirtree -C always | less -R Keep colors when paging";

#[derive(Parser, Debug, Clone)]
#[command(
    name = "dirtree",
    version,
    about = "Print a depth-limited directory tree",
    after_help = EXAMPLES
)]
pub struct Args {
    /// Path to use as the tree root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Max depth to recurse
    #[arg(short = 'D', long = "depth", default_value_t = 2)]
    pub depth: usize,

    /// How to discover files
    #[arg(
        short = 'F',
        long = "file-mode",
        value_enum,
        default_value_t = FileMode::Auto,
        env = "FILE_MODE"
    )]
    pub file_mode: FileMode,

    /// When to use colors
    #[arg(
        short = 'C',
        long = "color",
        value_enum,
        default_value_t = ColorMode::Auto,
        env = "COLOR_MODE"
    )]
    pub color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Enforce invariants after parsing.
    pub fn validated(mut self) -> Self {
        // Respect NO_COLOR env var unless colors were forced
        if self.color == ColorMode::Auto && std::env::var_os("NO_COLOR").is_some() {
            self.color = ColorMode::Never;
        }
        self
    }
}
