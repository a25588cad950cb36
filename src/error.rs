//! Error types shared by discovery, tree building, and color parsing.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors raised while building a tree.
#[derive(Debug, Error)]
pub enum Error {
    /// A path could not be stat'ed (missing, permission denied, ...).
    #[error("getting status for {}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A directory could not be listed during a filesystem walk.
    #[error("traversing {}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The version-control listing could not be produced.
    #[error("listing git files in {}: {message}", root.display())]
    Vcs { root: PathBuf, message: String },
}

/// A clause of a color-rule string that could not be understood.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("invalid clause `{0}`: expected exactly one `=`")]
    MissingEquals(String),

    #[error("unknown clause `{0}`")]
    UnknownKey(String),
}
