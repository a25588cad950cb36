#![forbid(unsafe_code)]
//! dirtree: depth-limited directory trees, optionally restricted to the files
//! git knows about, colored from `LS_COLORS`.

pub mod cli;
pub mod color;
pub mod discovery;
pub mod error;
pub mod render;
pub mod terminal;
pub mod tree;
