//! File discovery: a depth-pruned filesystem walk or a git listing, both
//! feeding the tree builder.

mod git;
mod walk;

use clap::ValueEnum;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::error::Error;
use crate::tree::{MetadataSource, TreeNode};

pub use git::{parse_listing, GitCli, VcsLister};
pub use walk::walk_tree;

/// How files under the root are discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FileMode {
    /// Tracked plus untracked-but-not-ignored files reported by git.
    Git,
    /// Every entry found by walking the filesystem.
    File,
    /// `git` when the root is inside a working copy, else `file`.
    Auto,
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileMode::Git => "git",
            FileMode::File => "file",
            FileMode::Auto => "auto",
        };
        f.write_str(name)
    }
}

/// Replace `auto` with the concrete mode for `root`. Explicit modes pass through.
pub fn resolve_file_mode(requested: FileMode, root: &Path, vcs: &dyn VcsLister) -> FileMode {
    match requested {
        FileMode::Auto if vcs.is_working_copy(root) => FileMode::Git,
        FileMode::Auto => {
            debug!(root = %root.display(), "not a git working copy, using file mode");
            FileMode::File
        }
        explicit => explicit,
    }
}

/// Build the tree for `root` using `mode`.
///
/// An explicit `git` mode fails when the listing fails; `auto` falls back to
/// the filesystem walk instead.
pub fn discover(
    root: &Path,
    max_depth: usize,
    mode: FileMode,
    vcs: &dyn VcsLister,
    metadata: &dyn MetadataSource,
) -> Result<TreeNode, Error> {
    let resolved = resolve_file_mode(mode, root, vcs);
    info!(root = %root.display(), mode = %resolved, max_depth, "discovering files");

    if resolved != FileMode::Git {
        return walk_tree(root, max_depth, metadata);
    }

    let mut tree = TreeNode::root(root, max_depth, metadata)?;
    let paths = match vcs.list_files(root) {
        Ok(paths) => paths,
        Err(err) if mode == FileMode::Auto => {
            debug!(error = %err, "git listing failed, falling back to file mode");
            return walk_tree(root, max_depth, metadata);
        }
        Err(err) => return Err(err),
    };

    for path in &paths {
        tree.insert_relative(root, path, metadata)?;
    }
    Ok(tree)
}
