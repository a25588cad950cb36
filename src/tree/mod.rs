//! In-memory tree model and the metadata it is built from.

mod insert;

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Kind of a filesystem entry as seen by `lstat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
    Symlink,
    Other,
}

/// The subset of file metadata needed for display. No content is ever read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMeta {
    pub kind: EntryKind,
    /// Unix permission bits (`0` where the platform has none).
    pub mode: u32,
}

impl EntryMeta {
    pub fn new(kind: EntryKind, mode: u32) -> Self {
        Self { kind, mode }
    }

    pub fn dir() -> Self {
        Self::new(EntryKind::Directory, 0o755)
    }

    pub fn file() -> Self {
        Self::new(EntryKind::File, 0o644)
    }

    pub fn from_metadata(metadata: &fs::Metadata) -> Self {
        let file_type = metadata.file_type();
        let kind = if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        };
        Self {
            kind,
            mode: permission_bits(metadata),
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    pub fn is_symlink(&self) -> bool {
        self.kind == EntryKind::Symlink
    }

    /// A regular file with any of the user/group/other execute bits set.
    pub fn is_executable(&self) -> bool {
        self.kind == EntryKind::File && self.mode & 0o111 != 0
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode()
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &fs::Metadata) -> u32 {
    0
}

/// Stat-like lookup used while building a tree, so it can be swapped or mocked.
pub trait MetadataSource {
    /// Metadata of `path` itself, without following a final symlink.
    fn entry(&self, path: &Path) -> io::Result<EntryMeta>;

    /// Metadata of the traversal root.
    fn root(&self, path: &Path) -> io::Result<EntryMeta> {
        self.entry(path)
    }
}

/// Default `MetadataSource` backed by the real filesystem.
pub struct FsMetadata;

impl MetadataSource for FsMetadata {
    fn entry(&self, path: &Path) -> io::Result<EntryMeta> {
        fs::symlink_metadata(path).map(|m| EntryMeta::from_metadata(&m))
    }

    /// The root follows symlinks so a link to a directory still prints a tree.
    fn root(&self, path: &Path) -> io::Result<EntryMeta> {
        fs::metadata(path).map(|m| EntryMeta::from_metadata(&m))
    }
}

/// One entry of the rendered tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Final path segment (or the root's display name).
    pub name: String,
    /// How many further levels may be materialized below this node.
    pub remaining_depth: usize,
    /// Real children exist but were not materialized.
    pub omitted: bool,
    /// Children keyed by name; iteration is name-ordered.
    pub children: BTreeMap<String, TreeNode>,
    pub meta: EntryMeta,
}

impl TreeNode {
    pub fn new(name: impl Into<String>, meta: EntryMeta, remaining_depth: usize) -> Self {
        Self {
            name: name.into(),
            remaining_depth,
            omitted: false,
            children: BTreeMap::new(),
            meta,
        }
    }

    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Follow a `/`-separated path of child names.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    /// Number of levels materialized below this node (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children
            .values()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }
}
