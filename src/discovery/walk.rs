use std::path::Path;
use walkdir::WalkDir;

use crate::error::Error;
use crate::tree::{EntryMeta, MetadataSource, TreeNode};

/// Build the tree for `root` with a single recursive walk.
///
/// Entries deeper than `max_depth + 1` segments are never visited: the extra
/// level lets a directory at the boundary learn that it has children to omit.
/// Any unreadable directory aborts the whole walk.
pub fn walk_tree(
    root: &Path,
    max_depth: usize,
    metadata: &dyn MetadataSource,
) -> Result<TreeNode, Error> {
    let mut tree = TreeNode::root(root, max_depth, metadata)?;
    if !tree.meta.is_dir() {
        return Ok(tree);
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .max_depth(max_depth.saturating_add(1))
        .sort_by_file_name();

    for entry_result in walker {
        let entry = entry_result.map_err(|err| Error::Walk {
            path: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf()),
            source: err,
        })?;

        // Skip root itself
        if entry.depth() == 0 {
            continue;
        }

        let meta = entry
            .metadata()
            .map(|m| EntryMeta::from_metadata(&m))
            .map_err(|err| Error::Stat {
                path: entry.path().to_path_buf(),
                source: err.into(),
            })?;

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

        tree.insert(root, &segments, meta, metadata)?;
    }

    Ok(tree)
}
