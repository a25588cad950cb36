//! Incremental, depth-bounded tree construction from relative paths.

use std::path::Path;

use super::{EntryMeta, MetadataSource, TreeNode};
use crate::error::Error;
use crate::render::root_display_name;

impl TreeNode {
    /// Stat the traversal root and create its node with a budget of `max_depth` levels.
    pub fn root(path: &Path, max_depth: usize, source: &dyn MetadataSource) -> Result<Self, Error> {
        let meta = source.root(path).map_err(|source| Error::Stat {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(TreeNode::new(root_display_name(path), meta, max_depth))
    }

    /// Insert the entry at `segments` (relative to this node, which lives at `base`).
    ///
    /// A node whose budget is spent never grows children; it only records that
    /// something was omitted below it. Intermediate directories are stat'ed
    /// through `source` the first time they are seen.
    pub fn insert(
        &mut self,
        base: &Path,
        segments: &[&str],
        meta: EntryMeta,
        source: &dyn MetadataSource,
    ) -> Result<(), Error> {
        if self.remaining_depth == 0 {
            self.omitted = true;
            return Ok(());
        }

        let Some((first, rest)) = segments.split_first() else {
            return Ok(());
        };
        let child_depth = self.remaining_depth - 1;

        if rest.is_empty() {
            // Re-inserting an existing entry refreshes its metadata but keeps
            // anything already materialized below it.
            self.children
                .entry((*first).to_string())
                .and_modify(|child| child.meta = meta)
                .or_insert_with(|| TreeNode::new(*first, meta, child_depth));
            return Ok(());
        }

        let path = base.join(first);
        if let Some(child) = self.children.get_mut(*first) {
            return child.insert(&path, rest, meta, source);
        }

        let child_meta = source.entry(&path).map_err(|source| Error::Stat {
            path: path.clone(),
            source,
        })?;
        let mut child = TreeNode::new(*first, child_meta, child_depth);
        child.insert(&path, rest, meta, source)?;
        self.children.insert((*first).to_string(), child);
        Ok(())
    }

    /// Stat `root/relative` and insert it. `relative` uses `/` separators.
    pub fn insert_relative(
        &mut self,
        root: &Path,
        relative: &str,
        source: &dyn MetadataSource,
    ) -> Result<(), Error> {
        let path = root.join(relative);
        let meta = source
            .entry(&path)
            .map_err(|source| Error::Stat { path, source })?;
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        self.insert(root, &segments, meta, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::EntryKind;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    /// Paths registered as files are files, everything else is a directory,
    /// except paths listed in `missing`.
    #[derive(Default)]
    struct MockMetadata {
        files: HashMap<PathBuf, EntryMeta>,
        missing: Vec<PathBuf>,
    }

    impl MockMetadata {
        fn with_files(paths: &[&str]) -> Self {
            let mut mock = Self::default();
            for p in paths {
                mock.files.insert(Path::new("/r").join(p), EntryMeta::file());
            }
            mock
        }
    }

    impl MetadataSource for MockMetadata {
        fn entry(&self, path: &Path) -> io::Result<EntryMeta> {
            if self.missing.iter().any(|m| m == path) {
                return Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
            }
            Ok(self.files.get(path).copied().unwrap_or_else(EntryMeta::dir))
        }
    }

    fn build(paths: &[&str], depth: usize) -> TreeNode {
        let mock = MockMetadata::with_files(paths);
        let mut root = TreeNode::root(Path::new("/r"), depth, &mock).unwrap();
        for p in paths {
            root.insert_relative(Path::new("/r"), p, &mock).unwrap();
        }
        root
    }

    #[test]
    fn zero_budget_root_only_marks_omitted() {
        let root = build(&["a.txt", "b/c.txt"], 0);
        assert!(root.omitted);
        assert!(root.children.is_empty());
    }

    #[test]
    fn budget_one_materializes_only_direct_children() {
        let root = build(&["a.txt", "b/c.txt", "b/d/e.txt"], 1);
        assert_eq!(root.children.keys().collect::<Vec<_>>(), vec!["a.txt", "b"]);
        let b = root.child("b").unwrap();
        assert_eq!(b.remaining_depth, 0);
        assert!(b.omitted);
        assert!(b.children.is_empty());
        assert!(!root.child("a.txt").unwrap().omitted);
    }

    #[test]
    fn intermediate_directories_are_created_with_decreasing_budget() {
        let root = build(&["src/tree/mod.rs"], 3);
        let src = root.child("src").unwrap();
        let tree = src.child("tree").unwrap();
        let leaf = tree.child("mod.rs").unwrap();
        assert_eq!(root.remaining_depth, 3);
        assert_eq!(src.remaining_depth, 2);
        assert_eq!(tree.remaining_depth, 1);
        assert_eq!(leaf.remaining_depth, 0);
        assert_eq!(src.meta.kind, EntryKind::Directory);
        assert_eq!(leaf.meta.kind, EntryKind::File);
    }

    #[test]
    fn insertion_order_does_not_change_shape() {
        let paths = ["a/b/c.txt", "a/b", "a", "a/d.txt", "e.txt", "a/b/f/g.txt"];
        let forward = build(&paths, 2);
        let mut reversed_paths = paths;
        reversed_paths.reverse();
        let reversed = build(&reversed_paths, 2);
        assert_eq!(forward, reversed);
        assert!(forward.find("a/b").unwrap().omitted);
    }

    #[test]
    fn reinserting_a_directory_keeps_its_children() {
        let mock = MockMetadata::with_files(&["a/x.txt"]);
        let mut root = TreeNode::root(Path::new("/r"), 3, &mock).unwrap();
        root.insert_relative(Path::new("/r"), "a/x.txt", &mock).unwrap();
        root.insert_relative(Path::new("/r"), "a", &mock).unwrap();
        assert!(root.find("a/x.txt").is_some());
    }

    #[test]
    fn empty_segments_are_a_no_op() {
        let mock = MockMetadata::default();
        let mut root = TreeNode::root(Path::new("/r"), 2, &mock).unwrap();
        root.insert(Path::new("/r"), &[], EntryMeta::file(), &mock)
            .unwrap();
        assert!(root.children.is_empty());
        assert!(!root.omitted);
    }

    #[test]
    fn failing_intermediate_stat_names_the_path() {
        let mut mock = MockMetadata::with_files(&["gone/f.txt"]);
        mock.missing.push(PathBuf::from("/r/gone"));
        let mut root = TreeNode::root(Path::new("/r"), 2, &mock).unwrap();
        let err = root
            .insert(Path::new("/r"), &["gone", "f.txt"], EntryMeta::file(), &mock)
            .unwrap_err();
        match err {
            Error::Stat { path, .. } => assert_eq!(path, PathBuf::from("/r/gone")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(root.children.is_empty());
    }
}
