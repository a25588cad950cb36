#![allow(dead_code)]

use dirtree::color::ColorRuleSet;
use dirtree::discovery::{discover, FileMode, GitCli};
use dirtree::render::render_tree;
use dirtree::tree::{FsMetadata, TreeNode};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Create a directory structure from a list of relative paths.
/// Paths ending with '/' create directories; others create empty files.
pub fn create_fixture(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for p in paths {
        let full = tmp.path().join(p);
        if p.ends_with('/') {
            fs::create_dir_all(&full).unwrap();
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&full, "").unwrap();
        }
    }
    tmp
}

/// Walk `root` in file mode.
pub fn walk(root: &Path, depth: usize) -> TreeNode {
    discover(root, depth, FileMode::File, &GitCli, &FsMetadata).unwrap()
}

/// Render a tree without colors.
pub fn render_plain(tree: &TreeNode) -> String {
    render_with(tree, &ColorRuleSet::disabled())
}

pub fn render_with(tree: &TreeNode, colors: &ColorRuleSet) -> String {
    let mut out = Vec::new();
    render_tree(&mut out, tree, colors).unwrap();
    String::from_utf8(out).unwrap()
}

/// Relative paths (`/`-joined) of every node marked omitted; `""` is the root.
pub fn omitted_paths(tree: &TreeNode) -> Vec<String> {
    fn visit(node: &TreeNode, path: &str, out: &mut Vec<String>) {
        if node.omitted {
            out.push(path.to_string());
        }
        for (name, child) in &node.children {
            let child_path = if path.is_empty() {
                name.clone()
            } else {
                format!("{path}/{name}")
            };
            visit(child, &child_path, out);
        }
    }
    let mut out = Vec::new();
    visit(tree, "", &mut out);
    out
}

/// Whether a usable `git` executable is on PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// `git init` a directory quietly.
pub fn git_init(dir: &Path) {
    let status = Command::new("git")
        .arg("-C")
        .arg(dir)
        .args(["init", "-q"])
        .status()
        .unwrap();
    assert!(status.success(), "git init failed");
}
