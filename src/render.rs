//! Box-drawing rendering of a built tree.

use crate::color::ColorRuleSet;
use crate::tree::TreeNode;
use std::io::{self, Write};
use std::path::{Component, Path};

const TEE: &str = "\u{251c}\u{2500}\u{2500} "; // ├──
const ELBOW: &str = "\u{2514}\u{2500}\u{2500} "; // └──
const PIPE: &str = "\u{2502}   "; // │
const BLANK: &str = "    ";

/// Marker printed for the root when it is the current directory.
pub const ROOT_MARKER: &str = ".";

/// Display name for a traversal root: `.` for the current directory, else the
/// final path component (or the whole path when there is none).
pub fn root_display_name(path: &Path) -> String {
    if path.components().all(|c| c == Component::CurDir) {
        return ROOT_MARKER.to_owned();
    }

    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.as_os_str().to_string_lossy().into_owned())
}

/// Write `root` and everything materialized below it, one line per node.
pub fn render_tree<W: Write>(
    writer: &mut W,
    root: &TreeNode,
    colors: &ColorRuleSet,
) -> io::Result<()> {
    if root.meta.is_dir() && root.name == ROOT_MARKER {
        writeln!(writer, "{ROOT_MARKER}")?;
    } else {
        writeln!(writer, "{}", display_name(root, colors))?;
    }

    if root.meta.is_dir() {
        render_children(writer, root, colors, "")?;
    }
    Ok(())
}

/// Render and flush. A reader that went away (`dirtree | head`) leaves a
/// closed pipe behind, which counts as a complete write.
pub fn write_tree<W: Write>(
    writer: &mut W,
    root: &TreeNode,
    colors: &ColorRuleSet,
) -> io::Result<()> {
    match render_tree(writer, root, colors).and_then(|()| writer.flush()) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Formatted name, with a `/` suffix for directories.
fn display_name(node: &TreeNode, colors: &ColorRuleSet) -> String {
    let name = colors.format_name(&node.name, &node.meta);
    if node.meta.is_dir() && !node.name.ends_with('/') {
        format!("{name}/")
    } else {
        name
    }
}

/// Print the children of `node`. `indent` is owned by this call; each child
/// directory gets its own extended copy.
fn render_children<W: Write>(
    writer: &mut W,
    node: &TreeNode,
    colors: &ColorRuleSet,
    indent: &str,
) -> io::Result<()> {
    if node.omitted {
        return writeln!(writer, "{indent}{ELBOW}...");
    }

    let last = node.children.len().saturating_sub(1);
    for (i, child) in node.children.values().enumerate() {
        let (connector, continuation) = if i == last {
            (ELBOW, BLANK)
        } else {
            (TEE, PIPE)
        };
        writeln!(writer, "{indent}{connector}{}", display_name(child, colors))?;

        if child.meta.is_dir() {
            let child_indent = format!("{indent}{continuation}");
            render_children(writer, child, colors, &child_indent)?;
        }
    }
    Ok(())
}
