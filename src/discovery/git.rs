use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::Error;

/// Version-control capability used by discovery, so it can be swapped or mocked.
pub trait VcsLister {
    /// Whether `root` lies inside a working copy. Failing to ask is `false`.
    fn is_working_copy(&self, root: &Path) -> bool;

    /// Tracked and untracked-but-not-ignored files, relative to `root`.
    fn list_files(&self, root: &Path) -> Result<Vec<String>, Error>;
}

/// Default `VcsLister` that shells out to the `git` executable.
pub struct GitCli;

impl GitCli {
    fn command(root: &Path) -> Command {
        let mut cmd = Command::new("git");
        cmd.arg("-C").arg(root).stdin(Stdio::null());
        cmd
    }
}

impl VcsLister for GitCli {
    fn is_working_copy(&self, root: &Path) -> bool {
        let output = Self::command(root)
            .args(["rev-parse", "--is-inside-work-tree"])
            .stderr(Stdio::null())
            .output();

        match output {
            Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim() == "true",
            Ok(out) => {
                debug!(status = %out.status, "git rev-parse failed");
                false
            }
            Err(err) => {
                debug!(error = %err, "could not run git");
                false
            }
        }
    }

    fn list_files(&self, root: &Path) -> Result<Vec<String>, Error> {
        let output = Self::command(root)
            .args([
                "-c",
                "core.quotePath=false",
                "ls-files",
                "--others",
                "--cached",
                "--exclude-standard",
                "-z",
            ])
            .output()
            .map_err(|err| Error::Vcs {
                root: root.to_path_buf(),
                message: format!("failed to run git: {err}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = match stderr.trim() {
                "" => format!("git exited with {}", output.status),
                msg => msg.to_string(),
            };
            return Err(Error::Vcs {
                root: root.to_path_buf(),
                message,
            });
        }

        Ok(parse_listing(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Split NUL-terminated `ls-files -z` output into relative paths, dropping
/// empty entries. Names are taken verbatim; git does not quote them under `-z`.
pub fn parse_listing(output: &str) -> Vec<String> {
    output
        .split('\0')
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}
