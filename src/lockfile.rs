use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::error::{ReleaseError, Result};

/// Resyncs the SDK lockfile by running the package manager in the SDK directory
#[derive(Debug, Clone, PartialEq)]
pub struct LockfileSync {
    program: String,
    args: Vec<String>,
    dir: PathBuf,
}

impl LockfileSync {
    /// Build from an argv list. Returns `None` for an empty command, which disables the sync.
    pub fn from_command(command: &[String], dir: impl Into<PathBuf>) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(LockfileSync {
            program: program.clone(),
            args: args.to_vec(),
            dir: dir.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Human-readable command line
    pub fn display_command(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the command to completion.
    ///
    /// # Returns
    /// * `Ok(())` if the command exits with code 0
    /// * `Err` if the directory is missing, the program cannot be spawned, or it exits non-zero
    pub fn run(&self) -> Result<()> {
        if !self.dir.is_dir() {
            return Err(ReleaseError::not_found(&self.dir));
        }

        info!(command = %self.display_command(), dir = %self.dir.display(), "syncing lockfile");

        let output = Command::new(&self.program)
            .args(&self.args)
            .current_dir(&self.dir)
            .output()
            .map_err(|e| {
                ReleaseError::command(format!(
                    "Failed to execute '{}': {}",
                    self.display_command(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(ReleaseError::command(format!(
                "'{}' failed with exit code {}\nStdout: {}\nStderr: {}",
                self.display_command(),
                output.status.code().unwrap_or(-1),
                stdout,
                stderr
            )));
        }

        debug!("lockfile sync finished");
        Ok(())
    }
}
