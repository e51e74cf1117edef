use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::DriverError;

/// A freshly created directory that is removed again when dropped.
#[derive(Debug)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create `path`. Fails if it exists already, so a stale or concurrent
    /// run is never clobbered.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, DriverError> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                DriverError::io(format!("cannot create '{}'", parent.display()), e)
            })?;
        }
        match fs::create_dir(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                return Err(DriverError::WorkDirExists(path));
            }
            Err(e) => {
                return Err(DriverError::io(
                    format!("cannot create '{}'", path.display()),
                    e,
                ));
            }
        }
        info!(path = %path.display(), "created working directory");
        Ok(WorkDir { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `contents` to `file_name` inside the directory.
    pub fn write(&self, file_name: &str, contents: &str) -> Result<PathBuf, DriverError> {
        let target = self.path.join(file_name);
        fs::write(&target, contents)
            .map_err(|e| DriverError::io(format!("cannot write '{}'", target.display()), e))?;
        Ok(target)
    }
}

impl Drop for WorkDir {
    fn drop(&mut self) {
        match fs::remove_dir_all(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "removed working directory"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "cannot remove working directory"),
        }
    }
}
