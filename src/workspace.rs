use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, warn};

use crate::config::{INTERMEDIATE_EXTENSION, WORKSPACE_PREFIX};
use crate::error::{DecompileError, Result};
use crate::validate::PackageFile;

/// Scratch directory holding intermediate archives for one run.
///
/// The directory and everything in it is removed when the workspace is closed
/// or dropped, whichever comes first.
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    /// Create a fresh directory under the system temp root.
    pub fn create() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|source| DecompileError::Workspace { source })?;
        Ok(Self::from_temp_dir(dir))
    }

    /// Create the directory under `root` instead of the system temp root.
    pub fn create_in(root: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| DecompileError::Workspace { source })?;
        Ok(Self::from_temp_dir(dir))
    }

    fn from_temp_dir(dir: TempDir) -> Self {
        let path = dir.path().to_path_buf();
        debug!("Workspace created at {}", path.display());
        Self {
            dir: Some(dir),
            path,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<workspace>/<package stem>.jar`
    pub fn intermediate_archive(&self, package: &PackageFile) -> PathBuf {
        let mut name = package.stem().to_os_string();
        name.push(".");
        name.push(INTERMEDIATE_EXTENSION);
        self.path.join(name)
    }

    /// Remove the directory now, surfacing any deletion error.
    pub fn close(mut self) -> io::Result<()> {
        match self.dir.take() {
            Some(dir) => {
                debug!("Removing workspace {}", self.path.display());
                dir.close()
            }
            None => Ok(()),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if let Some(dir) = self.dir.take() {
            if let Err(err) = dir.close() {
                warn!("Failed to remove workspace {}: {err}", self.path.display());
            }
        }
    }
}
