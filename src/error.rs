//! Unified error handling for apk-decompile
//!
//! Every failure a run can hit is one variant of [`DecompileError`]. Only the
//! binary entry point turns these into a process exit status.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

use crate::tools::ToolKind;

/// Exit status reported for every failed run (`-1` as seen by the shell).
pub const FAILURE_EXIT_CODE: u8 = 255;

/// Main error type for apk-decompile operations
#[derive(Debug, Error)]
pub enum DecompileError {
    /// Input path does not exist
    #[error("File does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input path exists but is not a regular file
    #[error("{} is not a file", .0.display())]
    InputNotAFile(PathBuf),

    /// Input file does not carry the package extension
    #[error("{} is not an .apk file (extension: {extension})", path.display())]
    NotAPackage { path: PathBuf, extension: String },

    /// Output directory does not exist
    #[error("Output directory does not exist: {}", .0.display())]
    OutputNotFound(PathBuf),

    /// Output path exists but is not a directory
    #[error("Output is not a directory: {}", .0.display())]
    OutputNotADirectory(PathBuf),

    /// External tool artifact missing at its expected location
    #[error("{tool} not found in {}", path.display())]
    ToolMissing { tool: ToolKind, path: PathBuf },

    /// External tool process could not be started
    #[error("{tool} execution failed: {source}")]
    LaunchFailed {
        tool: ToolKind,
        #[source]
        source: io::Error,
    },

    /// External tool ran but reported failure
    #[error("{tool} exited with {status}")]
    ToolFailed { tool: ToolKind, status: ExitStatus },

    /// dex2jar reported success but left no archive behind
    #[error("intermediate archive was not produced: {}", path.display())]
    IntermediateMissing { path: PathBuf },

    /// Temporary workspace could not be created
    #[error("failed to create temporary workspace: {source}")]
    Workspace {
        #[source]
        source: io::Error,
    },

    /// Generic error for cases not covered above
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for apk-decompile operations
pub type Result<T> = std::result::Result<T, DecompileError>;

impl DecompileError {
    /// Check if this error came from the input/output sanity check
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            DecompileError::InputNotFound(_)
                | DecompileError::InputNotAFile(_)
                | DecompileError::NotAPackage { .. }
                | DecompileError::OutputNotFound(_)
                | DecompileError::OutputNotADirectory(_)
        )
    }

    pub fn is_launch_failure(&self) -> bool {
        matches!(self, DecompileError::LaunchFailed { .. })
    }

    /// Whether this error stops the whole run rather than a single package.
    pub fn aborts_run(&self) -> bool {
        !matches!(
            self,
            DecompileError::ToolFailed { .. } | DecompileError::IntermediateMissing { .. }
        )
    }
}
