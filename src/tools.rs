//! Locating the external dex2jar and CFR artifacts

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{DecompileError, Result};

/// The two external tools a conversion runs through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolKind {
    /// dex2jar launcher script (DEX -> JAR)
    Dex2Jar,
    /// CFR decompiler archive (JAR -> Java sources)
    Cfr,
}

impl ToolKind {
    /// Location relative to the install directory
    pub fn relative_path(&self) -> PathBuf {
        match self {
            ToolKind::Dex2Jar => Path::new("dex2jar").join("d2j-dex2jar.sh"),
            ToolKind::Cfr => PathBuf::from("cfr.jar"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Dex2Jar => "dex2jar",
            ToolKind::Cfr => "cfr",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved paths of both tools. Built once per run, before any package is touched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolLocation {
    pub dex2jar: PathBuf,
    pub cfr: PathBuf,
}

impl ToolLocation {
    /// Resolve both tools under `install_dir`, failing on the first one missing.
    pub fn locate(install_dir: &Path) -> Result<Self> {
        let dex2jar = require_tool(install_dir, ToolKind::Dex2Jar)?;
        let cfr = require_tool(install_dir, ToolKind::Cfr)?;

        warn_if_not_executable(&dex2jar);

        Ok(Self { dex2jar, cfr })
    }

    /// Resolve tools from `--tools-dir` or the running executable's directory.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let dir = match &cfg.tools_dir {
            Some(dir) => dir.clone(),
            None => install_dir()?,
        };
        debug!("Tools directory: {}", dir.display());
        Self::locate(&dir)
    }

    pub fn path(&self, tool: ToolKind) -> &Path {
        match tool {
            ToolKind::Dex2Jar => &self.dex2jar,
            ToolKind::Cfr => &self.cfr,
        }
    }
}

/// Directory holding the resolved (symlink-free) running executable.
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("locating the running executable")?;
    let exe = exe
        .canonicalize()
        .with_context(|| format!("resolving {}", exe.display()))?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))?;
    Ok(dir.to_path_buf())
}

fn require_tool(install_dir: &Path, tool: ToolKind) -> Result<PathBuf> {
    let path = install_dir.join(tool.relative_path());
    if !path.is_file() {
        return Err(DecompileError::ToolMissing { tool, path });
    }
    Ok(path)
}

#[cfg(unix)]
fn warn_if_not_executable(path: &Path) {
    use nix::unistd::{access, AccessFlags};

    if let Err(err) = access(path, AccessFlags::X_OK) {
        warn!("{} is not executable ({err}); launching it will fail", path.display());
    }
}

#[cfg(not(unix))]
fn warn_if_not_executable(_path: &Path) {}
