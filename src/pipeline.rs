//! Per-package conversion: dex2jar into the workspace, then CFR into the output directory

use std::fmt;
use std::path::Path;
use std::process::ExitStatus;

use tracing::{debug, error, warn};

use crate::config::{Config, ExitStatusPolicy};
use crate::error::{DecompileError, Result};
use crate::runner::Invocation;
use crate::tools::{ToolKind, ToolLocation};
use crate::validate::PackageFile;
use crate::workspace::Workspace;

/// Where a package is in its conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Pending,
    Converting,
    Converted,
    Decompiling,
    Done,
    Aborted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Pending => "pending",
            Stage::Converting => "converting",
            Stage::Converted => "converted",
            Stage::Decompiling => "decompiling",
            Stage::Done => "done",
            Stage::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Final state of one package.
#[derive(Debug)]
pub struct FileOutcome {
    pub package: PackageFile,
    pub stage: Stage,
    /// Set when the package was aborted.
    pub failure: Option<DecompileError>,
}

impl FileOutcome {
    pub fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }
}

struct Tracker {
    package: PackageFile,
    stage: Stage,
}

impl Tracker {
    fn advance(&mut self, next: Stage) {
        debug!("{}: {} -> {}", self.package.path().display(), self.stage, next);
        self.stage = next;
    }

    fn finish(mut self) -> FileOutcome {
        self.advance(Stage::Done);
        FileOutcome {
            package: self.package,
            stage: self.stage,
            failure: None,
        }
    }

    fn abort(mut self, failure: DecompileError) -> FileOutcome {
        error!("{}: {failure}", self.package.path().display());
        self.advance(Stage::Aborted);
        FileOutcome {
            package: self.package,
            stage: self.stage,
            failure: Some(failure),
        }
    }
}

/// Everything a conversion needs, borrowed for the duration of a run.
pub struct Pipeline<'a> {
    tools: &'a ToolLocation,
    workspace: &'a Workspace,
    java: &'a Path,
    output_dir: &'a Path,
    policy: ExitStatusPolicy,
}

impl<'a> Pipeline<'a> {
    pub fn new(cfg: &'a Config, tools: &'a ToolLocation, workspace: &'a Workspace) -> Self {
        Self {
            tools,
            workspace,
            java: &cfg.java,
            output_dir: &cfg.output_dir,
            policy: cfg.exit_status_policy,
        }
    }

    /// Convert and decompile one package.
    ///
    /// Every failure ends the package in `Aborted` and comes back inside the
    /// outcome; the caller decides from `aborts_run` whether to go on.
    pub fn process(&self, package: &PackageFile) -> FileOutcome {
        let mut tracker = Tracker {
            package: package.clone(),
            stage: Stage::Pending,
        };

        match self.convert(package, &mut tracker) {
            Ok(()) => tracker.finish(),
            Err(failure) => tracker.abort(failure),
        }
    }

    fn convert(&self, package: &PackageFile, tracker: &mut Tracker) -> Result<()> {
        println!("[*]  Converting {} to jar...", package.path().display());
        tracker.advance(Stage::Converting);

        let archive = self.workspace.intermediate_archive(package);
        let status = Invocation::dex2jar(self.tools, package.path(), &archive).run()?;
        self.check_status(ToolKind::Dex2Jar, status)?;
        if self.policy == ExitStatusPolicy::Enforce && !archive.is_file() {
            return Err(DecompileError::IntermediateMissing { path: archive });
        }
        tracker.advance(Stage::Converted);

        println!("[*]  Decompiling jar file...");
        tracker.advance(Stage::Decompiling);

        let status = Invocation::cfr(self.tools, self.java, &archive, self.output_dir).run()?;
        self.check_status(ToolKind::Cfr, status)?;

        println!(
            "[+]  Decompilation done. Output in {}",
            self.output_dir.display()
        );
        Ok(())
    }

    fn check_status(&self, tool: ToolKind, status: ExitStatus) -> Result<()> {
        if status.success() {
            return Ok(());
        }
        match self.policy {
            ExitStatusPolicy::Enforce => Err(DecompileError::ToolFailed { tool, status }),
            ExitStatusPolicy::Ignore => {
                warn!("{tool} exited with {status}, continuing");
                Ok(())
            }
        }
    }
}
