use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{DecompileError, Result};
use crate::pipeline::{FileOutcome, Pipeline};
use crate::tools::ToolLocation;
use crate::validate::sanity_check;
use crate::workspace::Workspace;

/// What a completed run did, one outcome per input in order.
#[derive(Debug)]
pub struct RunSummary {
    pub outcomes: Vec<FileOutcome>,
    /// Workspace used by the run. Already removed when the summary is returned.
    pub workspace: PathBuf,
}

impl RunSummary {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_done()).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(FileOutcome::is_done)
    }
}

/// Validate, locate the tools, then convert every package in order.
///
/// Nothing is launched unless validation and tool lookup both pass. The
/// workspace is gone by the time this returns, whichever way it returns.
pub fn run_decompile_workflow(cfg: &Config) -> Result<RunSummary> {
    let packages = sanity_check(cfg)?;

    debug!(
        "Input apks: {}",
        cfg.inputs
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    );
    debug!("Output dir: {}", cfg.output_dir.display());

    let tools = ToolLocation::from_config(cfg)?;

    let workspace = match &cfg.temp_root {
        Some(root) => Workspace::create_in(root)?,
        None => Workspace::create()?,
    };
    let workspace_path = workspace.path().to_path_buf();

    let mut outcomes = Vec::with_capacity(packages.len());
    {
        let pipeline = Pipeline::new(cfg, &tools, &workspace);
        for package in &packages {
            let mut outcome = pipeline.process(package);
            if outcome.failure.as_ref().is_some_and(DecompileError::aborts_run) {
                if let Some(failure) = outcome.failure.take() {
                    return Err(failure);
                }
            }
            outcomes.push(outcome);
        }
    }

    if let Err(err) = workspace.close() {
        warn!("Failed to remove workspace {}: {err}", workspace_path.display());
    }

    let summary = RunSummary {
        outcomes,
        workspace: workspace_path,
    };
    info!(
        "{} of {} package(s) decompiled",
        summary.succeeded(),
        summary.outcomes.len()
    );
    Ok(summary)
}
