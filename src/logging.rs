//! Logging setup
//!
//! The level starts at WARN and moves one step per net `-v`/`-q`, clamped to
//! two steps either way. `RUST_LOG` takes precedence when it is set.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Verbosity};

/// Level filter for the given verbosity.
///
/// There is no level above ERROR, so both quiet steps land there and critical
/// diagnostics still get through.
pub fn level_for(verbosity: Verbosity) -> LevelFilter {
    match verbosity.adjustment() {
        i32::MIN..=-2 => LevelFilter::DEBUG,
        -1 => LevelFilter::INFO,
        0 => LevelFilter::WARN,
        _ => LevelFilter::ERROR,
    }
}

fn env_filter(verbosity: Verbosity) -> EnvFilter {
    filter_from(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(), verbosity)
}

/// A blank `RUST_LOG` counts as unset, otherwise it would disable every level.
fn filter_from(spec: Option<&str>, verbosity: Verbosity) -> EnvFilter {
    let default = level_for(verbosity);
    match spec.map(str::trim) {
        Some(spec) if !spec.is_empty() => EnvFilter::builder()
            .with_default_directive(default.into())
            .parse_lossy(spec),
        _ => EnvFilter::default().add_directive(default.into()),
    }
}

/// Install the global subscriber, writing to `--logfile` or stderr.
pub fn init(cfg: &Config) -> Result<()> {
    let filter = env_filter(cfg.verbosity);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match &cfg.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| anyhow!("installing tracing subscriber: {err}"))?;
        }
        None => {
            builder
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| anyhow!("installing tracing subscriber: {err}"))?;
        }
    }

    tracing::info!("verbosity increased");
    tracing::debug!("verbosity increased");
    Ok(())
}
