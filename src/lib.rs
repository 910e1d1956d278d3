pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod runner;
pub mod tools;
pub mod validate;
pub mod workflow;
pub mod workspace;

pub use config::Config;
pub use error::{DecompileError, Result};
pub use workflow::{run_decompile_workflow, RunSummary};
