use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{Config, ExitStatusPolicy, Verbosity, DEFAULT_JAVA, DEFAULT_OUTPUT_DIR};

#[derive(Parser, Debug)]
#[command(
    name = "apk-decompile",
    about = "Android decompiler: turns .apk packages into Java sources with dex2jar and CFR",
    version,
    override_usage = "apk-decompile [OPTIONS] [FILE]...",
    after_help = "Paths are handed to the external tools as raw OS strings, without re-encoding."
)]
pub struct Cli {
    /// Input apk file(s).
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Directory receiving the decompiled sources. Must already exist.
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Increase log level [WARN]. Repeatable.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease log level [WARN]. Repeatable.
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Log to FILE instead of stderr.
    #[arg(long, value_name = "FILE")]
    pub logfile: Option<PathBuf>,

    /// Look for dex2jar and cfr.jar here instead of next to the executable.
    #[arg(long = "tools-dir", value_name = "DIR")]
    pub tools_dir: Option<PathBuf>,

    /// Java launcher used to run CFR.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_JAVA)]
    pub java: PathBuf,

    /// Create the scratch workspace under DIR instead of the system temp root.
    #[arg(long = "temp-dir", value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,

    /// Keep going when a tool exits with a failure status.
    #[arg(long = "ignore-exit-status", action = ArgAction::SetTrue)]
    pub ignore_exit_status: bool,
}

impl Cli {
    pub fn to_config(&self) -> Config {
        let exit_status_policy = if self.ignore_exit_status {
            ExitStatusPolicy::Ignore
        } else {
            ExitStatusPolicy::Enforce
        };

        Config {
            inputs: self.files.clone(),
            output_dir: self.output.clone(),
            verbosity: Verbosity::new(self.verbose, self.quiet),
            log_file: self.logfile.clone(),
            tools_dir: self.tools_dir.clone(),
            java: self.java.clone(),
            temp_root: self.temp_dir.clone(),
            exit_status_policy,
        }
    }
}
