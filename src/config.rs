use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_JAVA: &str = "java";
pub const PACKAGE_EXTENSION: &str = "apk";
pub const INTERMEDIATE_EXTENSION: &str = "jar";
pub const WORKSPACE_PREFIX: &str = "apk-decompile-";

/// Furthest the log level may move away from the default in either direction.
pub const MAX_VERBOSITY_SHIFT: i32 = 2;

/// Log verbosity derived from counted `-v`/`-q` flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Verbosity {
    pub verbose: u8,
    pub quiet: u8,
}

impl Verbosity {
    pub fn new(verbose: u8, quiet: u8) -> Self {
        Self { verbose, quiet }
    }

    /// Net shift away from the default level: negative is louder, positive quieter.
    pub fn adjustment(&self) -> i32 {
        (i32::from(self.quiet) - i32::from(self.verbose))
            .clamp(-MAX_VERBOSITY_SHIFT, MAX_VERBOSITY_SHIFT)
    }
}

/// How a tool's exit status affects the package being processed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExitStatusPolicy {
    /// Non-zero exit aborts the package.
    #[default]
    Enforce,
    /// Exit statuses are logged and otherwise ignored.
    Ignore,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub verbosity: Verbosity,
    pub log_file: Option<PathBuf>,
    /// Overrides the executable's own directory when locating tools.
    pub tools_dir: Option<PathBuf>,
    /// Java launcher used to run the decompiler.
    pub java: PathBuf,
    /// Parent of the run's workspace; the system temp root when unset.
    pub temp_root: Option<PathBuf>,
    pub exit_status_policy: ExitStatusPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            verbosity: Verbosity::default(),
            log_file: None,
            tools_dir: None,
            java: PathBuf::from(DEFAULT_JAVA),
            temp_root: None,
            exit_status_policy: ExitStatusPolicy::Enforce,
        }
    }
}
