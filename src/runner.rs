//! Blocking execution of the external tools

use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::{Command, ExitStatus};

use tracing::info;

use crate::error::{DecompileError, Result};
use crate::tools::{ToolKind, ToolLocation};

/// Output flag understood by `d2j-dex2jar.sh`.
pub const DEX2JAR_OUTPUT_FLAG: &str = "-o";
/// Output directory flag understood by CFR.
pub const CFR_OUTPUT_FLAG: &str = "--outputdir";

/// One fully-specified external command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub tool: ToolKind,
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl Invocation {
    /// `<dex2jar> <package> -o <archive>`
    pub fn dex2jar(tools: &ToolLocation, package: &Path, archive: &Path) -> Self {
        Self {
            tool: ToolKind::Dex2Jar,
            program: tools.path(ToolKind::Dex2Jar).into(),
            args: vec![
                package.into(),
                DEX2JAR_OUTPUT_FLAG.into(),
                archive.into(),
            ],
        }
    }

    /// `<java> -jar <cfr.jar> <archive> --outputdir <dir>`
    pub fn cfr(tools: &ToolLocation, java: &Path, archive: &Path, output_dir: &Path) -> Self {
        Self {
            tool: ToolKind::Cfr,
            program: java.into(),
            args: vec![
                "-jar".into(),
                tools.path(ToolKind::Cfr).into(),
                archive.into(),
                CFR_OUTPUT_FLAG.into(),
                output_dir.into(),
            ],
        }
    }

    /// Space-joined command line, for logs.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run to completion with inherited stdio.
    ///
    /// Only a failure to start the process is an error here; the exit status is
    /// handed back for the caller to judge.
    pub fn run(&self) -> Result<ExitStatus> {
        info!("{} command: {}", self.tool, self.command_line());
        Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| DecompileError::LaunchFailed {
                tool: self.tool,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tools() -> ToolLocation {
        ToolLocation {
            dex2jar: PathBuf::from("/opt/tools/dex2jar/d2j-dex2jar.sh"),
            cfr: PathBuf::from("/opt/tools/cfr.jar"),
        }
    }

    #[test]
    fn test_dex2jar_command_line() {
        let inv = Invocation::dex2jar(
            &tools(),
            Path::new("sample.apk"),
            Path::new("/tmp/ws/sample.jar"),
        );
        assert_eq!(inv.tool, ToolKind::Dex2Jar);
        assert_eq!(
            inv.command_line(),
            "/opt/tools/dex2jar/d2j-dex2jar.sh sample.apk -o /tmp/ws/sample.jar"
        );
    }

    #[test]
    fn test_cfr_command_line() {
        let inv = Invocation::cfr(
            &tools(),
            Path::new("java"),
            Path::new("/tmp/ws/sample.jar"),
            Path::new("out"),
        );
        assert_eq!(inv.tool, ToolKind::Cfr);
        assert_eq!(
            inv.command_line(),
            "java -jar /opt/tools/cfr.jar /tmp/ws/sample.jar --outputdir out"
        );
    }

    #[test]
    fn test_unlaunchable_program_is_launch_failure() {
        let inv = Invocation {
            tool: ToolKind::Cfr,
            program: "/nonexistent/apk-decompile/java".into(),
            args: Vec::new(),
        };
        let err = inv.run().unwrap_err();
        assert!(err.is_launch_failure());
        assert!(err.to_string().starts_with("cfr execution failed"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_is_returned() -> anyhow::Result<()> {
        let ok = Invocation {
            tool: ToolKind::Dex2Jar,
            program: "/bin/sh".into(),
            args: vec!["-c".into(), "exit 0".into()],
        };
        assert!(ok.run()?.success());

        let failing = Invocation {
            tool: ToolKind::Dex2Jar,
            program: "/bin/sh".into(),
            args: vec!["-c".into(), "exit 3".into()],
        };
        assert_eq!(failing.run()?.code(), Some(3));
        Ok(())
    }
}
