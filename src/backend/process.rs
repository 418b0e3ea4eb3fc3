//! Subprocess backend: runs the prebuilt filter program.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use super::{invocation_args, FilterBackend, Phase, RawOutput};
use crate::experiment::ExperimentConfig;
use crate::{Error, Result};

/// Drives the external filter program with the positional argument contract
/// `[mode, R, B, n, trainFlag, p]`.
///
/// Both invocations block until the program exits. stderr is inherited so the
/// program's diagnostics reach the terminal.
#[derive(Debug, Clone)]
pub struct ProcessBackend {
    program: PathBuf,
    working_dir: Option<PathBuf>,
}

impl ProcessBackend {
    /// Create a backend for the program at `program`.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: None,
        }
    }

    /// Run the program from `dir` instead of the current directory.
    #[must_use]
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Get the configured program path.
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    fn command(&self, config: &ExperimentConfig, phase: Phase) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(invocation_args(config, phase))
            .stdin(Stdio::null())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        command
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl FilterBackend for ProcessBackend {
    fn train(&mut self, config: &ExperimentConfig) -> Result<()> {
        tracing::debug!(program = %self.program.display(), %config, "train invocation");
        let status = self
            .command(config, Phase::Train)
            .stdout(Stdio::null())
            .status()
            .map_err(|e| self.spawn_error(e))?;
        log_exit(Phase::Train, config, status);
        Ok(())
    }

    fn test(&mut self, config: &ExperimentConfig) -> Result<RawOutput> {
        tracing::debug!(program = %self.program.display(), %config, "test invocation");
        let output = self
            .command(config, Phase::Test)
            .stdout(Stdio::piped())
            .output()
            .map_err(|e| self.spawn_error(e))?;
        log_exit(Phase::Test, config, output.status);
        Ok(RawOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            exit_code: output.status.code(),
        })
    }
}

// Exit status is reported but never acted on.
fn log_exit(phase: Phase, config: &ExperimentConfig, status: ExitStatus) {
    if !status.success() {
        tracing::warn!(?phase, %config, %status, "filter program exited unsuccessfully; continuing");
    }
}
