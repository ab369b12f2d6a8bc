use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Abstraction over external command execution for testability.
///
/// Production code uses [`RealRunner`], tests use mockall-generated mocks.
/// Execution is synchronous: every call blocks until the child exits.
pub trait ProcessRunner {
    /// Run a command with stdio inherited from this process, failing on
    /// non-zero exit.
    fn run_streaming(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<PathBuf>,
    ) -> Result<(), ProcessError>;

    /// Run a command and capture its stdout.
    fn run_capture(&self, program: &str, args: &[String]) -> Result<String, ProcessError>;
}

/// Real command executor backed by [`std::process::Command`].
pub struct RealRunner;

impl ProcessRunner for RealRunner {
    fn run_streaming(
        &self,
        program: &str,
        args: &[String],
        cwd: Option<PathBuf>,
    ) -> Result<(), ProcessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|e| ProcessError::Spawn {
            program: program.to_owned(),
            source: e,
        })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::CommandFailed {
                program: program.to_owned(),
                args: args.to_vec(),
                status,
            })
        }
    }

    fn run_capture(&self, program: &str, args: &[String]) -> Result<String, ProcessError> {
        let output = Command::new(program)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ProcessError::Spawn {
                program: program.to_owned(),
                source: e,
            })?;

        if output.status.success() {
            String::from_utf8(output.stdout).map_err(|e| ProcessError::InvalidUtf8 {
                program: program.to_owned(),
                source: e,
            })
        } else {
            Err(ProcessError::CommandFailed {
                program: program.to_owned(),
                args: args.to_vec(),
                status: output.status,
            })
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("failed to launch {program}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} {args:?} exited with {status}")]
    CommandFailed {
        program: String,
        args: Vec<String>,
        status: std::process::ExitStatus,
    },

    #[error("{program} output was not valid UTF-8")]
    InvalidUtf8 {
        program: String,
        source: std::string::FromUtf8Error,
    },
}
