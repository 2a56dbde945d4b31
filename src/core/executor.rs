// quickmagick/src/core/executor.rs
use super::Result;
use std::process::Command;
use tempfile::TempPath;

/// Captured result of one external tool invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// Runs an external command. `args` is an already quoted argument string,
/// as produced by [`Image::command_line`](crate::Image::command_line).
pub trait ProcessExecutor: Send + Sync {
    fn run(&self, program: &str, args: &str) -> Result<ProcessOutput>;
}

/// Hands out scoped temporary files. The file is removed when the returned
/// [`TempPath`] is dropped.
pub trait TempFileProvider: Send + Sync {
    fn create(&self, prefix: &str) -> Result<TempPath>;
}

/// Executes commands through the platform shell so that quoting applied by
/// the escaper is interpreted the same way a terminal would.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        Self
    }

    fn shell(line: &str) -> Command {
        if cfg!(windows) {
            let mut command = Command::new("cmd");
            command.arg("/C").arg(line);
            command
        } else {
            let mut command = Command::new("sh");
            command.arg("-c").arg(line);
            command
        }
    }
}

impl ProcessExecutor for SystemExecutor {
    fn run(&self, program: &str, args: &str) -> Result<ProcessOutput> {
        let line = format!("{} {}", program, args);
        let output = Self::shell(&line).output()?;

        Ok(ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            status: output.status.code(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTempFiles;

impl TempFileProvider for SystemTempFiles {
    fn create(&self, prefix: &str) -> Result<TempPath> {
        let file = tempfile::Builder::new().prefix(prefix).tempfile()?;
        Ok(file.into_temp_path())
    }
}
