use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::HostError;

#[cfg(windows)]
use std::os::windows::process::CommandExt;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;
#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

const DEFAULT_HELPER_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_INTERPRETER_TIMEOUT: Duration = Duration::from_secs(30);

pub trait HideWindow {
    fn hide_window(&mut self) -> &mut Self;
}

impl HideWindow for tokio::process::Command {
    #[cfg(windows)]
    fn hide_window(&mut self) -> &mut Self {
        self.creation_flags(CREATE_NO_WINDOW)
    }

    #[cfg(not(windows))]
    fn hide_window(&mut self) -> &mut Self {
        self
    }
}

/// Cut a child loose from the parent so it survives the launcher exiting.
pub trait Detach {
    fn detach(&mut self) -> &mut Self;
}

impl Detach for std::process::Command {
    #[cfg(windows)]
    fn detach(&mut self) -> &mut Self {
        self.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP)
    }

    #[cfg(unix)]
    fn detach(&mut self) -> &mut Self {
        use std::os::unix::process::CommandExt;
        self.process_group(0)
    }

    #[cfg(not(any(windows, unix)))]
    fn detach(&mut self) -> &mut Self {
        self
    }
}

/// Upper bounds for the two places the launcher blocks on another process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchTimeouts {
    /// `wslpath` and `wsl.exe` lookups.
    pub helper: Duration,
    /// The `powershell.exe` invocation that starts the target.
    pub interpreter: Duration,
}

impl Default for LaunchTimeouts {
    fn default() -> Self {
        Self {
            helper: DEFAULT_HELPER_TIMEOUT,
            interpreter: DEFAULT_INTERPRETER_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: Vec<u8>,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Everything the launcher needs from the operating system's process table.
///
/// Helper programs are looked up by name on `PATH`; the target executable is
/// addressed by its full path.
#[async_trait]
pub trait ProcessHost: Send + Sync {
    /// Run a helper to completion and capture its stdout.
    async fn capture(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, HostError>;

    /// Run a program to completion with all stdio discarded.
    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, HostError>;

    /// Start a program without waiting for it. Stdio is discarded.
    fn spawn(&self, program: &Path, args: &[String], detached: bool) -> std::io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemHost;

impl SystemHost {
    fn command(program: &str, args: &[String]) -> Result<tokio::process::Command, HostError> {
        let resolved = which::which(program).map_err(|_| HostError::not_found(program))?;
        let mut command = tokio::process::Command::new(resolved);
        command
            .args(args)
            .hide_window()
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        Ok(command)
    }
}

#[async_trait]
impl ProcessHost for SystemHost {
    async fn capture(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, HostError> {
        let child = Self::command(program, args)?
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| HostError::io(program, source))?;

        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => Ok(CommandOutput {
                code: output.status.code(),
                stdout: output.stdout,
            }),
            Ok(Err(source)) => Err(HostError::io(program, source)),
            Err(_) => Err(HostError::timeout(program, timeout)),
        }
    }

    async fn run(
        &self,
        program: &str,
        args: &[String],
        timeout: Duration,
    ) -> Result<CommandOutput, HostError> {
        let mut child = Self::command(program, args)?
            .stdout(Stdio::null())
            .spawn()
            .map_err(|source| HostError::io(program, source))?;

        match tokio::time::timeout(timeout, child.wait()).await {
            Ok(Ok(status)) => Ok(CommandOutput {
                code: status.code(),
                stdout: Vec::new(),
            }),
            Ok(Err(source)) => Err(HostError::io(program, source)),
            Err(_) => Err(HostError::timeout(program, timeout)),
        }
    }

    fn spawn(&self, program: &Path, args: &[String], detached: bool) -> std::io::Result<()> {
        let mut command = std::process::Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        if detached {
            command.detach();
        }
        // Dropping the handle neither waits for nor kills the child.
        command.spawn().map(drop)
    }
}
