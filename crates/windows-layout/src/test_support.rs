use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use windows_layout_platform::{CommandOutput, HostError, ProcessHost};

/// Host without `wslpath`/`wsl.exe` whose interpreter always succeeds.
#[derive(Default)]
pub struct StubHost {
    pub spawned: Mutex<Vec<Vec<String>>>,
    /// The `-Command` payload of each `powershell.exe` call.
    pub interpreter_commands: Mutex<Vec<String>>,
    pub captured: Mutex<Vec<String>>,
}

#[async_trait]
impl ProcessHost for StubHost {
    async fn capture(
        &self,
        program: &str,
        _args: &[String],
        _timeout: Duration,
    ) -> Result<CommandOutput, HostError> {
        self.captured.lock().expect("lock").push(program.to_string());
        Err(HostError::not_found(program))
    }

    async fn run(
        &self,
        _program: &str,
        args: &[String],
        _timeout: Duration,
    ) -> Result<CommandOutput, HostError> {
        self.interpreter_commands
            .lock()
            .expect("lock")
            .push(args.last().cloned().unwrap_or_default());
        Ok(CommandOutput {
            code: Some(0),
            stdout: Vec::new(),
        })
    }

    fn spawn(&self, _program: &Path, args: &[String], _detached: bool) -> std::io::Result<()> {
        self.spawned.lock().expect("lock").push(args.to_vec());
        Ok(())
    }
}
