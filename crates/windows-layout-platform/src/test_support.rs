use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::commands::{CommandOutput, ProcessHost};
use crate::error::HostError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnRecord {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub detached: bool,
}

/// Scripted [`ProcessHost`] that records every invocation.
///
/// Programs without a scripted response behave as if missing from `PATH`.
#[derive(Default)]
pub struct FakeHost {
    captures: HashMap<String, CommandOutput>,
    runs: HashMap<String, CommandOutput>,
    spawn_error: Option<std::io::ErrorKind>,
    captured: Mutex<Vec<String>>,
    ran: Mutex<Vec<(String, Vec<String>)>>,
    spawned: Mutex<Vec<SpawnRecord>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capture(mut self, program: &str, code: i32, stdout: &[u8]) -> Self {
        self.captures.insert(
            program.to_string(),
            CommandOutput {
                code: Some(code),
                stdout: stdout.to_vec(),
            },
        );
        self
    }

    pub fn with_run(mut self, program: &str, code: i32) -> Self {
        self.runs.insert(
            program.to_string(),
            CommandOutput {
                code: Some(code),
                stdout: Vec::new(),
            },
        );
        self
    }

    pub fn with_spawn_error(mut self, kind: std::io::ErrorKind) -> Self {
        self.spawn_error = Some(kind);
        self
    }

    pub fn captured_programs(&self) -> Vec<String> {
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn runs(&self) -> Vec<(String, Vec<String>)> {
        self.ran
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn spawns(&self) -> Vec<SpawnRecord> {
        self.spawned
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ProcessHost for FakeHost {
    async fn capture(
        &self,
        program: &str,
        args: &[String],
        _timeout: Duration,
    ) -> Result<CommandOutput, HostError> {
        let mut invocation = vec![program.to_string()];
        invocation.extend(args.iter().cloned());
        self.captured
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(invocation.join(" "));

        self.captures
            .get(program)
            .cloned()
            .ok_or_else(|| HostError::not_found(program))
    }

    async fn run(
        &self,
        program: &str,
        args: &[String],
        _timeout: Duration,
    ) -> Result<CommandOutput, HostError> {
        self.ran
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((program.to_string(), args.to_vec()));

        self.runs
            .get(program)
            .cloned()
            .ok_or_else(|| HostError::not_found(program))
    }

    fn spawn(&self, program: &Path, args: &[String], detached: bool) -> std::io::Result<()> {
        if let Some(kind) = self.spawn_error {
            return Err(std::io::Error::new(kind, "scripted spawn failure"));
        }
        self.spawned
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(SpawnRecord {
                program: program.to_path_buf(),
                args: args.to_vec(),
                detached,
            });
        Ok(())
    }
}
