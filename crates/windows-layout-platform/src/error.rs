use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::environment::OsFamily;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("{program} is not available on PATH")]
    NotFound { program: String },

    #[error("{program}: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {seconds}s")]
    Timeout { program: String, seconds: u64 },
}

impl HostError {
    pub fn not_found(program: impl Into<String>) -> Self {
        Self::NotFound {
            program: program.into(),
        }
    }

    pub fn io(program: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            program: program.into(),
            source,
        }
    }

    pub fn timeout(program: impl Into<String>, timeout: Duration) -> Self {
        Self::Timeout {
            program: program.into(),
            seconds: timeout.as_secs(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Window Layout Manager only works on Windows 11 or WSL (current platform: {os})")]
    UnsupportedPlatform { os: OsFamily },

    #[error("Executable not found at: {}", path.display())]
    ExecutableNotFound { path: PathBuf },

    #[error("Executable path is not valid UTF-8: {}", path.display())]
    NonUnicodePath { path: PathBuf },

    #[error("Profile name is required")]
    MissingProfileName,

    #[error("Failed to spawn {}: {source}", path.display())]
    SpawnFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to launch {windows_path} via PowerShell: {source}")]
    InterpreterInvocationFailed {
        windows_path: String,
        #[source]
        source: HostError,
    },
}
