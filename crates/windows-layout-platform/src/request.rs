use std::path::PathBuf;

use crate::error::LaunchError;

const MINIMIZE_SWITCH: &str = "/minimize";
const AUTOSTART_SWITCH: &str = "/autostart";
const RESTORE_SWITCH: &str = "/restore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub executable_path: PathBuf,
    pub arguments: Vec<String>,
    pub detached: bool,
}

impl LaunchRequest {
    #[must_use]
    pub fn new(executable_path: impl Into<PathBuf>, arguments: Vec<String>) -> Self {
        Self {
            executable_path: executable_path.into(),
            arguments,
            detached: true,
        }
    }

    #[must_use]
    pub fn attached(mut self) -> Self {
        self.detached = false;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartOptions {
    /// Start minimized to the system tray.
    pub minimized: bool,
    /// Start with auto-restore enabled.
    pub autostart: bool,
}

impl StartOptions {
    #[must_use]
    pub fn arguments(self) -> Vec<String> {
        let mut args = Vec::new();
        if self.minimized {
            args.push(MINIMIZE_SWITCH.to_string());
        }
        if self.autostart {
            args.push(AUTOSTART_SWITCH.to_string());
        }
        args
    }
}

/// Arguments that make the manager restore a saved profile.
///
/// # Errors
/// Returns [`LaunchError::MissingProfileName`] for a blank profile name.
pub fn restore_arguments(profile: &str) -> Result<Vec<String>, LaunchError> {
    if profile.trim().is_empty() {
        return Err(LaunchError::MissingProfileName);
    }
    Ok(vec![RESTORE_SWITCH.to_string(), profile.to_string()])
}
