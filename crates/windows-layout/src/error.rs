use windows_layout_platform::{AppPathsError, LaunchError};

#[derive(Debug)]
pub enum AppError {
    UnknownCommand { command: String },
    Paths(AppPathsError),
    Launch(LaunchError),
    Output { details: String },
}

impl AppError {
    pub fn unknown_command(command: impl Into<String>) -> Self {
        Self::UnknownCommand {
            command: command.into(),
        }
    }

    /// Follow-up lines printed after the error itself.
    pub fn hints(&self) -> Vec<String> {
        match self {
            Self::UnknownCommand { .. } => {
                vec![r#"Run "windows-layout help" for usage information."#.to_string()]
            }
            Self::Launch(LaunchError::ExecutableNotFound { path }) => vec![
                format!("Expected path: {}", path.display()),
                String::new(),
                "You can compile from source using AutoHotkey v2:".to_string(),
                "  1. Install AutoHotkey v2 from https://www.autohotkey.com/download/".to_string(),
                r#"  2. Right-click WindowLayoutManager.ahk and select "Compile Script""#
                    .to_string(),
            ],
            Self::Launch(LaunchError::MissingProfileName) => {
                vec![r#"Usage: windows-layout restore "Profile Name""#.to_string()]
            }
            Self::Launch(LaunchError::InterpreterInvocationFailed { windows_path, .. }) => vec![
                String::new(),
                "Try running directly from Windows:".to_string(),
                format!("  {windows_path}"),
            ],
            Self::Launch(_) | Self::Paths(_) | Self::Output { .. } => Vec::new(),
        }
    }
}

impl From<LaunchError> for AppError {
    fn from(value: LaunchError) -> Self {
        Self::Launch(value)
    }
}

impl From<AppPathsError> for AppError {
    fn from(value: AppPathsError) -> Self {
        Self::Paths(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Output {
            details: value.to_string(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        Self::Output {
            details: value.to_string(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand { command } => write!(f, "Unknown command: {command}"),
            Self::Paths(error) => write!(f, "{error}"),
            Self::Launch(LaunchError::ExecutableNotFound { .. }) => {
                write!(f, "WindowLayoutManager.exe not found.")
            }
            Self::Launch(error) => write!(f, "{error}"),
            Self::Output { details } => write!(f, "Failed to write output: {details}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnknownCommand { .. } | Self::Output { .. } => None,
            Self::Paths(error) => Some(error),
            Self::Launch(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use windows_layout_platform::{HostError, LaunchError, OsFamily};

    use super::AppError;

    #[test]
    fn unknown_command_points_at_help() {
        let error = AppError::unknown_command("frobnicate");

        assert_eq!(error.to_string(), "Unknown command: frobnicate");
        assert_eq!(
            error.hints(),
            vec![r#"Run "windows-layout help" for usage information."#.to_string()]
        );
    }

    #[test]
    fn missing_executable_explains_how_to_compile() {
        let error = AppError::from(LaunchError::ExecutableNotFound {
            path: PathBuf::from("/opt/wlm/WindowLayoutManager.exe"),
        });

        assert_eq!(error.to_string(), "WindowLayoutManager.exe not found.");
        let hints = error.hints();
        assert_eq!(hints[0], "Expected path: /opt/wlm/WindowLayoutManager.exe");
        assert!(hints.iter().any(|line| line.contains("Compile Script")));
    }

    #[test]
    fn interpreter_failure_suggests_windows_path() {
        let error = AppError::from(LaunchError::InterpreterInvocationFailed {
            windows_path: r"C:\App\app.exe".to_string(),
            source: HostError::not_found("powershell.exe"),
        });

        assert!(error.hints().contains(&r"  C:\App\app.exe".to_string()));
    }

    #[test]
    fn platform_error_displays_library_message() {
        let error = AppError::from(LaunchError::UnsupportedPlatform {
            os: OsFamily::MacOs,
        });

        assert!(error.to_string().contains("Windows 11 or WSL"));
        assert!(error.hints().is_empty());
    }
}
