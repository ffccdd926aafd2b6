use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "windows-layout";
const EXECUTABLE_NAME: &str = "WindowLayoutManager.exe";
const SOURCE_NAME: &str = "WindowLayoutManager.ahk";
const MANAGER_DATA_DIR: &str = "WindowLayoutManager";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
}

/// Where the launcher keeps its own settings and logs.
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Build launcher paths for the current platform.
    ///
    /// # Errors
    /// Returns an error when the user config or data directory cannot be
    /// determined.
    pub fn new() -> Result<Self, AppPathsError> {
        Ok(Self {
            config_dir: dirs::config_dir()
                .ok_or(AppPathsError::ConfigDirUnavailable)?
                .join(APP_DIR_NAME),
            data_dir: dirs::data_dir()
                .ok_or(AppPathsError::DataDirUnavailable)?
                .join(APP_DIR_NAME),
        })
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log")
    }

    /// Ensure all launcher directories exist on disk.
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}

/// Well-known locations of the manager's files. Purely derived, no I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallPaths {
    pub package_dir: PathBuf,
    pub executable: PathBuf,
    /// Executable as Windows sees it; only set inside WSL.
    pub executable_windows: Option<String>,
    pub source: PathBuf,
    pub lib: PathBuf,
    pub profiles: PathBuf,
    pub settings: PathBuf,
    pub logs: PathBuf,
    pub is_wsl: bool,
}

impl InstallPaths {
    /// `appdata_dir` is the roaming application-data directory
    /// (`%APPDATA%` on Windows).
    #[must_use]
    pub fn new(package_dir: impl Into<PathBuf>, appdata_dir: &Path, is_wsl: bool) -> Self {
        let package_dir = package_dir.into();
        let manager_data = appdata_dir.join(MANAGER_DATA_DIR);
        Self {
            executable: Self::executable_in(&package_dir),
            executable_windows: None,
            source: package_dir.join(SOURCE_NAME),
            lib: package_dir.join("lib"),
            profiles: manager_data.join("Profiles"),
            settings: manager_data.join("settings.json"),
            logs: manager_data.join("Logs"),
            package_dir,
            is_wsl,
        }
    }

    /// Location of `WindowLayoutManager.exe` inside a package directory.
    #[must_use]
    pub fn executable_in(package_dir: &Path) -> PathBuf {
        package_dir.join(EXECUTABLE_NAME)
    }

    #[must_use]
    pub fn with_windows_executable(mut self, windows_path: impl Into<String>) -> Self {
        self.executable_windows = Some(windows_path.into());
        self
    }

    /// `<home>/AppData/Roaming`, used when the platform has no roaming dir
    /// of its own.
    #[must_use]
    pub fn roaming_dir_under(home: &Path) -> PathBuf {
        home.join("AppData").join("Roaming")
    }
}
