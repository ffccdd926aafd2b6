use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use windows_layout_platform::{AppPaths, LaunchTimeouts};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Directory holding `WindowLayoutManager.exe`.
    #[serde(default)]
    pub package_dir: Option<PathBuf>,

    #[serde(default)]
    pub debug_logging: bool,

    #[serde(default = "default_max_log_size_bytes")]
    pub max_log_size_bytes: u64,

    #[serde(default = "default_helper_timeout")]
    pub helper_timeout_secs: u64,

    #[serde(default = "default_interpreter_timeout")]
    pub interpreter_timeout_secs: u64,
}

const MIN_TIMEOUT_SECS: u64 = 1;

fn default_max_log_size_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_helper_timeout() -> u64 {
    10
}

fn default_interpreter_timeout() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            package_dir: None,
            debug_logging: false,
            max_log_size_bytes: default_max_log_size_bytes(),
            helper_timeout_secs: default_helper_timeout(),
            interpreter_timeout_secs: default_interpreter_timeout(),
        }
    }
}

/// Settings file that exists but cannot be parsed.
#[derive(Debug)]
pub struct InvalidSettings {
    pub path: PathBuf,
    pub source: serde_json::Error,
}

impl std::fmt::Display for InvalidSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ignoring invalid settings in {}: {}",
            self.path.display(),
            self.source
        )
    }
}

impl std::error::Error for InvalidSettings {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl Settings {
    /// # Errors
    /// Returns [`InvalidSettings`] when the settings file is not valid JSON.
    pub fn load() -> Result<Self, InvalidSettings> {
        let Ok(paths) = AppPaths::new() else {
            return Ok(Self::default());
        };
        Self::load_from(&paths.settings_file())
    }

    /// A missing or unreadable file yields the defaults.
    ///
    /// # Errors
    /// Returns [`InvalidSettings`] when the file is not valid JSON.
    pub fn load_from(path: &Path) -> Result<Self, InvalidSettings> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(|source| InvalidSettings {
                path: path.to_path_buf(),
                source,
            }),
            Err(_) => Ok(Self::default()),
        }
    }

    /// Zero-second timeouts are raised to one second.
    pub fn timeouts(&self) -> LaunchTimeouts {
        LaunchTimeouts {
            helper: Duration::from_secs(self.helper_timeout_secs.max(MIN_TIMEOUT_SECS)),
            interpreter: Duration::from_secs(self.interpreter_timeout_secs.max(MIN_TIMEOUT_SECS)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use serde_json::json;

    use super::Settings;

    #[test]
    fn defaults_match_expected_limits() {
        let settings = Settings::default();

        assert_eq!(settings.package_dir, None);
        assert!(!settings.debug_logging);
        assert_eq!(settings.max_log_size_bytes, 5 * 1024 * 1024);
        assert_eq!(settings.helper_timeout_secs, 10);
        assert_eq!(settings.interpreter_timeout_secs, 30);
    }

    #[test]
    fn partial_json_keeps_defaults_for_missing_fields() {
        let settings: Settings = serde_json::from_value(json!({
            "package_dir": "/opt/wlm",
            "interpreter_timeout_secs": 5
        }))
        .expect("settings JSON should deserialize");

        assert_eq!(settings.package_dir, Some(PathBuf::from("/opt/wlm")));
        assert_eq!(settings.interpreter_timeout_secs, 5);
        assert_eq!(settings.helper_timeout_secs, 10);
    }

    #[test]
    fn timeouts_convert_seconds() {
        let settings = Settings {
            helper_timeout_secs: 3,
            interpreter_timeout_secs: 7,
            ..Settings::default()
        };

        let timeouts = settings.timeouts();

        assert_eq!(timeouts.helper, Duration::from_secs(3));
        assert_eq!(timeouts.interpreter, Duration::from_secs(7));
    }

    #[test]
    fn zero_timeouts_are_raised_to_one_second() {
        let settings = Settings {
            helper_timeout_secs: 0,
            interpreter_timeout_secs: 0,
            ..Settings::default()
        };

        let timeouts = settings.timeouts();

        assert_eq!(timeouts.helper, Duration::from_secs(1));
        assert_eq!(timeouts.interpreter, Duration::from_secs(1));
    }

    #[test]
    fn load_from_defaults_when_file_is_missing() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let missing = temp_dir.path().join("settings.json");

        let settings = Settings::load_from(&missing).expect("missing file is not an error");

        assert_eq!(settings.helper_timeout_secs, 10);
    }

    #[test]
    fn load_from_reports_invalid_file() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").expect("write invalid settings");

        let error = Settings::load_from(&path).expect_err("invalid JSON should be reported");

        assert_eq!(error.path, path);
        assert!(error.to_string().starts_with("Ignoring invalid settings in "));
    }

    #[test]
    fn load_from_reads_saved_file() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "debug_logging": true }"#).expect("write settings");

        let settings = Settings::load_from(&path).expect("settings should load");

        assert!(settings.debug_logging);
    }
}
