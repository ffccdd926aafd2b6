use std::path::Path;

use serde::{Deserialize, Serialize};

/// Kernel identity file that carries the WSL vendor markers.
pub const PROC_VERSION_PATH: &str = "/proc/version";

const WSL_MARKERS: [&str; 2] = ["microsoft", "wsl"];
const DISTRO_NAME_VAR: &str = "WSL_DISTRO_NAME";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Linux,
    MacOs,
    Other,
}

impl OsFamily {
    #[must_use]
    pub fn current() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    #[must_use]
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" => Self::Windows,
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::MacOs => "macos",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for OsFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentInfo {
    pub os_family: OsFamily,
    pub is_native_target: bool,
    pub is_compatibility_subsystem: bool,
    /// Distro label, only known up front when WSL exported it.
    pub subsystem_identity: Option<String>,
}

impl EnvironmentInfo {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.is_native_target || self.is_compatibility_subsystem
    }

    #[must_use]
    pub fn display_name(&self) -> String {
        if self.is_compatibility_subsystem {
            match &self.subsystem_identity {
                Some(distro) => format!("WSL: {distro}"),
                None => "WSL".to_string(),
            }
        } else {
            self.os_family.to_string()
        }
    }
}

/// Probe the current process.
#[must_use]
pub fn detect() -> EnvironmentInfo {
    detect_with(
        OsFamily::current(),
        Path::new(PROC_VERSION_PATH),
        std::env::var(DISTRO_NAME_VAR).ok(),
    )
}

/// Probe with every ambient input made explicit.
///
/// The identity file is only read on Linux. An unreadable file means "not
/// WSL"; this never fails.
#[must_use]
pub fn detect_with(
    os_family: OsFamily,
    identity_file: &Path,
    distro_hint: Option<String>,
) -> EnvironmentInfo {
    if os_family != OsFamily::Linux {
        return EnvironmentInfo {
            os_family,
            is_native_target: os_family == OsFamily::Windows,
            is_compatibility_subsystem: false,
            subsystem_identity: None,
        };
    }

    let is_wsl = match std::fs::read_to_string(identity_file) {
        Ok(contents) => is_wsl_kernel(&contents),
        Err(error) => {
            log::debug!(
                "Could not read {}, assuming plain Linux: {error}",
                identity_file.display()
            );
            false
        }
    };

    EnvironmentInfo {
        os_family,
        is_native_target: false,
        is_compatibility_subsystem: is_wsl,
        subsystem_identity: distro_hint
            .filter(|_| is_wsl)
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty()),
    }
}

fn is_wsl_kernel(version: &str) -> bool {
    let version = version.to_lowercase();
    WSL_MARKERS.iter().any(|marker| version.contains(marker))
}
