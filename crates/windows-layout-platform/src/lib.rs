//! Platform plumbing for launching Window Layout Manager.
//!
//! The executable itself is an opaque Windows binary. This crate only decides
//! how to start it:
//! - Environment detection (native Windows vs. WSL).
//! - Linux-to-Windows path translation with graceful fallbacks.
//! - Detached spawning, or delegation to `powershell.exe` from inside WSL.
//! - Well-known installation and application paths.

mod commands;
mod environment;
mod error;
mod launcher;
mod path_bridge;
mod paths;
mod request;
mod wsl;

#[cfg(test)]
mod test_support;

/// Process spawning seam plus the real system implementation.
pub use commands::{CommandOutput, Detach, HideWindow, LaunchTimeouts, ProcessHost, SystemHost};
/// Host detection.
pub use environment::{EnvironmentInfo, OsFamily, PROC_VERSION_PATH, detect, detect_with};
pub use error::{HostError, LaunchError};
pub use launcher::{LaunchOutcome, Launcher, powershell_start_process, quote_powershell};
pub use path_bridge::{PathBridge, PathTranslation, TranslationStrategy};
pub use paths::{AppPaths, AppPathsError, InstallPaths};
pub use request::{LaunchRequest, StartOptions, restore_arguments};
pub use wsl::{DEFAULT_DISTRO, resolve_subsystem_identity};
