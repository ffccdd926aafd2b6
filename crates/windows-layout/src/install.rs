use std::path::{Path, PathBuf};

use windows_layout_platform::{AppPathsError, InstallPaths, Launcher, ProcessHost};

use crate::settings::Settings;

/// Overrides the directory that holds `WindowLayoutManager.exe`.
pub const HOME_VAR: &str = "WINDOWS_LAYOUT_HOME";

pub fn package_dir(settings: &Settings) -> PathBuf {
    resolve_package_dir(
        std::env::var_os(HOME_VAR).map(PathBuf::from),
        settings.package_dir.clone(),
        std::env::current_exe().ok(),
    )
}

/// First existing of: env override, configured dir; else the binary's dir.
fn resolve_package_dir(
    env_dir: Option<PathBuf>,
    configured: Option<PathBuf>,
    current_exe: Option<PathBuf>,
) -> PathBuf {
    env_dir
        .into_iter()
        .chain(configured)
        .find(|dir| dir.is_dir())
        .or_else(|| current_exe.and_then(|exe| exe.parent().map(Path::to_path_buf)))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn appdata_dir() -> Result<PathBuf, AppPathsError> {
    #[cfg(windows)]
    {
        dirs::config_dir().ok_or(AppPathsError::ConfigDirUnavailable)
    }

    #[cfg(not(windows))]
    {
        dirs::home_dir()
            .map(|home| InstallPaths::roaming_dir_under(&home))
            .ok_or(AppPathsError::HomeDirUnavailable)
    }
}

/// Install paths for this environment, with the Windows view of the
/// executable filled in when running inside WSL.
pub async fn install_paths<H: ProcessHost>(
    launcher: &Launcher<H>,
    package_dir: &Path,
) -> Result<InstallPaths, AppPathsError> {
    Ok(install_paths_in(launcher, package_dir, &appdata_dir()?).await)
}

async fn install_paths_in<H: ProcessHost>(
    launcher: &Launcher<H>,
    package_dir: &Path,
    appdata_dir: &Path,
) -> InstallPaths {
    let is_wsl = launcher.environment().is_compatibility_subsystem;
    let paths = InstallPaths::new(package_dir, appdata_dir, is_wsl);
    if !is_wsl {
        return paths;
    }

    let Some(executable) = paths.executable.to_str() else {
        log::warn!(
            "Not translating {}: path is not valid UTF-8",
            paths.executable.display()
        );
        return paths;
    };
    let translation = launcher.path_bridge().convert(executable).await;
    paths.with_windows_executable(translation.target_path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use windows_layout_platform::{EnvironmentInfo, Launcher, OsFamily};

    use super::{install_paths_in, resolve_package_dir};
    use crate::test_support::StubHost;

    fn wsl() -> EnvironmentInfo {
        EnvironmentInfo {
            os_family: OsFamily::Linux,
            is_native_target: false,
            is_compatibility_subsystem: true,
            subsystem_identity: Some("Ubuntu".to_string()),
        }
    }

    #[test]
    fn env_override_wins_when_it_exists() {
        let env_dir = tempfile::tempdir().expect("create env dir");
        let configured = tempfile::tempdir().expect("create configured dir");

        let selected = resolve_package_dir(
            Some(env_dir.path().to_path_buf()),
            Some(configured.path().to_path_buf()),
            Some(PathBuf::from("/usr/local/bin/windows-layout")),
        );

        assert_eq!(selected, env_dir.path());
    }

    #[test]
    fn missing_override_falls_through_to_configured_dir() {
        let configured = tempfile::tempdir().expect("create configured dir");
        let missing = configured.path().join("missing");

        let selected = resolve_package_dir(
            Some(missing),
            Some(configured.path().to_path_buf()),
            None,
        );

        assert_eq!(selected, configured.path());
    }

    #[test]
    fn defaults_to_binary_directory() {
        let selected = resolve_package_dir(
            None,
            None,
            Some(PathBuf::from("/usr/local/bin/windows-layout")),
        );

        assert_eq!(selected, PathBuf::from("/usr/local/bin"));
    }

    #[test]
    fn falls_back_to_current_directory_without_any_hint() {
        assert_eq!(resolve_package_dir(None, None, None), PathBuf::from("."));
    }

    #[tokio::test]
    async fn wsl_install_paths_carry_windows_executable() {
        let package = tempfile::tempdir().expect("create package dir");
        let appdata = tempfile::tempdir().expect("create appdata dir");
        let launcher = Launcher::new(wsl(), StubHost::default());

        let paths = install_paths_in(&launcher, package.path(), appdata.path()).await;

        let windows = paths.executable_windows.expect("windows path set");
        assert!(windows.starts_with(r"\\wsl$\Ubuntu\"));
        assert!(windows.ends_with(r"\WindowLayoutManager.exe"));
        assert_eq!(paths.profiles, appdata.path().join("WindowLayoutManager").join("Profiles"));
    }

    #[cfg(target_os = "linux")]
    #[tokio::test]
    async fn non_utf8_package_dir_skips_translation() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let root = tempfile::tempdir().expect("create root dir");
        let package = root.path().join(OsStr::from_bytes(b"pkg\xff"));
        let launcher = Launcher::new(wsl(), StubHost::default());

        let paths = install_paths_in(&launcher, &package, root.path()).await;

        assert_eq!(paths.executable_windows, None);
        assert!(launcher.host().captured.lock().expect("lock").is_empty());
    }
}
