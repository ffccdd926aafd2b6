use crate::commands::{LaunchTimeouts, ProcessHost, SystemHost};
use crate::environment::{self, EnvironmentInfo};
use crate::error::LaunchError;
use crate::path_bridge::{PathBridge, PathTranslation};
use crate::request::LaunchRequest;

const POWERSHELL_EXE: &str = "powershell.exe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// Started directly; nothing is held onto.
    Spawned,
    /// Handed to `powershell.exe` from inside WSL.
    Delegated { translation: PathTranslation },
}

pub struct Launcher<H = SystemHost> {
    environment: EnvironmentInfo,
    host: H,
    timeouts: LaunchTimeouts,
}

impl Launcher<SystemHost> {
    /// Launcher for the current process and the real process table.
    #[must_use]
    pub fn system() -> Self {
        Self::new(environment::detect(), SystemHost)
    }
}

impl<H: ProcessHost> Launcher<H> {
    pub fn new(environment: EnvironmentInfo, host: H) -> Self {
        Self {
            environment,
            host,
            timeouts: LaunchTimeouts::default(),
        }
    }

    #[must_use]
    pub fn with_timeouts(mut self, timeouts: LaunchTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn environment(&self) -> &EnvironmentInfo {
        &self.environment
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn path_bridge(&self) -> PathBridge<'_, H> {
        PathBridge::new(
            &self.host,
            self.environment.subsystem_identity.clone(),
            self.timeouts.helper,
        )
    }

    /// Start the executable once.
    ///
    /// # Errors
    /// Fails without spawning on an unsupported platform or a missing
    /// executable; otherwise fails when the process or interpreter cannot be
    /// started. Nothing is retried.
    pub async fn launch(&self, request: LaunchRequest) -> Result<LaunchOutcome, LaunchError> {
        if !self.environment.is_supported() {
            return Err(LaunchError::UnsupportedPlatform {
                os: self.environment.os_family,
            });
        }

        if !request.executable_path.is_file() {
            return Err(LaunchError::ExecutableNotFound {
                path: request.executable_path,
            });
        }

        if self.environment.is_compatibility_subsystem {
            self.launch_through_interop(request).await
        } else {
            self.launch_native(request)
        }
    }

    fn launch_native(&self, request: LaunchRequest) -> Result<LaunchOutcome, LaunchError> {
        log::debug!(
            "Spawning {} with {:?} (detached: {})",
            request.executable_path.display(),
            request.arguments,
            request.detached
        );

        self.host
            .spawn(
                &request.executable_path,
                &request.arguments,
                request.detached,
            )
            .map_err(|source| LaunchError::SpawnFailed {
                path: request.executable_path,
                source,
            })?;

        Ok(LaunchOutcome::Spawned)
    }

    async fn launch_through_interop(
        &self,
        request: LaunchRequest,
    ) -> Result<LaunchOutcome, LaunchError> {
        let Some(source_path) = request.executable_path.to_str() else {
            return Err(LaunchError::NonUnicodePath {
                path: request.executable_path,
            });
        };
        let translation = self.path_bridge().convert(source_path).await;
        let command = powershell_start_process(&translation.target_path, &request.arguments);
        log::debug!("Delegating to {POWERSHELL_EXE}: {command}");

        let args = ["-NoProfile".to_string(), "-Command".to_string(), command];
        let output = self
            .host
            .run(POWERSHELL_EXE, &args, self.timeouts.interpreter)
            .await
            .map_err(|source| LaunchError::InterpreterInvocationFailed {
                windows_path: translation.target_path.clone(),
                source,
            })?;

        if !output.success() {
            log::warn!(
                "{POWERSHELL_EXE} exited with {:?} while starting {}",
                output.code,
                translation.target_path
            );
        }

        Ok(LaunchOutcome::Delegated { translation })
    }
}

/// Single-quoted PowerShell literal. Embedded quotes are doubled.
#[must_use]
pub fn quote_powershell(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// `Start-Process` invocation for `-Command`.
#[must_use]
pub fn powershell_start_process(windows_path: &str, arguments: &[String]) -> String {
    let mut command = format!("Start-Process -FilePath {}", quote_powershell(windows_path));
    if !arguments.is_empty() {
        let quoted = arguments
            .iter()
            .map(|arg| quote_powershell(arg))
            .collect::<Vec<_>>()
            .join(",");
        command.push_str(" -ArgumentList ");
        command.push_str(&quoted);
    }
    command
}
