use std::time::Duration;

use serde::Serialize;

use crate::commands::ProcessHost;
use crate::wsl::resolve_subsystem_identity;

const WSLPATH: &str = "wslpath";
const MOUNT_ROOT: &str = "/mnt/";
const UNC_PREFIX: &str = r"\\wsl$\";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStrategy {
    /// `wslpath -w`.
    Primary,
    /// `/mnt/<drive>/...` rewritten to `<DRIVE>:\...`.
    FallbackMount,
    /// `\\wsl$\<distro>\...`.
    FallbackUnc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathTranslation {
    pub source_path: String,
    pub target_path: String,
    pub strategy: TranslationStrategy,
}

/// Turns Linux paths inside WSL into paths Windows programs can open.
///
/// Only meaningful inside WSL.
pub struct PathBridge<'a, H: ProcessHost + ?Sized> {
    host: &'a H,
    subsystem_identity: Option<String>,
    timeout: Duration,
}

impl<'a, H: ProcessHost + ?Sized> PathBridge<'a, H> {
    pub fn new(host: &'a H, subsystem_identity: Option<String>, timeout: Duration) -> Self {
        Self {
            host,
            subsystem_identity,
            timeout,
        }
    }

    pub async fn convert(&self, source_path: &str) -> PathTranslation {
        if let Some(target_path) = self.convert_with_wslpath(source_path).await {
            return PathTranslation {
                source_path: source_path.to_string(),
                target_path,
                strategy: TranslationStrategy::Primary,
            };
        }

        if let Some(target_path) = mount_to_drive_path(source_path) {
            log::info!("{WSLPATH} unavailable, translated {source_path} from its mount point");
            return PathTranslation {
                source_path: source_path.to_string(),
                target_path,
                strategy: TranslationStrategy::FallbackMount,
            };
        }

        let distro = match &self.subsystem_identity {
            Some(distro) => distro.clone(),
            None => resolve_subsystem_identity(self.host, self.timeout).await,
        };
        log::info!("{WSLPATH} unavailable, translated {source_path} through \\\\wsl$\\{distro}");
        PathTranslation {
            source_path: source_path.to_string(),
            target_path: unc_path(&distro, source_path),
            strategy: TranslationStrategy::FallbackUnc,
        }
    }

    async fn convert_with_wslpath(&self, source_path: &str) -> Option<String> {
        let args = ["-w".to_string(), source_path.to_string()];
        match self.host.capture(WSLPATH, &args, self.timeout).await {
            Ok(output) if output.success() => {
                let translated = String::from_utf8_lossy(&output.stdout).trim().to_string();
                (!translated.is_empty()).then_some(translated)
            }
            Ok(output) => {
                log::debug!("{WSLPATH} -w {source_path} exited with {:?}", output.code);
                None
            }
            Err(error) => {
                log::debug!("{WSLPATH} -w {source_path} failed: {error}");
                None
            }
        }
    }
}

/// `/mnt/c/Users/x` becomes `C:\Users\x`; anything else is `None`.
#[must_use]
pub(crate) fn mount_to_drive_path(path: &str) -> Option<String> {
    let rest = path.strip_prefix(MOUNT_ROOT)?;
    let mut segments = rest.split('/');
    let drive = segments.next()?;

    let mut letters = drive.chars();
    let letter = letters.next().filter(char::is_ascii_alphabetic)?;
    if letters.next().is_some() {
        return None;
    }

    let remainder = segments.collect::<Vec<_>>().join("\\");
    Some(format!("{}:\\{remainder}", letter.to_ascii_uppercase()))
}

#[must_use]
pub(crate) fn unc_path(distro: &str, path: &str) -> String {
    let windows_path = path.replace('/', "\\");
    if windows_path.starts_with('\\') {
        format!("{UNC_PREFIX}{distro}{windows_path}")
    } else {
        format!("{UNC_PREFIX}{distro}\\{windows_path}")
    }
}
