use std::time::Duration;

use crate::commands::ProcessHost;

/// Label used when the distro list cannot be read.
pub const DEFAULT_DISTRO: &str = "Ubuntu";

const WSL_EXE: &str = "wsl.exe";

/// Name of the first registered WSL distro, or [`DEFAULT_DISTRO`].
///
/// Only used to build a `\\wsl$` fallback path, so every failure degrades to
/// the default instead of surfacing.
pub async fn resolve_subsystem_identity<H>(host: &H, timeout: Duration) -> String
where
    H: ProcessHost + ?Sized,
{
    let args = ["-l".to_string(), "-q".to_string()];

    match host.capture(WSL_EXE, &args, timeout).await {
        Ok(output) if output.success() => {
            let stdout = decode_wsl_output(&output.stdout);
            first_distro(&stdout).unwrap_or_else(|| {
                log::debug!("{WSL_EXE} listed no distros, using {DEFAULT_DISTRO}");
                DEFAULT_DISTRO.to_string()
            })
        }
        Ok(output) => {
            log::debug!(
                "{WSL_EXE} -l -q exited with {:?}, using {DEFAULT_DISTRO}",
                output.code
            );
            DEFAULT_DISTRO.to_string()
        }
        Err(error) => {
            log::debug!("Could not list WSL distros ({error}), using {DEFAULT_DISTRO}");
            DEFAULT_DISTRO.to_string()
        }
    }
}

fn decode_wsl_output(bytes: &[u8]) -> String {
    // wsl.exe writes UTF-16LE, where ASCII names leave every high byte NUL
    let looks_utf16 = bytes.len() >= 2 && bytes.iter().skip(1).step_by(2).any(|&b| b == 0);
    if looks_utf16 {
        let units = bytes
            .chunks_exact(2)
            .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]));
        return char::decode_utf16(units).filter_map(Result::ok).collect();
    }
    String::from_utf8_lossy(bytes).into_owned()
}

fn first_distro(output: &str) -> Option<String> {
    let line = output.lines().next()?;
    let name = line.replace('\0', "").trim().to_string();
    (!name.is_empty()).then_some(name)
}
