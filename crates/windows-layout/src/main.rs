//! `windows-layout` starts Window Layout Manager from Windows or from WSL.

mod cli;
mod error;
mod install;
mod logging;
mod run;
mod settings;
#[cfg(test)]
mod test_support;

use std::process::ExitCode;

use windows_layout_platform::Launcher;

use crate::cli::Cli;
use crate::settings::Settings;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_lenient(std::env::args_os()).unwrap_or_else(|error| error.exit());
    let (settings, invalid_settings) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(error) => (Settings::default(), Some(error)),
    };
    logging::init_logging(cli.verbose, &settings);
    if let Some(error) = invalid_settings {
        log::warn!("{error}");
    }

    let launcher = Launcher::system().with_timeouts(settings.timeouts());
    log::debug!("Environment: {}", launcher.environment().display_name());

    let package_dir = install::package_dir(&settings);
    log::debug!("Package directory: {}", package_dir.display());

    let mut stdout = std::io::stdout().lock();
    match run::run(cli.command, &launcher, &package_dir, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::debug!("Command failed: {error:?}");
            eprintln!("Error: {error}");
            for hint in error.hints() {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}
