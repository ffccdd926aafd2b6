use std::io::Write;
use std::path::Path;

use serde::Serialize;
use windows_layout_platform::{
    EnvironmentInfo, InstallPaths, LaunchOutcome, LaunchRequest, Launcher, ProcessHost,
    StartOptions, restore_arguments,
};

use crate::cli::{Commands, StartArgs};
use crate::error::AppError;
use crate::install;

pub async fn run<H, W>(
    command: Option<Commands>,
    launcher: &Launcher<H>,
    package_dir: &Path,
    out: &mut W,
) -> Result<(), AppError>
where
    H: ProcessHost,
    W: Write,
{
    match command.unwrap_or(Commands::Start(StartArgs::default())) {
        Commands::Start(args) => {
            let options = StartOptions {
                minimized: args.minimized,
                autostart: args.autostart,
            };
            launch(launcher, package_dir, options.arguments(), out).await
        }
        Commands::Restore { profile } => {
            let args = restore_arguments(&profile)?;
            launch(launcher, package_dir, args, out).await
        }
        Commands::Info { json } => {
            let paths = install::install_paths(launcher, package_dir).await?;
            if json {
                write_info_json(launcher.environment(), &paths, out)
            } else {
                write_info(launcher.environment(), &paths, out)
            }
        }
        Commands::Version => {
            writeln!(out, "Window Layout Manager v{}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        Commands::Passthrough(args) => {
            let Some(first) = args.first() else {
                return launch(launcher, package_dir, Vec::new(), out).await;
            };
            if first.starts_with('/') || first.starts_with('-') {
                launch(launcher, package_dir, args, out).await
            } else {
                Err(AppError::unknown_command(first.clone()))
            }
        }
    }
}

async fn launch<H, W>(
    launcher: &Launcher<H>,
    package_dir: &Path,
    arguments: Vec<String>,
    out: &mut W,
) -> Result<(), AppError>
where
    H: ProcessHost,
    W: Write,
{
    let executable = InstallPaths::executable_in(package_dir);
    let is_wsl = launcher.environment().is_compatibility_subsystem;

    if is_wsl {
        writeln!(
            out,
            "Detected WSL environment. Launching via Windows interop..."
        )?;
    } else if launcher.environment().is_native_target {
        writeln!(out, "Starting Window Layout Manager...")?;
    }

    match launcher
        .launch(LaunchRequest::new(executable, arguments))
        .await?
    {
        LaunchOutcome::Delegated { translation } => {
            writeln!(out, "Windows path: {}", translation.target_path)?;
            writeln!(
                out,
                "Window Layout Manager started. Check your Windows system tray."
            )?;
        }
        LaunchOutcome::Spawned => {
            writeln!(out, "Window Layout Manager started. Check your system tray.")?;
        }
    }
    Ok(())
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn write_info<W: Write>(
    environment: &EnvironmentInfo,
    paths: &InstallPaths,
    out: &mut W,
) -> Result<(), AppError> {
    let interop = if paths.is_wsl {
        " (WSL - Windows interop available)"
    } else {
        ""
    };

    writeln!(out, "Window Layout Manager - Installation Info")?;
    writeln!(out)?;
    writeln!(out, "Platform:          {}{interop}", environment.os_family)?;
    writeln!(out, "Package directory: {}", paths.package_dir.display())?;
    writeln!(out, "Executable path:   {}", paths.executable.display())?;
    if let Some(windows_path) = &paths.executable_windows {
        writeln!(out, "Windows path:      {windows_path}")?;
    }
    writeln!(out, "Source path:       {}", paths.source.display())?;
    writeln!(out)?;
    writeln!(
        out,
        "Executable exists: {}",
        yes_no(paths.executable.is_file())
    )?;
    writeln!(out, "Source exists:     {}", yes_no(paths.source.is_file()))?;
    writeln!(out)?;
    writeln!(out, "Profile storage:   {}", paths.profiles.display())?;
    writeln!(out, "Settings file:     {}", paths.settings.display())?;
    writeln!(out, "Log files:         {}", paths.logs.display())?;
    writeln!(out)?;
    writeln!(
        out,
        "To run from source, you need AutoHotkey v2.0+ installed:"
    )?;
    writeln!(out, "  https://www.autohotkey.com/download/")?;
    Ok(())
}

#[derive(Serialize)]
struct InfoReport<'a> {
    environment: &'a EnvironmentInfo,
    paths: &'a InstallPaths,
    executable_exists: bool,
    source_exists: bool,
}

fn write_info_json<W: Write>(
    environment: &EnvironmentInfo,
    paths: &InstallPaths,
    out: &mut W,
) -> Result<(), AppError> {
    let report = InfoReport {
        environment,
        paths,
        executable_exists: paths.executable.is_file(),
        source_exists: paths.source.is_file(),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}
