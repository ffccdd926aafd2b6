use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};

const COMMAND_NAMES: [&str; 5] = ["start", "restore", "info", "version", "help"];
const CLAP_FLAGS: [&str; 5] = ["--help", "-h", "--version", "-V", "--verbose"];

#[derive(Parser, Debug)]
#[command(
    name = "windows-layout",
    version,
    about = "Window Layout Manager launcher",
    long_about = "\
A Windows 11 desktop application that saves and restores window layouts
across multiple virtual desktops with custom hotkey support.

Runs natively on Windows, or from WSL through Windows interop.",
    after_help = "\
Examples:
  windows-layout                        Start the application
  windows-layout start --minimized      Start minimized to tray
  windows-layout restore \"Work Setup\"   Restore a specific profile
  windows-layout info                   Show installation paths
  windows-layout /minimize              Pass switches straight through

Requirements:
  - Windows 11 (build 22000 or later)
  - AutoHotkey v2.0+ (for running from source)
    OR
  - Use the pre-compiled .exe (included)

Documentation:
  https://github.com/fullstacktard/windows-layout"
)]
pub struct Cli {
    /// Print debug logs to stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Parse `argv`, also accepting command names in any case, `-v` and
    /// `--info`, and unknown leading switches which go to the executable.
    ///
    /// # Errors
    /// Returns clap's error for anything else it cannot parse.
    pub fn parse_lenient<I, T>(argv: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let leading = argv.get(1).and_then(|arg| arg.to_str()).map(leading_token);

        match leading {
            Some(Leading::Rename(name)) => argv[1] = name.into(),
            Some(Leading::Switch) => {
                let args = argv[1..]
                    .iter()
                    .map(|arg| arg.to_string_lossy().into_owned())
                    .collect();
                return Ok(Self {
                    verbose: false,
                    command: Some(Commands::Passthrough(args)),
                });
            }
            Some(Leading::Keep) | None => {}
        }

        Self::try_parse_from(argv)
    }
}

enum Leading {
    Rename(String),
    Switch,
    Keep,
}

fn leading_token(token: &str) -> Leading {
    if CLAP_FLAGS.contains(&token) {
        return Leading::Keep;
    }
    let lower = token.to_lowercase();
    match lower.as_str() {
        "-v" => Leading::Rename("version".to_string()),
        "--info" => Leading::Rename("info".to_string()),
        name if COMMAND_NAMES.contains(&name) || CLAP_FLAGS.contains(&name) => {
            Leading::Rename(name.to_string())
        }
        _ if token.starts_with('-') => Leading::Switch,
        _ => Leading::Keep,
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Start Window Layout Manager (default)
    Start(StartArgs),
    /// Restore a specific profile by name
    Restore {
        /// Profile name as shown in the manager
        profile: String,
    },
    /// Show installation info and paths
    Info {
        /// Print the paths as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show version number
    Version,
    #[command(external_subcommand)]
    Passthrough(Vec<String>),
}

#[derive(Args, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StartArgs {
    /// Start minimized to system tray
    #[arg(long)]
    pub minimized: bool,
    /// Start with auto-restore enabled
    #[arg(long)]
    pub autostart: bool,
}
