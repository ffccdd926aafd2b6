use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;
use windows_layout_platform::AppPaths;

use crate::settings::Settings;

fn trim_log_file_if_oversized(log_path: &Path, max_log_size: u64) {
    if let Ok(metadata) = std::fs::metadata(log_path)
        && metadata.len() > max_log_size
        && let Ok(contents) = std::fs::read(log_path)
    {
        let half = contents.len() / 2;
        let keep_from = contents[half..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(half, |pos| half + pos + 1);
        let _ = std::fs::write(log_path, &contents[keep_from..]);
    }
}

fn terminal_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Terminal logging always; file logging only when `debug_logging` is set.
pub fn init_logging(verbose: bool, settings: &Settings) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("windows_layout")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        terminal_level(verbose),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let mut log_path = None;
    if settings.debug_logging
        && let Ok(paths) = AppPaths::new()
        && paths.ensure_dirs().is_ok()
    {
        let path = paths.log_file();
        trim_log_file_if_oversized(&path, settings.max_log_size_bytes);
        if let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) {
            loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
            log_path = Some(path);
        }
    }

    let _ = CombinedLogger::init(loggers);

    if let Some(path) = log_path {
        log::info!("Debug logging initialized, log file: {}", path.display());
    }
}
