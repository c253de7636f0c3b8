// Logger setup
// Terminal output goes to stderr so the JSON report on stdout stays clean.

use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::Level;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::{LogConfig, ModuleConfig};

fn apply_module_levels(mut dispatch: fern::Dispatch, modules: &[ModuleConfig]) -> fern::Dispatch {
    for module in modules {
        dispatch = dispatch.level_for(module.module.clone(), module.level.into());
    }
    dispatch
}

// Date-based files are named by appending to this prefix, so it must end with a separator
fn date_based_prefix(logs_path: &str) -> PathBuf {
    Path::new(logs_path).join("")
}

fn format_level(colors: &ColoredLevelConfig, level: Level, use_color: bool) -> String {
    if use_color {
        colors.color(level).to_string()
    } else {
        level.to_string()
    }
}

pub fn setup_logger(config: &LogConfig) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::Magenta);

    let use_color = !config.disable_log_color;
    let datetime_format = config.datetime_format.clone();
    let terminal = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] [{}] {}",
                chrono::Local::now().format(&datetime_format),
                format_level(&colors, record.level(), use_color),
                record.target(),
                message
            ))
        })
        .level(config.log_level.into())
        .chain(std::io::stderr());

    let mut base = fern::Dispatch::new().chain(apply_module_levels(terminal, &config.logs_modules));

    if !config.disable_file_logging {
        fs::create_dir_all(&config.logs_path)
            .with_context(|| format!("cannot create logs directory {}", config.logs_path))?;

        let file_level = config.file_log_level.unwrap_or(config.log_level);
        let file = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] [{}] [{}] {}",
                    chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(file_level.into());

        let file = if config.disable_file_log_date_based {
            let path = Path::new(&config.logs_path).join(&config.filename_log);
            file.chain(fern::log_file(&path).with_context(|| format!("cannot open log file {}", path.display()))?)
        } else {
            file.chain(fern::DateBased::new(
                date_based_prefix(&config.logs_path),
                format!("%Y-%m-%d.{}", config.filename_log),
            ))
        };

        base = base.chain(apply_module_levels(file, &config.logs_modules));
    }

    base.apply().context("logger already initialized")?;
    log_panics::init();

    Ok(())
}
