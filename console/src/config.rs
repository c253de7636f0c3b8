use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

use dpass_common::config::VERSION;

// Functions Helpers
fn default_log_filename() -> String {
    String::from("dpass-console.log")
}

fn default_logs_path() -> String {
    String::from("logs/")
}

pub fn default_logs_datetime_format() -> String {
    String::from("%H:%M:%S%.3f")
}

/// Log level accepted on the command line and in config files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <LogLevel as ValueEnum>::from_str(s, true)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };
        write!(f, "{}", name)
    }
}

/// Per module log level override, written as `module=level`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub module: String,
    pub level: LogLevel,
}

impl FromStr for ModuleConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (module, level) = s
            .split_once('=')
            .ok_or_else(|| format!("expected <module>=<level>, got '{}'", s))?;
        if module.is_empty() {
            return Err("module name cannot be empty".to_owned());
        }

        Ok(Self {
            module: module.to_owned(),
            level: level.parse()?,
        })
    }
}

#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct LogConfig {
    /// Set log level
    #[clap(long, value_enum, default_value_t)]
    #[serde(default)]
    pub log_level: LogLevel,
    /// Set file log level
    /// By default, it will be the same as log level
    #[clap(long, value_enum)]
    pub file_log_level: Option<LogLevel>,
    /// Disable the log file
    #[clap(long)]
    #[serde(default)]
    pub disable_file_logging: bool,
    /// Disable the log filename date based
    /// If disabled, the log file will be named dpass-console.log instead of YYYY-MM-DD.dpass-console.log
    #[clap(long)]
    #[serde(default)]
    pub disable_file_log_date_based: bool,
    /// Disable the usage of colors in log
    #[clap(long)]
    #[serde(default)]
    pub disable_log_color: bool,
    /// Log filename
    ///
    /// File will be stored in logs directory, this is only the filename, not the full path.
    #[clap(long, default_value_t = default_log_filename())]
    #[serde(default = "default_log_filename")]
    pub filename_log: String,
    /// Logs directory
    ///
    /// By default it will be logs/ of the current directory.
    #[clap(long, default_value_t = default_logs_path())]
    #[serde(default = "default_logs_path")]
    pub logs_path: String,
    /// Module configuration for logs, e.g. `dpass_common=trace`
    #[clap(long)]
    #[serde(default)]
    pub logs_modules: Vec<ModuleConfig>,
    /// Change the datetime format used by the logger
    #[clap(long, default_value_t = default_logs_datetime_format())]
    #[serde(default = "default_logs_datetime_format")]
    pub datetime_format: String,
}

#[derive(Debug, Parser, Serialize, Deserialize, Clone)]
#[clap(
    version = VERSION,
    about = "Dpass Console - replay a scenario of calls against a Dpass or DpassNFT controller",
    long_about = r#"Dpass Console - replay a scenario of calls against a Dpass or DpassNFT controller

A scenario is a JSON file deploying one controller and listing the calls to
apply in order. Each call may declare the outcome it expects ("ok" or an error
identifier such as "EnforcedPause"). The console prints a JSON report and
exits with an error if any expectation was not met.

Example scenario:
{
  "name": "re-pause",
  "asset": { "kind": "fungible", "initial_supply": 10 },
  "owner": "alice",
  "steps": [
    { "caller": "alice", "call": { "op": "pause" } },
    { "caller": "alice", "call": { "op": "pause" }, "expect": "EnforcedPause" },
    { "caller": "bob", "call": { "op": "unpause" },
      "expect": { "error": "OwnableUnauthorizedAccount", "account": "bob" } }
  ]
}

Principals are either 64 hex characters or a name, derived deterministically.
Amounts are JSON numbers, or decimal strings for values above 2^64 - 1.
Unknown keys are rejected.
"#
)]
pub struct Config {
    /// Scenario file to replay
    #[clap(long, short)]
    pub scenario: PathBuf,
    /// Write the JSON report to this file instead of stdout
    #[clap(long, short)]
    pub output: Option<PathBuf>,
    /// Log configuration
    #[clap(flatten)]
    pub log: LogConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_config_parsing() {
        let config: ModuleConfig = "dpass_common=trace".parse().unwrap();
        assert_eq!(config.module, "dpass_common");
        assert_eq!(config.level, LogLevel::Trace);

        assert!("dpass_common".parse::<ModuleConfig>().is_err());
        assert!("=debug".parse::<ModuleConfig>().is_err());
        assert!("dpass_common=loud".parse::<ModuleConfig>().is_err());
    }

    #[test]
    fn test_cli_parsing() {
        let config = Config::try_parse_from([
            "dpass_console",
            "--scenario",
            "scenarios/dpass.json",
            "--log-level",
            "debug",
            "--disable-file-logging",
            "--logs-modules",
            "dpass_common=trace",
        ])
        .unwrap();

        assert_eq!(config.scenario, PathBuf::from("scenarios/dpass.json"));
        assert!(config.output.is_none());
        assert_eq!(config.log.log_level, LogLevel::Debug);
        assert!(config.log.disable_file_logging);
        assert_eq!(config.log.logs_modules.len(), 1);
        assert_eq!(config.log.filename_log, "dpass-console.log");
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(log::LevelFilter::from(LogLevel::Off), log::LevelFilter::Off);
        assert_eq!(log::LevelFilter::from(LogLevel::default()), log::LevelFilter::Info);
    }
}
