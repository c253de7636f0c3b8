mod config;
mod logger;
mod scenario;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info};
use std::fs;

use config::Config;
use dpass_common::config::VERSION;
use scenario::Scenario;

fn main() -> Result<()> {
    let config = Config::parse();
    logger::setup_logger(&config.log)?;

    info!("Dpass Console v{}", VERSION);
    info!("Loading scenario from {}", config.scenario.display());

    let scenario = Scenario::load(&config.scenario)?;
    let report = scenario::run(&scenario)?;
    let json = serde_json::to_string_pretty(&report).context("cannot serialize report")?;

    match &config.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("cannot write report to {}", path.display()))?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }

    if !report.passed {
        error!(
            "{} of {} step(s) did not match their expectation",
            report.failures(),
            report.steps.len()
        );
        bail!("scenario failed");
    }

    info!(
        "Scenario passed: {} step(s), {} event(s)",
        report.steps.len(),
        report.events.len()
    );

    Ok(())
}
