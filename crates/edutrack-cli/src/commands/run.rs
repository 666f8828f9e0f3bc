//! The `edutrack run` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use edutrack_core::command::parse_script;
use edutrack_core::config::load_config_from;
use edutrack_core::report::SessionReport;

use crate::commands::{load_engine, run_cycle};
use crate::render;

pub fn execute(
    session_path: Option<PathBuf>,
    script_path: Option<PathBuf>,
    format: String,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json" | "markdown" | "md"),
        "unknown format: {format} (expected text, json, or markdown)"
    );

    let config = load_config_from(config_path.as_deref())?;
    crate::init_tracing(&config.log_level);

    let (mut engine, class_name) = load_engine(session_path.as_deref(), &config)?;

    if let Some(path) = &script_path {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script: {}", path.display()))?;
        let commands = parse_script(&text)
            .map_err(|(line, e)| anyhow::anyhow!("{}:{line}: {e}", path.display()))?;
        tracing::debug!(commands = commands.len(), "running script");

        // Outcomes go to stderr so stdout carries only the report.
        for (line, command) in &commands {
            let outcomes = run_cycle(&mut engine, command)
                .with_context(|| format!("{}:{line}", path.display()))?;
            for outcome in &outcomes {
                eprintln!("{}", render::outcome(outcome, engine.deletion_state()));
            }
        }
    }

    let report = SessionReport::from_engine(&engine, class_name);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" | "md" => println!("{}", report.to_markdown()),
        _ => render::print_report(&report),
    }

    if let Some(path) = &output {
        report.save_json(path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}
