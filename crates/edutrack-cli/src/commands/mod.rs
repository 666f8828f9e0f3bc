//! Subcommand implementations and the shared command cycle.

use std::path::Path;

use anyhow::Result;

use edutrack_core::command::{Command, Outcome};
use edutrack_core::config::EdutrackConfig;
use edutrack_core::engine::Engine;
use edutrack_core::error::EngineError;
use edutrack_core::session;

pub mod init;
pub mod run;
pub mod shell;
pub mod validate;

const DEFAULT_CLASS_NAME: &str = "Edutrack";

/// Build the starting engine and class name, from a session file if given.
pub fn load_engine(
    session_path: Option<&Path>,
    config: &EdutrackConfig,
) -> Result<(Engine, String)> {
    match session_path {
        Some(path) => {
            let session = session::parse_session(path)?;
            let engine = session.build_engine(config)?;
            Ok((engine, session.class_name))
        }
        None => Ok((Engine::from_config(config)?, DEFAULT_CLASS_NAME.to_string())),
    }
}

/// Run one command, then apply any authorized deletion, the way each
/// interaction cycle ends. Returns the outcomes in order.
pub fn run_cycle(engine: &mut Engine, command: &Command) -> Result<Vec<Outcome>, EngineError> {
    let mut outcomes = vec![engine.execute(command)?];
    if let Some(removal) = engine.apply_pending_deletion()? {
        outcomes.push(Outcome::TopicRemoved(removal));
    }
    Ok(outcomes)
}
