//! The `edutrack validate` command.

use std::path::PathBuf;

use anyhow::Result;

use edutrack_core::config::load_config_from;
use edutrack_core::session;

pub fn execute(session_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    crate::init_tracing(&config.log_level);

    let session = session::parse_session(&session_path)?;
    println!(
        "Session: {} ({} topics, {} students)",
        session.class_name,
        session.topics.len(),
        session.students.len()
    );

    let warnings = session::validate_session(&session, &config);
    for w in &warnings {
        let prefix = w
            .student
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Session valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
