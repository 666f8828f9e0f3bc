//! The `edutrack shell` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Result;

use edutrack_core::command::parse_line;
use edutrack_core::config::load_config_from;

use crate::commands::{load_engine, run_cycle};
use crate::render;

const HELP: &str = "\
Commands (topics are numbered from 1):
  add-topic                 add a topic
  edit <n>                  enter or leave edit mode
  draft-name <n> <text>     set the rename buffer
  commit <n>                rename from the buffer
  rename <n> <name>         rename directly
  rate <n> <-|~|+>          stage a rating for the next student
  delete <n>                ask to delete a topic
  cancel | confirm <n>      answer the delete request
  submit <name>             add a student with the staged ratings
  reset                     remove all students
  topics | students | class | student <name>
  help | quit";

pub fn execute(session_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    crate::init_tracing(&config.log_level);

    let (mut engine, class_name) = load_engine(session_path.as_deref(), &config)?;
    eprintln!("{class_name}: type `help` for commands");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match line.trim() {
            "quit" | "exit" => break,
            "help" => {
                writeln!(stdout, "{HELP}")?;
                continue;
            }
            _ => {}
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("Error: {e}");
                continue;
            }
        };

        match run_cycle(&mut engine, &command) {
            Ok(outcomes) => {
                for outcome in &outcomes {
                    writeln!(stdout, "{}", render::outcome(outcome, engine.deletion_state()))?;
                }
            }
            Err(e) => eprintln!("Error: {e}"),
        }
        stdout.flush()?;
    }

    Ok(())
}
