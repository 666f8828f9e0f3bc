//! edutrack CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "edutrack", version, about = "Track per-student topic mastery")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a command script and print the class and student performance
    Run {
        /// Class session TOML to start from
        #[arg(long)]
        session: Option<PathBuf>,

        /// Command script, one command per line
        #[arg(long)]
        script: Option<PathBuf>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Also write the JSON report to this path
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Interactive shell reading commands from stdin
    Shell {
        /// Class session TOML to start from
        #[arg(long)]
        session: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate a class session file
    Validate {
        /// Path to the session TOML
        #[arg(long)]
        session: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config, session, and script
    Init,
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub(crate) fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("edutrack={level}")))
        .unwrap_or_else(|_| EnvFilter::new("edutrack=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            session,
            script,
            format,
            output,
            config,
        } => commands::run::execute(session, script, format, output, config),
        Commands::Shell { session, config } => commands::shell::execute(session, config),
        Commands::Validate { session, config } => commands::validate::execute(session, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
