//! trivia CLI — play rounds in the terminal and inspect stored state.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "trivia", version, about = "Multiple-choice trivia game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play rounds interactively
    Play {
        /// Player name to submit under when none is remembered
        #[arg(long)]
        name: Option<String>,

        /// Keep the session and scores in memory only
        #[arg(long)]
        ephemeral: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the score ledger
    Scores {
        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the remembered player
    Whoami {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Forget the remembered player
    NewPlayer {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Load a round and write the game page as HTML
    Page {
        /// Output file
        #[arg(long, default_value = "trivia.html")]
        output: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                "trivia=info"
                    .parse()
                    .unwrap_or_else(|_| tracing_subscriber::filter::LevelFilter::INFO.into()),
            ),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            name,
            ephemeral,
            config,
        } => commands::play::execute(name, ephemeral, config).await,
        Commands::Scores { format, config } => commands::scores::execute(format, config),
        Commands::Whoami { config } => commands::whoami::execute(config),
        Commands::NewPlayer { config } => commands::new_player::execute(config),
        Commands::Page { output, config } => commands::page::execute(output, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
