use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "microadventure-cli", version, about = "Micro-Adventure CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick a new adventure
    Generate,
    /// Mark the current adventure as accomplished
    Complete {
        /// Completion time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Print the completion report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print streak and last adventure
    Status {
        #[arg(long)]
        json: bool,
    },
    /// List completed adventures, newest first
    History {
        /// Number of entries to show (defaults to history.show)
        #[arg(long)]
        limit: Option<usize>,
        #[arg(long)]
        json: bool,
    },
    /// Print share text for the current adventure
    Share {
        /// Link to append (defaults to share.url)
        #[arg(long)]
        url: Option<String>,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Generate => commands::adventure::generate(),
        Commands::Complete { at, json } => commands::adventure::complete(at.as_deref(), json),
        Commands::Share { url } => commands::adventure::share(url),
        Commands::Status { json } => commands::status::status(json),
        Commands::History { limit, json } => commands::status::history(limit, json),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
