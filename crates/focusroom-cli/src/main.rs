use clap::{Parser, Subcommand};
use focusroom_core::Config;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusroom", version, about = "Focusroom CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a focus session
    Start,
    /// Start a break (long if the last focus session earned one)
    Break,
    /// Pause or resume the active session
    Pause,
    /// End the active session and record it
    End,
    /// Note a distraction on the active session
    Distract {
        /// Free text, up to 140 characters are kept
        text: Vec<String>,
    },
    /// Print the current session view as JSON
    Status,
    /// Refresh the session view on an interval
    Watch {
        /// Stop after this many refreshes
        #[arg(long)]
        ticks: Option<u64>,
    },
    /// List recorded sessions, newest first
    History {
        #[command(flatten)]
        filter: commands::history::HistoryFilter,
    },
    /// Remove every recorded session
    ClearHistory,
    /// Today's and all-time focus statistics
    Stats,
    /// Session duration settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_tracing(&config);
    if let Some(e) = config_error {
        warn!(error = %e, "config unreadable; using defaults");
    }

    let result = match cli.command {
        Commands::Start => commands::session::start(),
        Commands::Break => commands::session::start_break(),
        Commands::Pause => commands::session::toggle_pause(),
        Commands::End => commands::session::end(),
        Commands::Distract { text } => commands::session::distract(&text.join(" ")),
        Commands::Status => commands::session::status(),
        Commands::Watch { ticks } => commands::session::watch(&config, ticks),
        Commands::History { filter } => commands::history::list(&config, filter),
        Commands::ClearHistory => commands::history::clear(),
        Commands::Stats => commands::stats::run(),
        Commands::Settings { action } => commands::settings::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
