use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "bday", version, about = "Bday birthday reminder CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Birthday record management
    Record {
        #[command(subcommand)]
        action: commands::record::RecordAction,
    },
    /// Classified birthday views
    View {
        #[command(subcommand)]
        action: commands::view::ViewAction,
    },
    /// Reminder planning and dispatch
    Notify {
        #[command(subcommand)]
        action: commands::notify::NotifyAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Live upcoming view, reprinted as records change
    Watch {
        /// Owner id (defaults to configured default_owner)
        #[arg(long)]
        owner: Option<String>,
        /// Window in days (defaults to configured window_days)
        #[arg(long)]
        window: Option<i64>,
        /// Store refresh interval in seconds
        #[arg(long, default_value = "2")]
        interval: u64,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Record { action } => commands::record::run(action),
        Commands::View { action } => commands::view::run(action),
        Commands::Notify { action } => commands::notify::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Watch {
            owner,
            window,
            interval,
        } => commands::watch::run(owner, window, interval),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
