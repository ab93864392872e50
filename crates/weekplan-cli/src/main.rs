use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "weekplan", version, about = "Weekly study planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study slot management
    Slot {
        #[command(subcommand)]
        action: commands::slot::SlotAction,
    },
    /// Week navigation and display
    Week {
        #[command(subcommand)]
        action: commands::week::WeekAction,
    },
    /// Pinned one-shot reminders
    Pin {
        #[command(subcommand)]
        action: commands::pin::PinAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Export the viewed week as CSV
    Export {
        /// Output file; stdout when omitted
        #[arg(long)]
        out: Option<std::path::PathBuf>,
    },
    /// Run the reminder loop in the foreground until Ctrl-C
    Watch,
    /// Generate shell completions
    Completions { shell: clap_complete::Shell },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Slot { action } => commands::slot::run(action),
        Commands::Week { action } => commands::week::run(action),
        Commands::Pin { action } => commands::pin::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Export { out } => commands::export::run(out),
        Commands::Watch => commands::watch::run(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "weekplan", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
