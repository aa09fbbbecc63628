use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod notifier;

#[derive(Parser)]
#[command(name = "liftlog", version, about = "Rest timer and set logging for workouts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rest timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Save or add sets
    Set {
        #[command(subcommand)]
        action: commands::set::SetAction,
    },
    /// Save exercise notes
    Notes {
        #[command(subcommand)]
        action: commands::notes::NotesAction,
    },
    /// Keyboard, swipe and display shortcuts
    Nav {
        #[command(subcommand)]
        action: commands::nav::NavAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LIFTLOG_LOG")
                .unwrap_or_else(|_| EnvFilter::new("liftlog_core=info,liftlog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Set { action } => commands::set::run(action),
        Commands::Notes { action } => commands::notes::run(action),
        Commands::Nav { action } => commands::nav::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "liftlog", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
