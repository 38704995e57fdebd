use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "timechallenge", version, about = "Time Challenge CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the configured challenges
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Play a challenge interactively
    Play {
        /// Challenge title or 1-based position
        challenge: String,
    },
    /// Run a challenge against a simulated clock and print its events
    Simulate(commands::simulate::SimulateArgs),
    /// Player name
    Player {
        #[command(subcommand)]
        action: commands::player::PlayerAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("TIMECHALLENGE_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::List { json } => commands::challenge::list(json),
        Commands::Play { challenge } => commands::play::run(&challenge),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Player { action } => commands::player::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "timechallenge",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
