use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use transfill_cli::{check, config_cmd};

#[derive(Parser, Debug)]
#[command(name = "transfill", author, version, about = "i18n translation autocomplete tool", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Check for missing translations.
    Check {
        /// Automatically complete missing translations
        #[arg(long)]
        fix: bool,

        /// Print the report as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Update configuration settings interactively.
    Config,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let result = match args.commands {
        Commands::Check { fix, json } => check::run_check_command(fix, json).await,
        Commands::Config => config_cmd::run_config_command(),
    };

    if let Err(e) = result {
        eprintln!("{}", style(format!("\n❌ Error: {e}\n")).red());
        std::process::exit(1);
    }
}
