mod list;
mod run;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::debug;

use chainrun::config_file::{Config, ConfigError};
use chainrun::load_config;

#[derive(Parser, Debug)]
#[command(name = "chainrun", about = "Run commands with their chained members")]
struct Cli {
    /// Path to config file (auto-detected if not specified)
    #[arg(short, long)]
    config: Option<String>,

    /// Log file path (logs go to stderr when RUST_LOG is set otherwise)
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a command, followed by the members of its chain
    Run(run::RunArgs),
    /// List available commands and their chains
    List,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    chainrun::logger::init(log_file)?;

    let (config, cwd) = match load_config(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        // Without a config file only the builtin commands are available
        Err(ConfigError::ConfigNotFound(path)) if cli.config.is_none() => {
            debug!("No config file found from {}", path.display());
            let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
            (Config::default(), cwd)
        }
        Err(e) => return Err(e.into()),
    };
    let (app, registry) = chainrun::bootstrap(&config, &cwd)?;

    match cli.command {
        Some(Commands::Run(ref args)) => Ok(run::run(args, &app)),
        Some(Commands::List) | None => Ok(list::run(&app, &registry)),
    }
}
