use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use quickentry::cli::args::{Cli, Commands, ConfigArgs, ConfigCommands};
use quickentry::cli::commands;
use quickentry::config::{Config, Paths};
use quickentry::error::QuickEntryError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), QuickEntryError> {
    let config_path = cli.config.unwrap_or_else(|| Paths::default().config_file);
    // `config init --force` must be able to replace an unreadable file.
    let config = match &cli.command {
        Commands::Config(ConfigArgs {
            command: ConfigCommands::Init { .. },
        }) => Config::default(),
        _ => Config::load_from_path(&config_path)?,
    };
    config.general.color.apply();
    let format = cli.output.unwrap_or(config.general.default_output);

    let output = match &cli.command {
        Commands::Parse(args) => commands::parse(&config, args, format)?,
        Commands::Suggest { text } => commands::suggest(&config, text, format)?,
        Commands::Pipe(args) => commands::pipe(&config, args, format)?,
        Commands::Time { expr, at } => commands::time(expr, at.as_deref(), format)?,
        Commands::Config(args) => commands::config(&config, &config_path, &args.command, format)?,
        Commands::Completions { shell, install } => commands::completions(shell, *install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
