use clap::Parser;
use colored::Colorize;

use scaffold_verify_cli::cli::{Cli, Commands};
use scaffold_verify_cli::commands;
use scaffold_verify_cli::error::CliError;
use scaffold_verify_cli::logging::init_tracing;
use scaffold_verify_cli::output::OutputWriter;

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            e.exit_code()
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> Result<(), CliError> {
    let writer = OutputWriter::new(cli.output);

    // `config validate` reports load errors itself, so logging falls back
    // to defaults when the file cannot be loaded.
    let loaded = commands::load_config(&cli.config);
    let mut general = loaded
        .as_ref()
        .map(|c| c.general.clone())
        .unwrap_or_default();
    if let Some(level) = &cli.log_level {
        general.log_level = level.clone();
    }
    if let Err(e) = init_tracing(&general) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }

    tracing::debug!(config = %cli.config.display(), "scaffold-verify starting");

    match cli.command {
        Commands::Verify(args) => commands::verify::execute(args, loaded?, &writer),
        Commands::Render(args) => commands::render::execute(args, loaded?, &writer),
        Commands::Config(args) => commands::config::execute(args, &cli.config, &writer),
    }
}
