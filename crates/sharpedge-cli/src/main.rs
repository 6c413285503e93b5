//! SharpEdge CLI - Command-line interface for the signal adjustment and decision gate.

use anyhow::Context;
use clap::Parser;
use sharpedge_cli::commands;
use sharpedge_cli::{Cli, Command, Formatter, PipelineConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PipelineConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load config from {}", path.display()),
        None => "Failed to build default config".to_string(),
    })?;

    let format = cli.format.map(Into::into).unwrap_or(config.output.format);
    let color_enabled = !cli.no_color && config.output.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Evaluate(args) => {
            let input = args.input.clone();
            commands::execute_evaluate(args, &config, &formatter)
                .with_context(|| format!("Failed to evaluate {}", input.display()))?;
        }
        Command::CheckConfig => {
            commands::execute_check_config(&config, &formatter)?;
        }
        Command::Adjust(args) => {
            commands::execute_adjust(args, &config, &formatter)?;
        }
    }

    Ok(())
}
