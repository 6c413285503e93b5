//! CLI command definitions and argument parsing.

use clap::{Args, Parser, Subcommand};
use sharpedge_domain::EvalMode;
use std::path::PathBuf;

/// SharpEdge - Adjust projections and gate prop decisions.
#[derive(Debug, Parser)]
#[command(name = "sharpedge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Pipeline configuration file (TOML)
    #[arg(short, long, global = true, env = "SHARPEDGE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (one line per decision)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Evaluate propositions from a JSON-lines file
    Evaluate(EvaluateArgs),

    /// Load and validate the pipeline configuration
    CheckConfig,

    /// Run the adjuster chain on a context
    Adjust(AdjustArgs),
}

/// Arguments for the evaluate command.
#[derive(Debug, Args)]
pub struct EvaluateArgs {
    /// Propositions, one JSON object per line
    #[arg(short, long)]
    pub input: PathBuf,

    /// Evaluation mode
    #[arg(short, long, value_enum, default_value = "pregame")]
    pub mode: ModeArg,

    /// Append decision logs to this JSON-lines file
    #[arg(long)]
    pub log: Option<PathBuf>,
}

/// Evaluation mode argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ModeArg {
    /// Pre-game slate
    Pregame,
    /// In-game live flow
    Liveflow,
}

impl From<ModeArg> for EvalMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Pregame => EvalMode::Pregame,
            ModeArg::Liveflow => EvalMode::Liveflow,
        }
    }
}

/// Arguments for the adjust command.
#[derive(Debug, Args)]
pub struct AdjustArgs {
    #[command(subcommand)]
    pub target: AdjustTarget,
}

/// Which context to adjust.
#[derive(Debug, Subcommand)]
pub enum AdjustTarget {
    /// Game context (pace, overtime, totals)
    Game(AdjustInput),
    /// Player context (fouls, rebounds, role-player variance)
    Player(AdjustInput),
}

/// Input for an adjust run.
#[derive(Debug, Args)]
pub struct AdjustInput {
    /// Context as a JSON object
    #[arg(short, long)]
    pub input: PathBuf,

    /// Seed for role-player variance draws
    #[arg(long)]
    pub seed: Option<u64>,
}
