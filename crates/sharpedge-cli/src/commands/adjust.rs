//! Adjust command implementation.

use crate::cli::{AdjustArgs, AdjustTarget};
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::output::Formatter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sharpedge_adjusters::{AdjusterRegistry, GameContext, PlayerContext};
use std::fs;
use std::path::Path;

/// Execute the adjust command.
pub fn execute_adjust(
    args: AdjustArgs,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let registry = config.registry()?;

    let output = match args.target {
        AdjustTarget::Game(input) => {
            let adjusted = adjust_game(&registry, &input.input)?;
            formatter.json(&adjusted)?
        }
        AdjustTarget::Player(input) => {
            let adjusted = adjust_player(&registry, &input.input, input.seed)?;
            formatter.json(&adjusted)?
        }
    };

    println!("{}", output);
    Ok(())
}

/// Run the game chain on a JSON context file.
pub fn adjust_game(registry: &AdjusterRegistry, path: &Path) -> Result<GameContext> {
    let ctx: GameContext = serde_json::from_str(&fs::read_to_string(path)?)?;
    Ok(registry.apply_game(&ctx))
}

/// Run the player chain on a JSON context file.
///
/// Without a seed the variance draws come from OS entropy.
pub fn adjust_player(
    registry: &AdjusterRegistry,
    path: &Path,
    seed: Option<u64>,
) -> Result<PlayerContext> {
    let ctx: PlayerContext = serde_json::from_str(&fs::read_to_string(path)?)?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::debug!(seed = ?seed, "Running player adjusters");
    Ok(registry.apply_player(&ctx, &mut rng))
}
