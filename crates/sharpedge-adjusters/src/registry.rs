//! Adjuster registry
//!
//! Holds one validated config per adjuster and applies them to game or
//! player contexts in a fixed order.

use crate::adjuster::{Adjuster, AdjusterSchema};
use crate::foul_risk::FOUL_RISK;
use crate::hv_guardrail::HV_GUARDRAIL;
use crate::ot_inflation::OT_INFLATION;
use crate::pace_spike::PACE_SPIKE;
use crate::rebound::REBOUND_CHANCE;
use crate::roleplayer::ROLEPLAYER_VARIANCE;
use crate::transition::{TOTALS_TRANSITION, TRANSITION_PACE};
use crate::{
    AdjusterError, FoulRiskConfig, GameContext, HvGuardrailConfig, OtInflationConfig,
    PaceSpikeConfig, PlayerContext, ReboundChanceConfig, RoleplayerVarianceConfig,
    TotalsTransitionConfig, TransitionPaceConfig,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Order in which game-level adjusters run
pub const GAME_ORDER: [&str; 5] = [
    PACE_SPIKE,
    TRANSITION_PACE,
    OT_INFLATION,
    TOTALS_TRANSITION,
    HV_GUARDRAIL,
];

/// Order in which player-level adjusters run
pub const PLAYER_ORDER: [&str; 3] = [FOUL_RISK, REBOUND_CHANCE, ROLEPLAYER_VARIANCE];

/// Any adjuster's configuration, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdjusterConfig {
    /// Pace-spike dampener
    PaceSpike(PaceSpikeConfig),
    /// Transition pace multiplier
    TransitionPace(TransitionPaceConfig),
    /// Overtime inflation
    OtInflation(OtInflationConfig),
    /// Transition totals patch
    TotalsTransition(TotalsTransitionConfig),
    /// High-volatility totals guardrail
    HvGuardrail(HvGuardrailConfig),
    /// Foul-risk gate
    FoulRisk(FoulRiskConfig),
    /// Dynamic rebound chance
    ReboundChance(ReboundChanceConfig),
    /// Role-player variance spikes
    RoleplayerVariance(RoleplayerVarianceConfig),
}

impl AdjusterConfig {
    fn schema(&self) -> &dyn AdjusterSchema {
        match self {
            Self::PaceSpike(c) => c,
            Self::TransitionPace(c) => c,
            Self::OtInflation(c) => c,
            Self::TotalsTransition(c) => c,
            Self::HvGuardrail(c) => c,
            Self::FoulRisk(c) => c,
            Self::ReboundChance(c) => c,
            Self::RoleplayerVariance(c) => c,
        }
    }

    fn apply_game(&self, ctx: &GameContext) -> GameContext {
        match self {
            Self::PaceSpike(c) => c.adjust(ctx),
            Self::TransitionPace(c) => c.adjust(ctx),
            Self::OtInflation(c) => c.adjust(ctx),
            Self::TotalsTransition(c) => c.adjust(ctx),
            Self::HvGuardrail(c) => c.adjust(ctx),
            _ => ctx.clone(),
        }
    }

    fn apply_player<R: Rng + ?Sized>(&self, ctx: &PlayerContext, rng: &mut R) -> PlayerContext {
        match self {
            Self::FoulRisk(c) => c.adjust(ctx),
            Self::ReboundChance(c) => c.adjust(ctx),
            Self::RoleplayerVariance(c) => c.adjust_with(ctx, rng),
            _ => ctx.clone(),
        }
    }
}

impl AdjusterSchema for AdjusterConfig {
    fn name(&self) -> &'static str {
        self.schema().name()
    }

    fn is_enabled(&self) -> bool {
        self.schema().is_enabled()
    }

    fn validate(&self) -> Result<(), AdjusterError> {
        self.schema().validate()
    }
}

/// Per-adjuster overrides, loadable from TOML
///
/// Every section is optional and falls back to the baseline constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjusterSettings {
    /// Pace-spike dampener
    pub pace_spike: PaceSpikeConfig,
    /// Transition pace multiplier
    pub transition_pace: TransitionPaceConfig,
    /// Overtime inflation
    pub ot_inflation: OtInflationConfig,
    /// Transition totals patch
    pub totals_transition: TotalsTransitionConfig,
    /// High-volatility totals guardrail
    pub hv_guardrail: HvGuardrailConfig,
    /// Foul-risk gate
    pub foul_risk: FoulRiskConfig,
    /// Dynamic rebound chance
    pub rebound_chance: ReboundChanceConfig,
    /// Role-player variance spikes
    pub roleplayer_variance: RoleplayerVarianceConfig,
}

impl AdjusterSettings {
    /// Every configured adjuster, game adjusters first
    pub fn into_configs(self) -> Vec<AdjusterConfig> {
        vec![
            AdjusterConfig::PaceSpike(self.pace_spike),
            AdjusterConfig::TransitionPace(self.transition_pace),
            AdjusterConfig::OtInflation(self.ot_inflation),
            AdjusterConfig::TotalsTransition(self.totals_transition),
            AdjusterConfig::HvGuardrail(self.hv_guardrail),
            AdjusterConfig::FoulRisk(self.foul_risk),
            AdjusterConfig::ReboundChance(self.rebound_chance),
            AdjusterConfig::RoleplayerVariance(self.roleplayer_variance),
        ]
    }
}

/// Validated set of adjusters
#[derive(Debug, Clone, Default)]
pub struct AdjusterRegistry {
    adjusters: Vec<AdjusterConfig>,
}

impl AdjusterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every adjuster at its baseline constants
    pub fn with_defaults() -> Self {
        // Baseline constants are always valid
        Self {
            adjusters: AdjusterSettings::default().into_configs(),
        }
    }

    /// Build a registry from settings, validating each adjuster
    pub fn from_settings(settings: AdjusterSettings) -> Result<Self, AdjusterError> {
        let mut registry = Self::new();
        for config in settings.into_configs() {
            registry.register(config)?;
        }
        Ok(registry)
    }

    /// Register an adjuster
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation or an adjuster of the
    /// same kind is already registered.
    pub fn register(&mut self, config: AdjusterConfig) -> Result<(), AdjusterError> {
        config.validate()?;
        let name = config.name();
        if self.get(name).is_some() {
            return Err(AdjusterError::Duplicate(name));
        }
        tracing::debug!(adjuster = name, enabled = config.is_enabled(), "Registered adjuster");
        self.adjusters.push(config);
        Ok(())
    }

    /// Look up an adjuster by name
    pub fn get(&self, name: &str) -> Option<&AdjusterConfig> {
        self.adjusters.iter().find(|a| a.name() == name)
    }

    /// Names of registered adjusters in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.adjusters.iter().map(|a| a.name()).collect()
    }

    /// Number of registered adjusters
    pub fn len(&self) -> usize {
        self.adjusters.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.adjusters.is_empty()
    }

    /// Run the game adjusters in canonical order
    pub fn apply_game(&self, ctx: &GameContext) -> GameContext {
        GAME_ORDER
            .iter()
            .filter_map(|name| self.get(name))
            .fold(ctx.clone(), |acc, adjuster| adjuster.apply_game(&acc))
    }

    /// Run the player adjusters in canonical order
    ///
    /// Foul-risk runs before rebound chance so the foul gate feeds the
    /// rebound damp.
    pub fn apply_player<R: Rng + ?Sized>(&self, ctx: &PlayerContext, rng: &mut R) -> PlayerContext {
        let mut out = ctx.clone();
        for adjuster in PLAYER_ORDER.iter().filter_map(|name| self.get(name)) {
            out = adjuster.apply_player(&out, rng);
        }
        out
    }
}
