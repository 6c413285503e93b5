//! Gatekeeper configuration

use crate::{GatekeeperError, TagPenaltyTable};
use serde::{Deserialize, Serialize};

/// Live-flow requirements for starter-big OVERs with active risk tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveFlowThresholds {
    /// Minimum post-penalty win probability
    pub min_win_probability: f64,

    /// Minimum post-penalty edge
    pub min_edge: f64,

    /// Added to the win probability requirement when a minutes-cap tag is on
    pub minutes_cap_extra_win_probability: f64,
}

impl Default for LiveFlowThresholds {
    fn default() -> Self {
        Self {
            min_win_probability: 0.62,
            min_edge: 0.01,
            minutes_cap_extra_win_probability: 0.03,
        }
    }
}

/// Configuration for the decision gate
///
/// # Examples
///
/// ```
/// use sharpedge_gatekeeper::GateConfig;
///
/// let config = GateConfig::default();
/// assert_eq!(config.liveflow.min_win_probability, 0.62);
///
/// let config = GateConfig::strict();
/// assert!(config.liveflow.min_edge > 0.01);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Live-flow execution thresholds
    pub liveflow: LiveFlowThresholds,

    /// Tag penalty table
    pub penalties: TagPenaltyTable,
}

impl GateConfig {
    /// Create a strict configuration (higher live-flow bar)
    pub fn strict() -> Self {
        Self {
            liveflow: LiveFlowThresholds {
                min_win_probability: 0.65,
                min_edge: 0.02,
                minutes_cap_extra_win_probability: 0.05,
            },
            penalties: TagPenaltyTable::default(),
        }
    }

    /// Create a permissive configuration (tag penalties still apply)
    pub fn permissive() -> Self {
        Self {
            liveflow: LiveFlowThresholds {
                min_win_probability: 0.60,
                min_edge: 0.0,
                minutes_cap_extra_win_probability: 0.0,
            },
            penalties: TagPenaltyTable::default(),
        }
    }

    /// Parse and validate a TOML document
    ///
    /// Missing sections fall back to the defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, GatekeeperError> {
        let config: GateConfig = toml::from_str(s)?;
        config.validate()?;
        tracing::info!(
            table_version = config.penalties.version(),
            rules = config.penalties.len(),
            "Loaded gate configuration"
        );
        Ok(config)
    }

    /// Check thresholds and penalty deltas
    pub fn validate(&self) -> Result<(), GatekeeperError> {
        let lf = &self.liveflow;
        require_probability("liveflow.min_win_probability", lf.min_win_probability)?;
        require_probability(
            "liveflow.minutes_cap_extra_win_probability",
            lf.minutes_cap_extra_win_probability,
        )?;
        if !lf.min_edge.is_finite() {
            return Err(GatekeeperError::InvalidThreshold {
                field: "liveflow.min_edge".to_string(),
                reason: format!("{} is not a finite number", lf.min_edge),
            });
        }
        self.penalties.validate()
    }
}

fn require_probability(field: &str, value: f64) -> Result<(), GatekeeperError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GatekeeperError::InvalidThreshold {
            field: field.to_string(),
            reason: format!("{} is outside [0.0, 1.0]", value),
        })
    }
}
