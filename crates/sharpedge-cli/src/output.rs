//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use serde::Serialize;
use sharpedge_adjusters::AdjusterRegistry;
use sharpedge_adjusters::AdjusterSchema;
use sharpedge_domain::{Decision, DecisionLog, Proposition};
use sharpedge_gatekeeper::{BatchSummary, GateConfig};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format evaluated propositions.
    pub fn format_decisions(&self, results: &[(Proposition, Decision)]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_decisions_json(results),
            OutputFormat::Table => Ok(self.format_decisions_table(results)),
            OutputFormat::Quiet => Ok(self.format_decisions_quiet(results)),
        }
    }

    fn format_decisions_json(&self, results: &[(Proposition, Decision)]) -> Result<String> {
        let logs: Vec<DecisionLog> = results
            .iter()
            .map(|(prop, decision)| DecisionLog::new(prop, decision))
            .collect();
        Ok(serde_json::to_string_pretty(&logs)?)
    }

    fn format_decisions_table(&self, results: &[(Proposition, Decision)]) -> String {
        if results.is_empty() {
            return self.colorize("No propositions found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["Player", "Market", "Line", "Win Prob", "Tier", "Result", "Reasons"]);

        for (prop, decision) in results {
            let line = format!("{} {}", prop.side, prop.line);
            let win_prob = format!(
                "{:.3} → {:.3}",
                prop.win_probability, decision.adj_win_probability
            );
            let tier = if decision.tier_overridden {
                format!("{} → {}", decision.base_tier, decision.final_tier)
            } else {
                decision.final_tier.to_string()
            };
            let result = if decision.allowed {
                self.colorize("ALLOW", "green")
            } else {
                self.colorize("BLOCK", "red")
            };
            let reasons = decision
                .blocks
                .iter()
                .chain(decision.notes.iter())
                .cloned()
                .collect::<Vec<_>>()
                .join("\n");

            builder.push_record([
                prop.player.as_str(),
                prop.market.as_str(),
                line.as_str(),
                win_prob.as_str(),
                tier.as_str(),
                result.as_str(),
                reasons.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_decisions_quiet(&self, results: &[(Proposition, Decision)]) -> String {
        results
            .iter()
            .map(|(prop, decision)| {
                format!(
                    "{}\t{}\t{}\t{}\t{}\t{}",
                    prop.player,
                    prop.market,
                    prop.side,
                    prop.line,
                    decision.final_tier,
                    if decision.allowed { "ALLOW" } else { "BLOCK" }
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Format a batch summary line.
    pub fn summary(&self, run_id: &str, summary: &BatchSummary) -> String {
        let msg = format!("Run {}: {}", run_id, summary);
        if summary.blocked > 0 {
            self.warning(&msg)
        } else {
            self.success(&msg)
        }
    }

    /// Describe a loaded configuration.
    pub fn config_report(&self, gate: &GateConfig, registry: &AdjusterRegistry) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Setting", "Value"]);
        builder.push_record(["Penalty table", gate.penalties.version()]);
        for tag in gate.penalties.tags() {
            builder.push_record(["  rule".to_string(), tag.to_string()]);
        }
        builder.push_record([
            "LiveFlow min win prob".to_string(),
            format!("{:.3}", gate.liveflow.min_win_probability),
        ]);
        builder.push_record([
            "LiveFlow min edge".to_string(),
            format!("{:.4}", gate.liveflow.min_edge),
        ]);
        builder.push_record([
            "Minutes-cap extra".to_string(),
            format!("{:.3}", gate.liveflow.minutes_cap_extra_win_probability),
        ]);
        for name in registry.names() {
            let state = match registry.get(name) {
                Some(adjuster) if adjuster.is_enabled() => "enabled",
                _ => "disabled",
            };
            builder.push_record([format!("Adjuster {}", name), state.to_string()]);
        }

        let mut table = builder.build();
        table.with(Style::rounded());
        format!("{}\n{}", table, self.success("Configuration is valid"))
    }

    /// Pretty-print any serializable value as JSON.
    pub fn json<T: Serialize>(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharpedge_domain::{EvalMode, Side};
    use sharpedge_gatekeeper::Gatekeeper;

    fn create_results() -> Vec<(Proposition, Decision)> {
        let gatekeeper = Gatekeeper::default_config();
        let props = vec![
            Proposition::new("Starter Big", "NYK", "REB", Side::Over, 11.5, -110)
                .with_projection(12.4, 12.0, 0.72, 0.04)
                .with_tags(["STARTER_BIG_MINUTES_CAP"])
                .with_starter_big(true),
            Proposition::new("Wing", "LAL", "REB", Side::Under, 5.5, 105)
                .with_projection(5.0, 5.0, 0.45, 0.02),
        ];
        props
            .into_iter()
            .map(|p| {
                let d = gatekeeper.evaluate(&p, EvalMode::Liveflow);
                (p, d)
            })
            .collect()
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_decisions(&create_results()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["decision"]["final_tier"], "LIMITED");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = formatter.format_decisions(&create_results()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("LIMITED\tALLOW"));
        assert!(lines[1].ends_with("NO_PLAY\tBLOCK"));
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_decisions(&create_results()).unwrap();
        assert!(output.contains("Win Prob"));
        assert!(output.contains("LOCK → LIMITED"));
        assert!(output.contains("BLOCK"));
    }

    #[test]
    fn test_empty_results() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_decisions(&[]).unwrap();
        assert!(output.contains("No propositions found"));
    }

    #[test]
    fn test_summary_line() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let results = create_results();
        let decisions: Vec<Decision> = results.into_iter().map(|(_, d)| d).collect();
        let summary = BatchSummary::from_decisions(&decisions);
        let line = formatter.summary("abc", &summary);
        assert!(line.starts_with("⚠ Run abc: 2 evaluated"));
    }

    #[test]
    fn test_config_report() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let report =
            formatter.config_report(&GateConfig::default(), &AdjusterRegistry::with_defaults());
        assert!(report.contains("v1"));
        assert!(report.contains("STARTER_BIG_MINUTES_CAP"));
        assert!(report.contains("Adjuster hv_guardrail"));
        assert!(report.ends_with("✓ Configuration is valid"));
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
