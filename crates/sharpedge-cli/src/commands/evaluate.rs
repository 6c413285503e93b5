//! Evaluate command implementation.

use crate::cli::EvaluateArgs;
use crate::config::PipelineConfig;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::sink::JsonlSink;
use sharpedge_domain::traits::DecisionSink;
use sharpedge_domain::{Decision, EvalMode, Proposition, RiskTag};
use sharpedge_gatekeeper::{BatchSummary, Gatekeeper};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Execute the evaluate command.
pub fn execute_evaluate(
    args: EvaluateArgs,
    config: &PipelineConfig,
    formatter: &Formatter,
) -> Result<()> {
    let gatekeeper = config.gatekeeper()?;
    let mode: EvalMode = args.mode.into();
    let run_id = Uuid::now_v7().to_string();

    let props = read_propositions(&args.input)?;
    tracing::info!(
        run_id = %run_id,
        count = props.len(),
        mode = mode.as_str(),
        "Evaluating propositions"
    );

    let results = match &args.log {
        Some(path) => {
            let mut sink = JsonlSink::open(path, run_id.as_str())?;
            let results = evaluate_all(&gatekeeper, props, mode, Some(&mut sink))?;
            let message = format!(
                "Logged {} decision(s) to {}",
                sink.written(),
                path.display()
            );
            eprintln!("{}", formatter.info(&message));
            results
        }
        None => evaluate_all(&gatekeeper, props, mode, None)?,
    };

    println!("{}", formatter.format_decisions(&results)?);

    let decisions: Vec<Decision> = results.into_iter().map(|(_, d)| d).collect();
    let summary = BatchSummary::from_decisions(&decisions);
    eprintln!("{}", formatter.summary(&run_id, &summary));

    Ok(())
}

/// Evaluate propositions in input order, recording each to the sink if one is given.
pub fn evaluate_all(
    gatekeeper: &Gatekeeper,
    props: Vec<Proposition>,
    mode: EvalMode,
    sink: Option<&mut JsonlSink>,
) -> Result<Vec<(Proposition, Decision)>> {
    let Some(sink) = sink else {
        let decisions = gatekeeper.evaluate_batch(&props, mode);
        return Ok(props.into_iter().zip(decisions).collect());
    };

    let mut results = Vec::with_capacity(props.len());
    for prop in props {
        let decision = gatekeeper.evaluate_and_record(&prop, mode, sink)?;
        results.push((prop, decision));
    }
    sink.flush()?;
    Ok(results)
}

/// Read one proposition per non-blank line.
pub fn read_propositions(path: &Path) -> Result<Vec<Proposition>> {
    let contents = fs::read_to_string(path)?;
    parse_propositions(&contents)
}

/// Parse JSON-lines text into propositions.
///
/// Blank lines are skipped. Tags outside the risk vocabulary are kept but
/// logged, since they will never match a rule.
pub fn parse_propositions(contents: &str) -> Result<Vec<Proposition>> {
    let mut props = Vec::new();
    for (idx, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let prop: Proposition = serde_json::from_str(line).map_err(|e| CliError::InvalidLine {
            line: idx + 1,
            reason: e.to_string(),
        })?;

        for tag in prop.tags_active.iter().filter(|t| RiskTag::parse(t).is_none()) {
            tracing::warn!(
                player = %prop.player,
                tag = %tag,
                line = idx + 1,
                "Ignoring unknown risk tag"
            );
        }
        props.push(prop);
    }
    Ok(props)
}
