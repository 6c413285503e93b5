//! Check-config command implementation.

use crate::config::{OutputFormat, PipelineConfig};
use crate::error::Result;
use crate::output::Formatter;

/// Execute the check-config command.
pub fn execute_check_config(config: &PipelineConfig, formatter: &Formatter) -> Result<()> {
    // Building both halves re-runs every validation
    let gatekeeper = config.gatekeeper()?;
    let registry = config.registry()?;

    match formatter.format() {
        OutputFormat::Json => println!("{}", formatter.json(config)?),
        OutputFormat::Quiet => {}
        OutputFormat::Table => {
            println!("{}", formatter.config_report(gatekeeper.config(), &registry))
        }
    }

    Ok(())
}
