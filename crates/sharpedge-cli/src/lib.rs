//! SharpEdge CLI library.
//!
//! This library provides the command-line front-end for the SharpEdge
//! pipeline: configuration loading, command execution, the JSON-lines
//! decision log and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod sink;

pub use cli::{Cli, Command};
pub use config::PipelineConfig;
pub use error::{CliError, Result};
pub use output::Formatter;
pub use sink::JsonlSink;
