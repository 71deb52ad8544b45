//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{
    EnvCommand, InvokeCommand, LoadCommand, PipelineCommand, RestoreCommand, ValidateCommand,
};

/// Local development environments and their packaging pipelines
#[derive(Debug, Parser, Clone)]
#[command(name = "devbench")]
#[command(author = "Devbench Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Local dev-server configuration and packaging pipeline descriptors", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Show a pipeline descriptor
    Pipeline(PipelineCommand),

    /// Validate a pipeline descriptor
    Validate(ValidateCommand),

    /// Show the environment configuration a factory builds
    Env(EnvCommand),

    /// Invoke a command registered by the configuration
    Invoke(InvokeCommand),

    /// Fire the on-load hook as the hosting server would
    Load(LoadCommand),

    /// Restore the databases directory from its snapshot template
    Restore(RestoreCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}

use std::ffi::OsString;
