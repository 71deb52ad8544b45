//! CLI command definitions

use crate::environment::{ConfigurationFactory, FixedRootConfig, LocalTestConfig, MainArgs};
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Show a pipeline descriptor
#[derive(Debug, Args, Clone)]
pub struct PipelineCommand {
    /// Descriptor shape to build
    #[arg(long, value_enum, default_value_t = DescriptorVariant::TestEnv)]
    pub variant: DescriptorVariant,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Validate a pipeline descriptor
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Descriptor shape to build
    #[arg(long, value_enum, default_value_t = DescriptorVariant::TestEnv)]
    pub variant: DescriptorVariant,
}

/// Show the environment configuration a factory builds
#[derive(Debug, Args, Clone)]
pub struct EnvCommand {
    #[command(flatten)]
    pub source: ConfigSource,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Invoke a named command registered by the configuration
#[derive(Debug, Args, Clone)]
pub struct InvokeCommand {
    /// Command name, e.g. reset-db
    pub name: String,

    #[command(flatten)]
    pub source: ConfigSource,
}

/// Fire the on-load hook the way the hosting server would
#[derive(Debug, Args, Clone)]
pub struct LoadCommand {
    #[command(flatten)]
    pub source: ConfigSource,
}

/// Restore the databases directory from its snapshot template
#[derive(Debug, Args, Clone)]
pub struct RestoreCommand {
    /// Configuration root directory (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,
}

/// Configuration source selection shared by environment-facing commands
#[derive(Debug, Args, Clone)]
pub struct ConfigSource {
    /// Configuration root directory (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Pin the configuration to this workspace root instead
    #[arg(long, conflicts_with = "root")]
    pub fixed_root: Option<PathBuf>,

    /// Configuration profile to request
    #[arg(long)]
    pub profile: Option<String>,

    /// Factory parameters (key=value)
    #[arg(long = "param", value_parser = parse_key_value)]
    pub parameters: Vec<(String, String)>,
}

impl ConfigSource {
    /// Resolve the process arguments this selection implies
    pub fn main_args(&self) -> Result<MainArgs> {
        let config_dir = match (&self.root, &self.fixed_root) {
            (Some(root), _) => root.clone(),
            (None, Some(fixed)) => fixed.clone(),
            (None, None) => {
                std::env::current_dir().context("Failed to resolve current directory")?
            }
        };

        let mut args = MainArgs::new(config_dir);
        if let Some(profile) = &self.profile {
            args = args.with_profile(profile.as_str());
        }
        for (key, value) in &self.parameters {
            args = args.with_parameter(key.as_str(), value.as_str());
        }
        Ok(args)
    }

    /// Instantiate the factory this selection implies
    pub fn factory(&self) -> Box<dyn ConfigurationFactory> {
        match &self.fixed_root {
            Some(root) => Box::new(FixedRootConfig::new(root)),
            None => Box::new(LocalTestConfig),
        }
    }
}

/// Which descriptor shape to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DescriptorVariant {
    /// The stock npm package pipeline, forwarded unmodified
    Base,
    /// The base extended with a local test environment
    #[clap(name = "test-env")]
    TestEnv,
}

/// Output format for structured listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Parse key=value pairs
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, '=').collect();
    if parts.len() != 2 {
        return Err(format!("Invalid key=value pair: {}", s));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}
