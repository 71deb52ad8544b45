//! devbench - local dev-server configuration and packaging pipeline descriptors

pub mod cli;
pub mod core;
pub mod environment;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{DescriptorError, Flow, FlowError, PipelineDescriptor, Step};
pub use crate::environment::{
    Command, CommandContext, ConfigurationFactory, EnvironmentConfig, Events, FixedRootConfig,
    LocalTestConfig, MainArgs,
};
pub use crate::snapshot::{RestoreReport, SnapshotError};
