//! Configuration factories
//!
//! A factory assembles the [`EnvironmentConfig`] the hosting server runs
//! with. The two shipped variants differ only in how they resolve paths: one
//! works relative to the configuration directory, the other pins everything
//! to a fixed workspace root.

use crate::environment::command::{Command, Events};
use crate::environment::config::{
    EnvironmentConfig, MainArgs, DEFAULT_HTTP_PORT, DEFAULT_OPENID_HOST,
    DEFAULT_PUBLISH_LOCATION, SYSTEM_DIR,
};
use crate::snapshot::{self, DATABASES_DIR, STATUS_CLEARED};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

/// Name of the database-reset command every shipped variant registers
pub const RESET_COMMAND: &str = "reset-db";

/// Builds the environment configuration once at process start
#[async_trait]
pub trait ConfigurationFactory: Send + Sync {
    /// Assemble the configuration for the given process arguments
    async fn configuration(&self, args: &MainArgs) -> Result<EnvironmentConfig>;
}

/// Configuration resolved against the configuration directory
///
/// Working databases, the snapshot template and the system directory all
/// live under whatever root the request context carries, so one binary
/// serves any number of test environments side by side.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTestConfig;

#[async_trait]
impl ConfigurationFactory for LocalTestConfig {
    async fn configuration(&self, args: &MainArgs) -> Result<EnvironmentConfig> {
        log_ignored_inputs(args);
        let root = args.config_dir.clone();

        Ok(EnvironmentConfig {
            http_port: DEFAULT_HTTP_PORT,
            openid_host: DEFAULT_OPENID_HOST.to_string(),
            data_dir: root.join(DATABASES_DIR),
            cache_dir: root.join(SYSTEM_DIR),
            remotes_info: None,
            users_info: None,
            secrets_file: None,
            default_publish_location: None,
            commands: vec![Command::new(RESET_COMMAND, |ctx| {
                snapshot::restore(&ctx.root)?;
                Ok(json!({ "status": STATUS_CLEARED }))
            })],
            events: Events::on_load(|_config, ctx| {
                snapshot::restore(&ctx.root)?;
                Ok(())
            }),
        })
    }
}

/// Configuration pinned to an explicit workspace root
///
/// Mirrors a checked-out integration workspace: databases, system directory,
/// remotes/users/secrets files and the publish location all live beneath the
/// captured root. Paths carried by `MainArgs` or the request context do not
/// move it.
#[derive(Debug, Clone)]
pub struct FixedRootConfig {
    root: PathBuf,
}

impl FixedRootConfig {
    /// Pin the configuration to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ConfigurationFactory for FixedRootConfig {
    async fn configuration(&self, args: &MainArgs) -> Result<EnvironmentConfig> {
        log_ignored_inputs(args);
        let root = self.root.clone();
        let command_root = root.clone();
        let hook_root = root.clone();

        Ok(EnvironmentConfig {
            http_port: DEFAULT_HTTP_PORT,
            openid_host: DEFAULT_OPENID_HOST.to_string(),
            data_dir: root.join(DATABASES_DIR),
            cache_dir: root.join(SYSTEM_DIR),
            remotes_info: Some(root.join("remotes-info.json")),
            users_info: Some(root.join("users-info.json")),
            secrets_file: Some(root.join("secrets.json")),
            default_publish_location: Some(DEFAULT_PUBLISH_LOCATION.to_string()),
            commands: vec![Command::new(RESET_COMMAND, move |_ctx| {
                snapshot::restore(&command_root)?;
                Ok(json!({ "status": STATUS_CLEARED }))
            })],
            events: Events::on_load(move |_config, _ctx| {
                snapshot::restore(&hook_root)?;
                Ok(())
            }),
        })
    }
}

/// Debug-log profile and parameters; the shipped factories never branch on them
fn log_ignored_inputs(args: &MainArgs) {
    if let Some(profile) = &args.profile {
        debug!("profile '{}' accepted but not used", profile);
    }
    if !args.parameters.is_empty() {
        debug!("{} parameter(s) accepted but not used", args.parameters.len());
    }
}
