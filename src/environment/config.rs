//! Environment configuration domain model

use crate::environment::command::{Command, CommandContext, Events};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Port the development server binds by default
pub const DEFAULT_HTTP_PORT: u16 = 2001;

/// Identity-provider host used when none is configured
pub const DEFAULT_OPENID_HOST: &str = "auth.devbench.dev";

/// System/cache directory name, relative to a configuration root
pub const SYSTEM_DIR: &str = "devbench_system";

/// Publish location within a user drive used when none is configured
pub const DEFAULT_PUBLISH_LOCATION: &str = "private/default-drive";

/// Process-level arguments handed to configuration factories
///
/// `profile` and `parameters` are accepted for interface compatibility; the
/// shipped factories never branch on them and log anything supplied.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MainArgs {
    /// Directory holding the active configuration
    pub config_dir: PathBuf,

    /// Requested configuration profile
    pub profile: Option<String>,

    /// Free-form key/value parameters
    pub parameters: HashMap<String, String>,
}

impl MainArgs {
    /// Arguments rooted at the given configuration directory
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            profile: None,
            parameters: HashMap::new(),
        }
    }

    /// Set the requested profile
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }

    /// Add a key/value parameter
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }
}

/// Runtime parameters governing a local development server instance
///
/// Built once at startup by a [`ConfigurationFactory`] and read-only
/// afterwards; command and event callbacks act on the filesystem, never on
/// this record.
///
/// [`ConfigurationFactory`]: crate::environment::factory::ConfigurationFactory
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    /// Port the server's HTTP interface binds
    pub http_port: u16,

    /// Identity-provider host
    pub openid_host: String,

    /// Working databases directory
    pub data_dir: PathBuf,

    /// Server system/cache directory
    pub cache_dir: PathBuf,

    /// Remote-environments description file, if any
    pub remotes_info: Option<PathBuf>,

    /// Known-users description file, if any
    pub users_info: Option<PathBuf>,

    /// Secrets file, if any
    pub secrets_file: Option<PathBuf>,

    /// Default publish location within the user drive, if any
    pub default_publish_location: Option<String>,

    /// Named administrative commands, in registration order
    pub commands: Vec<Command>,

    /// Lifecycle hooks
    pub events: Events,
}

impl EnvironmentConfig {
    /// Look up a registered command by name
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Registered command names, in registration order
    pub fn command_names(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.name.clone()).collect()
    }

    /// Fire the startup hook the way the hosting server does on load
    ///
    /// No-op when no hook is bound.
    pub fn fire_on_load(&self, ctx: &CommandContext) -> Result<()> {
        if let Some(hook) = &self.events.on_load {
            hook(self, ctx)?;
        }
        Ok(())
    }

    /// Plain-data view of this configuration, safe to serialize
    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            http_port: self.http_port,
            openid_host: self.openid_host.clone(),
            data_dir: self.data_dir.clone(),
            cache_dir: self.cache_dir.clone(),
            remotes_info: self.remotes_info.clone(),
            users_info: self.users_info.clone(),
            secrets_file: self.secrets_file.clone(),
            default_publish_location: self.default_publish_location.clone(),
            commands: self.command_names(),
            on_load: self.events.on_load.is_some(),
        }
    }
}

/// Serializable projection of an [`EnvironmentConfig`]
///
/// Callbacks are reduced to their observable surface: command names and
/// whether a startup hook is bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
    pub http_port: u16,
    pub openid_host: String,
    pub data_dir: PathBuf,
    pub cache_dir: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remotes_info: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub users_info: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secrets_file: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_publish_location: Option<String>,
    pub commands: Vec<String>,
    pub on_load: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_config() -> EnvironmentConfig {
        EnvironmentConfig {
            http_port: DEFAULT_HTTP_PORT,
            openid_host: DEFAULT_OPENID_HOST.to_string(),
            data_dir: PathBuf::from("/env/databases"),
            cache_dir: PathBuf::from("/env/devbench_system"),
            remotes_info: None,
            users_info: None,
            secrets_file: None,
            default_publish_location: None,
            commands: vec![
                Command::new("reset-db", |_| Ok(json!({ "status": "ok" }))),
                Command::new("ping", |_| Ok(json!({ "status": "pong" }))),
            ],
            events: Events::default(),
        }
    }

    #[test]
    fn test_main_args_builder() {
        let args = MainArgs::new("/env")
            .with_profile("integration")
            .with_parameter("region", "local");

        assert_eq!(args.config_dir, PathBuf::from("/env"));
        assert_eq!(args.profile.as_deref(), Some("integration"));
        assert_eq!(args.parameters.get("region").map(String::as_str), Some("local"));
    }

    #[test]
    fn test_command_lookup_by_name() {
        let config = sample_config();

        assert!(config.command("reset-db").is_some());
        assert!(config.command("missing").is_none());
        assert_eq!(config.command_names(), vec!["reset-db", "ping"]);
    }

    #[test]
    fn test_fire_on_load_without_hook_is_a_no_op() {
        let config = sample_config();
        let ctx = CommandContext::new("/env");

        assert!(config.fire_on_load(&ctx).is_ok());
    }

    #[test]
    fn test_summary_reduces_callbacks_to_names() {
        let summary = sample_config().summary();

        assert_eq!(summary.http_port, 2001);
        assert_eq!(summary.commands, vec!["reset-db", "ping"]);
        assert!(!summary.on_load);
    }
}
