//! Commands and lifecycle events exposed to the hosting server

use crate::environment::config::EnvironmentConfig;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Callback signature for a named command
///
/// Given the request context, perform an action and return a JSON status
/// mapping for the caller.
pub type CommandAction = Arc<dyn Fn(&CommandContext) -> anyhow::Result<Value> + Send + Sync>;

/// Callback signature for the startup hook
pub type LoadHook =
    Arc<dyn Fn(&EnvironmentConfig, &CommandContext) -> anyhow::Result<()> + Send + Sync>;

/// Context handed to command and event callbacks
#[derive(Debug, Clone)]
pub struct CommandContext {
    /// Correlation id for this invocation
    pub request_id: Uuid,

    /// Directory holding the active configuration
    pub root: PathBuf,
}

impl CommandContext {
    /// Create a context rooted at the given configuration directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            root: root.into(),
        }
    }
}

/// A named command invocable through the server's administrative surface
#[derive(Clone)]
pub struct Command {
    /// Command name, unique within a configuration
    pub name: String,

    /// Action performed on invocation
    pub action: CommandAction,
}

impl Command {
    /// Create a command from its name and action
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&CommandContext) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            action: Arc::new(action),
        }
    }

    /// Run the command's action
    pub fn invoke(&self, ctx: &CommandContext) -> anyhow::Result<Value> {
        (self.action)(ctx)
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Lifecycle hooks the hosting server fires
#[derive(Clone, Default)]
pub struct Events {
    /// Invoked once when the server finishes loading the configuration
    pub on_load: Option<LoadHook>,
}

impl Events {
    /// Events with only the startup hook bound
    pub fn on_load<F>(hook: F) -> Self
    where
        F: Fn(&EnvironmentConfig, &CommandContext) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            on_load: Some(Arc::new(hook)),
        }
    }
}

impl fmt::Debug for Events {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Events")
            .field("on_load", &self.on_load.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_invocation_returns_status() {
        let command = Command::new("ping", |_ctx| Ok(json!({ "status": "pong" })));
        let ctx = CommandContext::new("/tmp");

        let value = command.invoke(&ctx).unwrap();
        assert_eq!(value, json!({ "status": "pong" }));
    }

    #[test]
    fn test_command_receives_context_root() {
        let command = Command::new("where", |ctx: &CommandContext| {
            Ok(json!({ "root": ctx.root.display().to_string() }))
        });

        let value = command.invoke(&CommandContext::new("/data/env")).unwrap();
        assert_eq!(value, json!({ "root": "/data/env" }));
    }

    #[test]
    fn test_contexts_carry_unique_request_ids() {
        let first = CommandContext::new("/tmp");
        let second = CommandContext::new("/tmp");

        assert_ne!(first.request_id, second.request_id);
    }

    #[test]
    fn test_events_default_to_no_hook() {
        assert!(Events::default().on_load.is_none());
        assert!(Events::on_load(|_, _| Ok(())).on_load.is_some());
    }
}
