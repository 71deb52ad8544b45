//! Step domain model

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern a well-formed step identifier must match
const STEP_ID_PATTERN: &str = r"^[a-z0-9]+(?:[-_.][a-z0-9]+)*$";

/// A named, shell-invocable unit of work in a packaging pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step identifier, referenced by flow chain expressions
    pub id: String,

    /// Shell invocation the consuming framework executes for this step
    pub run: String,
}

impl Step {
    /// Create a step from its identifier and shell command
    pub fn new(id: impl Into<String>, run: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            run: run.into(),
        }
    }

    /// Check whether `id` is a well-formed step identifier
    ///
    /// Identifiers are lowercase alphanumeric words joined by `-`, `_` or `.`
    /// (for example `create-test-env`). Chain parsing rejects anything else.
    pub fn is_valid_id(id: &str) -> bool {
        match Regex::new(STEP_ID_PATTERN) {
            Ok(pattern) => pattern.is_match(id),
            Err(_) => false,
        }
    }
}
