//! Pipeline descriptor domain model

use crate::core::flow::{Flow, FlowError};
use crate::core::step::Step;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Problems a consumer-side validation pass reports
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
    /// The same step id is declared more than once
    #[error("duplicate step id '{0}'")]
    DuplicateStep(String),

    /// The same flow name is declared more than once
    #[error("duplicate flow name '{0}'")]
    DuplicateFlow(String),

    /// A flow chain mentions a step the descriptor never declares
    #[error("flow '{flow}' references undeclared step '{step}'")]
    UndeclaredStep { flow: String, step: String },

    /// A flow's chain expressions are themselves ill-formed
    #[error("{0}")]
    Flow(#[from] FlowError),
}

/// An ordered list of steps plus the named flows that sequence them
///
/// This is the contract handed to the consuming packaging framework: the
/// step list declares every invocable unit, each flow a DAG of ordering
/// constraints over them. Builders compose descriptors structurally and
/// never validate; consumers that cannot tolerate duplicates or dangling
/// references call [`validate`](Self::validate) before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineDescriptor {
    /// Declared steps, in declaration order
    pub steps: Vec<Step>,

    /// Named flows, in declaration order
    pub flows: Vec<Flow>,
}

impl PipelineDescriptor {
    /// Create a descriptor from its steps and flows
    pub fn new(steps: Vec<Step>, flows: Vec<Flow>) -> Self {
        Self { steps, flows }
    }

    /// Look up a step by id; on duplicates the first declaration wins
    pub fn step(&self, id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Look up a flow by name
    pub fn flow(&self, name: &str) -> Option<&Flow> {
        self.flows.iter().find(|f| f.name == name)
    }

    /// Append steps to the end of the step list
    ///
    /// Base order is preserved and ids are not deduplicated: an appended
    /// step whose id collides with a base step keeps both entries, and
    /// [`validate`](Self::validate) reports the collision.
    pub fn append_steps(mut self, extra: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(extra);
        self
    }

    /// Install `flow`, replacing any existing flow with the same name
    ///
    /// The replacement is placed first; every other flow keeps its relative
    /// order. A flow with a fresh name is simply prepended.
    pub fn override_flow(mut self, flow: Flow) -> Self {
        let name = flow.name.clone();
        let mut flows = vec![flow];
        flows.extend(self.flows.into_iter().filter(|f| f.name != name));
        self.flows = flows;
        self
    }

    /// Consumer-side well-formedness check
    ///
    /// Reports duplicate step ids, duplicate flow names, flow references to
    /// undeclared steps, ill-formed chain expressions and dependency cycles.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        let mut step_ids = HashSet::new();
        for step in &self.steps {
            if !step_ids.insert(step.id.as_str()) {
                return Err(DescriptorError::DuplicateStep(step.id.clone()));
            }
        }

        let mut flow_names = HashSet::new();
        for flow in &self.flows {
            if !flow_names.insert(flow.name.as_str()) {
                return Err(DescriptorError::DuplicateFlow(flow.name.clone()));
            }
        }

        for flow in &self.flows {
            for referenced in flow.referenced_steps()? {
                if !step_ids.contains(referenced.as_str()) {
                    return Err(DescriptorError::UndeclaredStep {
                        flow: flow.name.clone(),
                        step: referenced,
                    });
                }
            }

            // Surfaces cycles
            flow.execution_order()?;
        }

        Ok(())
    }
}
