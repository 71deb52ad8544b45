//! Flow domain model

use crate::core::step::Step;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised while interpreting a flow's chain expressions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    /// A chain expression contained no step identifiers at all
    #[error("flow '{flow}' declares an empty chain expression")]
    EmptyChain { flow: String },

    /// Two consecutive `>` separators, or a leading/trailing one
    #[error("flow '{flow}' chain '{chain}' contains an empty segment")]
    EmptySegment { flow: String, chain: String },

    /// A segment that is not a well-formed step identifier
    #[error("flow '{flow}' chain '{chain}' references malformed step id '{id}'")]
    MalformedStepId {
        flow: String,
        chain: String,
        id: String,
    },

    /// The union of the flow's chains is not acyclic
    #[error("flow '{flow}' has a dependency cycle involving step '{step}'")]
    Cycle { flow: String, step: String },
}

/// A named dependency graph over steps
///
/// The graph is declared as an ordered list of chain expressions of the form
/// `a > b > c`: `b` starts after `a` completes, `c` after `b`. Chains may
/// share nodes; their union forms a single DAG. A chain with one segment
/// declares an isolated node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    /// Flow name, unique within a descriptor
    pub name: String,

    /// Chain expressions, kept in their declared textual form
    pub dag: Vec<String>,
}

impl Flow {
    /// Create a flow from its name and chain expressions
    pub fn new<I, S>(name: impl Into<String>, chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            dag: chains.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse every chain expression into its step-id segments
    ///
    /// Segments split on `>` and may carry surrounding whitespace, which is
    /// discarded. Empty or malformed segments are rejected.
    pub fn chains(&self) -> Result<Vec<Vec<String>>, FlowError> {
        let mut chains = Vec::with_capacity(self.dag.len());

        for raw in &self.dag {
            if raw.trim().is_empty() {
                return Err(FlowError::EmptyChain {
                    flow: self.name.clone(),
                });
            }

            let mut segments = Vec::new();
            for segment in raw.split('>') {
                let id = segment.trim();
                if id.is_empty() {
                    return Err(FlowError::EmptySegment {
                        flow: self.name.clone(),
                        chain: raw.clone(),
                    });
                }
                if !Step::is_valid_id(id) {
                    return Err(FlowError::MalformedStepId {
                        flow: self.name.clone(),
                        chain: raw.clone(),
                        id: id.to_string(),
                    });
                }
                segments.push(id.to_string());
            }
            chains.push(segments);
        }

        Ok(chains)
    }

    /// Union edge list over all chains, in declaration order, deduplicated
    ///
    /// Each edge `(from, to)` means `to` starts only after `from` completes.
    pub fn edges(&self) -> Result<Vec<(String, String)>, FlowError> {
        let mut edges: Vec<(String, String)> = Vec::new();

        for chain in self.chains()? {
            for pair in chain.windows(2) {
                let edge = (pair[0].clone(), pair[1].clone());
                if !edges.contains(&edge) {
                    edges.push(edge);
                }
            }
        }

        Ok(edges)
    }

    /// Every step id this flow mentions, in first-mention order
    pub fn referenced_steps(&self) -> Result<Vec<String>, FlowError> {
        let mut seen = HashSet::new();
        let mut steps = Vec::new();

        for chain in self.chains()? {
            for id in chain {
                if seen.insert(id.clone()) {
                    steps.push(id);
                }
            }
        }

        Ok(steps)
    }

    /// Topological order over the union DAG
    ///
    /// Deterministic: nodes are visited in first-mention order, so repeated
    /// calls on the same flow yield the same ordering.
    pub fn execution_order(&self) -> Result<Vec<String>, FlowError> {
        let edges = self.edges()?;
        let nodes = self.referenced_steps()?;

        let mut order = Vec::with_capacity(nodes.len());
        let mut visited = HashSet::new();
        let mut in_progress = HashSet::new();

        for node in &nodes {
            self.visit(node, &edges, &mut visited, &mut in_progress, &mut order)?;
        }

        Ok(order)
    }

    fn visit(
        &self,
        step: &str,
        edges: &[(String, String)],
        visited: &mut HashSet<String>,
        in_progress: &mut HashSet<String>,
        order: &mut Vec<String>,
    ) -> Result<(), FlowError> {
        if visited.contains(step) {
            return Ok(());
        }

        in_progress.insert(step.to_string());

        // A step runs only after everything it depends on
        for (from, to) in edges {
            if to == step {
                if in_progress.contains(from) {
                    return Err(FlowError::Cycle {
                        flow: self.name.clone(),
                        step: from.clone(),
                    });
                }
                self.visit(from, edges, visited, in_progress, order)?;
            }
        }

        in_progress.remove(step);
        visited.insert(step.to_string());
        order.push(step.to_string());

        Ok(())
    }
}
