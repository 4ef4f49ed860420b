//! The causal record left behind by one function evaluation.
//!
//! Every evaluation produces exactly one [`Witness`]. It is immutable once
//! created and may be asked, any number of times, to explain a designated
//! part of the evaluation's output in terms of the function's inputs. The
//! answer is grafted onto the explanation tree under construction through a
//! [`NodeFactory`], and the new leaves are handed back so the tree builder
//! can keep going upstream.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::designator::{Designator, Part};
use crate::error::Result;
use crate::tree::{NodeFactory, NodeId};

/// Confidence tag carried by every edge of an explanation tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Precise backward mapping.
    Exact,
    /// Conservative superset of the true dependency.
    Over,
    /// Conservative subset of the true dependency.
    Under,
}

impl Quality {
    /// Quality of two edges followed one after the other: the weakest link
    /// wins, and mixing over- with under-approximation gives no bound at all.
    pub fn compose(self, other: Quality) -> Option<Quality> {
        match (self, other) {
            (Quality::Exact, q) | (q, Quality::Exact) => Some(q),
            (Quality::Over, Quality::Over) => Some(Quality::Over),
            (Quality::Under, Quality::Under) => Some(Quality::Under),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Quality::Exact => write!(f, "exact"),
            Quality::Over => write!(f, "over"),
            Quality::Under => write!(f, "under"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Query {
    /// What inputs produced this output.
    #[default]
    Provenance,
    /// What inputs, if different, would change this output.
    Causality,
}

impl Query {
    pub fn is_causality(&self) -> bool {
        matches!(self, Query::Causality)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Query::Provenance => write!(f, "provenance"),
            Query::Causality => write!(f, "causality"),
        }
    }
}

pub trait Witness: fmt::Debug + Send + Sync {
    /// Number of inputs of the function that produced this witness.
    fn in_arity(&self) -> usize;

    /// Explains the part `designator` of output `output` by attaching a
    /// subtree to `root`, and returns the subtree's new leaves.
    ///
    /// Witnesses that know nothing finer attribute the output to all inputs
    /// jointly, which is also what this default does.
    fn answer(
        &self,
        _query: Query,
        _output: usize,
        _designator: &Designator,
        root: NodeId,
        factory: &mut NodeFactory<'_>,
    ) -> Result<Vec<NodeId>> {
        Ok(link_all_inputs(self.in_arity(), root, factory))
    }
}

/// AND node over every input of the function, all edges exact.
pub fn link_all_inputs(in_arity: usize, root: NodeId, factory: &mut NodeFactory<'_>) -> Vec<NodeId> {
    let and = factory.and_node();
    let mut leaves = Vec::with_capacity(in_arity);
    for i in 0..in_arity {
        let child = factory.object_node(Designator::compose([Part::NthInput(i)]));
        factory.add_child(and, child, Quality::Exact);
        leaves.push(child);
    }
    factory.add_child(root, and, Quality::Exact);
    leaves
}

/// Witness with no knowledge beyond the arity of its function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkAll {
    in_arity: usize,
}

impl LinkAll {
    pub fn new(in_arity: usize) -> Self {
        Self { in_arity }
    }
}

impl Witness for LinkAll {
    fn in_arity(&self) -> usize {
        self.in_arity
    }
}
