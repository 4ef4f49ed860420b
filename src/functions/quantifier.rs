use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

use crate::designator::{Designator, Part};
use crate::error::{BreadcrumbError, Result};
use crate::function::{Evaluation, Function, check_arity};
use crate::serial::FunctionSpec;
use crate::tree::{NodeFactory, NodeId};
use crate::value::Value;
use crate::witness::{Quality, Query, Witness};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantifierKind {
    ForAll,
    Exists,
}

/// Folds a list of booleans into one. "For all" starts from `true` and
/// conjoins, "exists" starts from `false` and disjoins; anything that is
/// not a boolean counts as `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantifier {
    kind: QuantifierKind,
}

impl Quantifier {
    pub fn new(kind: QuantifierKind) -> Self {
        Self { kind }
    }
    pub fn for_all() -> Self {
        Self {
            kind: QuantifierKind::ForAll,
        }
    }
    pub fn exists() -> Self {
        Self {
            kind: QuantifierKind::Exists,
        }
    }
    pub fn kind(&self) -> QuantifierKind {
        self.kind
    }
    fn start_value(&self) -> bool {
        self.kind == QuantifierKind::ForAll
    }
    fn update(&self, running: bool, element: bool) -> bool {
        match self.kind {
            QuantifierKind::ForAll => running && element,
            QuantifierKind::Exists => running || element,
        }
    }
    /// Result of the fold, with the positions of every element that went
    /// against the start value.
    pub fn fold(&self, list: &[Value]) -> (bool, QuantifierWitness) {
        let start = self.start_value();
        let mut value = start;
        let mut positions = Vec::new();
        for (pos, element) in list.iter().enumerate() {
            let b = element.as_bool().unwrap_or(false);
            if b != start {
                positions.push(pos);
            }
            value = self.update(value, b);
        }
        trace!(quantifier = %self.name(), result = value, offending = ?positions, "folded");
        let witness = QuantifierWitness {
            input_length: list.len(),
            positions,
        };
        (value, witness)
    }
}

impl Function for Quantifier {
    fn name(&self) -> String {
        match self.kind {
            QuantifierKind::ForAll => "forall".to_string(),
            QuantifierKind::Exists => "exists".to_string(),
        }
    }
    fn in_arity(&self) -> usize {
        1
    }
    fn out_arity(&self) -> usize {
        1
    }
    fn evaluate(&self, inputs: &[Value]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let list = inputs[0]
            .as_list()
            .ok_or_else(|| BreadcrumbError::TypeMismatch {
                function: self.name(),
                expected: "list",
                found: inputs[0].kind().to_string(),
            })?;
        let (value, witness) = self.fold(list);
        Ok(Evaluation::new(vec![Value::Bool(value)], Arc::new(witness)))
    }
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(*self)
    }
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::Quantifier { kind: self.kind }
    }
}

/// Positions of the elements that went against the start value, e.g. every
/// `false` element for "for all".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantifierWitness {
    input_length: usize,
    positions: Vec<usize>,
}

impl QuantifierWitness {
    pub fn input_length(&self) -> usize {
        self.input_length
    }
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }
    fn element(designator: &Designator, pos: usize) -> Designator {
        Designator::nest([Part::NthInput(0), Part::NthElement(pos)], designator)
    }
    // Every element supports the result equally.
    fn all_elements(
        &self,
        designator: &Designator,
        root: NodeId,
        factory: &mut NodeFactory<'_>,
    ) -> Vec<NodeId> {
        let and = factory.and_node();
        let mut leaves = Vec::with_capacity(self.input_length);
        for pos in 0..self.input_length {
            let child = factory.object_node(Self::element(designator, pos));
            factory.add_child(and, child, Quality::Exact);
            leaves.push(child);
        }
        factory.add_child(root, and, Quality::Exact);
        leaves
    }
}

impl Witness for QuantifierWitness {
    fn in_arity(&self) -> usize {
        1
    }
    fn answer(
        &self,
        query: Query,
        _output: usize,
        designator: &Designator,
        root: NodeId,
        factory: &mut NodeFactory<'_>,
    ) -> Result<Vec<NodeId>> {
        if !query.is_causality() || self.positions.is_empty() {
            return Ok(self.all_elements(designator, root, factory));
        }
        // Any single offending element is enough to force the result.
        let or = factory.or_node();
        let mut leaves = Vec::with_capacity(self.positions.len());
        for &pos in &self.positions {
            let child = factory.object_node(Self::element(designator, pos));
            factory.add_child(or, child, Quality::Exact);
            leaves.push(child);
        }
        factory.add_child(root, or, Quality::Exact);
        Ok(leaves)
    }
}
