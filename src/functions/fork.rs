use std::sync::Arc;

use crate::designator::{Designator, Part};
use crate::error::Result;
use crate::function::{Evaluation, Function, check_arity};
use crate::serial::FunctionSpec;
use crate::tree::{NodeFactory, NodeId};
use crate::value::Value;
use crate::witness::{Quality, Query, Witness};

/// Copies its single input to each of its outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fork {
    arity: usize,
}

impl Fork {
    pub fn new(arity: usize) -> Self {
        Self { arity }
    }
}

impl Function for Fork {
    fn name(&self) -> String {
        format!("Fork/{}", self.arity)
    }
    fn in_arity(&self) -> usize {
        1
    }
    fn out_arity(&self) -> usize {
        self.arity
    }
    fn evaluate(&self, inputs: &[Value]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let outputs = vec![inputs[0].clone(); self.arity];
        Ok(Evaluation::new(outputs, Arc::new(ForkWitness)))
    }
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(*self)
    }
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::Fork { arity: self.arity }
    }
}

/// Every output is the input: whatever is designated in an output is the
/// same part of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForkWitness;

impl Witness for ForkWitness {
    fn in_arity(&self) -> usize {
        1
    }
    fn answer(
        &self,
        _query: Query,
        _output: usize,
        designator: &Designator,
        root: NodeId,
        factory: &mut NodeFactory<'_>,
    ) -> Result<Vec<NodeId>> {
        let child = factory.object_node(Designator::nest([Part::NthInput(0)], designator));
        factory.add_child(root, child, Quality::Exact);
        Ok(vec![child])
    }
}
