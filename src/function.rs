//! Functions and their evaluations.
//!
//! A [`Function`] is immutable configuration (a compiled pattern, an
//! operator, a template) plus pure evaluation logic. Each call to
//! [`Function::evaluate`] hands back the outputs together with a fresh
//! [`Witness`] for exactly that call. The only per-call state that lives
//! beyond the call is held by an [`Instance`], which remembers the last
//! witness of the function it owns.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

use crate::error::{BreadcrumbError, Result};
use crate::serial::FunctionSpec;
use crate::value::Value;
use crate::witness::Witness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FunctionId(pub usize);

impl fmt::Display for FunctionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// Outcome of one evaluation.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub outputs: Vec<Value>,
    pub witness: Arc<dyn Witness>,
}

impl Evaluation {
    pub fn new(outputs: Vec<Value>, witness: Arc<dyn Witness>) -> Self {
        Self { outputs, witness }
    }
}

pub trait Function: fmt::Debug + Send + Sync {
    fn name(&self) -> String;
    fn in_arity(&self) -> usize;
    fn out_arity(&self) -> usize;
    /// Computes the outputs for `inputs`, failing with
    /// [`BreadcrumbError::InvalidArity`] on the wrong number of inputs.
    fn evaluate(&self, inputs: &[Value]) -> Result<Evaluation>;
    /// A fresh copy of the configuration, sharing nothing mutable.
    fn duplicate(&self) -> Box<dyn Function>;
    /// Printed form of the configuration.
    fn spec(&self) -> FunctionSpec;
}

pub fn check_arity(function: &dyn Function, inputs: &[Value]) -> Result<()> {
    if inputs.len() != function.in_arity() {
        return Err(BreadcrumbError::InvalidArity {
            function: function.name(),
            expected: function.in_arity(),
            actual: inputs.len(),
        });
    }
    Ok(())
}

/// A function together with the witness of its last evaluation.
#[derive(Debug)]
pub struct Instance {
    function: Box<dyn Function>,
    last: Option<Arc<dyn Witness>>,
}

impl Instance {
    pub fn new(function: Box<dyn Function>) -> Self {
        Self {
            function,
            last: None,
        }
    }
    pub fn function(&self) -> &dyn Function {
        self.function.as_ref()
    }
    pub fn witness(&self) -> Option<Arc<dyn Witness>> {
        self.last.as_ref().map(Arc::clone)
    }
    pub fn evaluate(&mut self, inputs: &[Value]) -> Result<Vec<Value>> {
        let evaluation = self.function.evaluate(inputs)?;
        if evaluation.outputs.len() != self.function.out_arity() {
            return Err(BreadcrumbError::InvalidArity {
                function: self.function.name(),
                expected: self.function.out_arity(),
                actual: evaluation.outputs.len(),
            });
        }
        self.last = Some(evaluation.witness);
        Ok(evaluation.outputs)
    }
    /// Copy of this instance. With `preserve_state` the copy keeps the last
    /// witness, so it can replay the trace of that evaluation; without it
    /// the copy starts out as if it had never been evaluated.
    pub fn duplicate(&self, preserve_state: bool) -> Instance {
        Instance {
            function: self.function.duplicate(),
            last: if preserve_state { self.witness() } else { None },
        }
    }
}
