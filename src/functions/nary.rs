use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::error::{BreadcrumbError, Result};
use crate::function::{Evaluation, Function, check_arity};
use crate::serial::FunctionSpec;
use crate::value::Value;
use crate::witness::LinkAll;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NaryOp {
    /// Sum of integers.
    Add,
    /// Conjunction of booleans.
    And,
    /// Disjunction of booleans.
    Or,
    /// Concatenation of strings.
    Concat,
}

impl fmt::Display for NaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NaryOp::Add => write!(f, "+"),
            NaryOp::And => write!(f, "∧"),
            NaryOp::Or => write!(f, "∨"),
            NaryOp::Concat => write!(f, "++"),
        }
    }
}

/// Function of several inputs and a single output. Without finer causal
/// knowledge its output is explained by all of its inputs together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nary {
    op: NaryOp,
    arity: usize,
}

impl Nary {
    pub fn new(op: NaryOp, arity: usize) -> Self {
        Self { op, arity }
    }
    pub fn op(&self) -> NaryOp {
        self.op
    }
    fn mismatch(&self, expected: &'static str, found: &Value) -> BreadcrumbError {
        BreadcrumbError::TypeMismatch {
            function: self.name(),
            expected,
            found: found.kind().to_string(),
        }
    }
}

impl Function for Nary {
    fn name(&self) -> String {
        format!("{}/{}", self.op, self.arity)
    }
    fn in_arity(&self) -> usize {
        self.arity
    }
    fn out_arity(&self) -> usize {
        1
    }
    fn evaluate(&self, inputs: &[Value]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let output = match self.op {
            NaryOp::Add => {
                let mut sum: i64 = 0;
                for v in inputs {
                    let i = v.as_int().ok_or_else(|| self.mismatch("int", v))?;
                    sum = sum.checked_add(i).ok_or_else(|| {
                        BreadcrumbError::Overflow(format!("sum in {}", self.name()))
                    })?;
                }
                Value::Int(sum)
            }
            NaryOp::And | NaryOp::Or => {
                let start = self.op == NaryOp::And;
                let mut result = start;
                for v in inputs {
                    let b = v.as_bool().ok_or_else(|| self.mismatch("bool", v))?;
                    result = if start { result && b } else { result || b };
                }
                Value::Bool(result)
            }
            NaryOp::Concat => {
                let mut s = String::new();
                for v in inputs {
                    s += v.as_str().ok_or_else(|| self.mismatch("string", v))?;
                }
                Value::Str(s)
            }
        };
        Ok(Evaluation::new(vec![output], Arc::new(LinkAll::new(self.arity))))
    }
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(*self)
    }
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::Nary {
            op: self.op,
            arity: self.arity,
        }
    }
}
