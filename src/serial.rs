//! Printed form of function configurations.
//!
//! Every function can be printed as a [`FunctionSpec`] and rebuilt from it;
//! the JSON form goes through `serde_json`. Only configuration is printed,
//! never witnesses: a rebuilt function has not been evaluated yet.

use serde::{Deserialize, Serialize};

use crate::error::{BreadcrumbError, Result};
use crate::function::Function;
use crate::functions::{ApplyToAll, Fork, Nary, NaryOp, Quantifier, QuantifierKind, RegexFind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "function")]
pub enum FunctionSpec {
    RegexFind { pattern: String },
    Quantifier { kind: QuantifierKind },
    Nary { op: NaryOp, arity: usize },
    Fork { arity: usize },
    ApplyToAll { template: Box<FunctionSpec> },
}

impl FunctionSpec {
    pub fn build(&self) -> Result<Box<dyn Function>> {
        Ok(match self {
            FunctionSpec::RegexFind { pattern } => Box::new(RegexFind::new(pattern)?),
            FunctionSpec::Quantifier { kind } => Box::new(Quantifier::new(*kind)),
            FunctionSpec::Nary { op, arity } => Box::new(Nary::new(*op, *arity)),
            FunctionSpec::Fork { arity } => Box::new(Fork::new(*arity)),
            FunctionSpec::ApplyToAll { template } => Box::new(ApplyToAll::new(template.build()?)?),
        })
    }
}

pub fn print_function(function: &dyn Function) -> Result<String> {
    Ok(serde_json::to_string(&function.spec())?)
}

/// Rebuilds a function from its printed form. Anything that prevents it,
/// including a configuration that parses but cannot be built, is a
/// [`BreadcrumbError::Read`].
pub fn read_function(printed: &str) -> Result<Box<dyn Function>> {
    let spec: FunctionSpec = serde_json::from_str(printed)?;
    spec.build().map_err(|e| match e {
        BreadcrumbError::Read(_) => e,
        other => BreadcrumbError::Read(other.to_string()),
    })
}
