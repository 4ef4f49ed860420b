//! A minimal circuit of function instances.
//!
//! Functions are added to the circuit, wired output-to-input, and the
//! remaining inputs are fed constant values. Evaluating a function pulls
//! the values it needs from upstream, evaluating each function at most once
//! per call. The circuit keeps the witness of every evaluation it ran and
//! exposes the wiring to the [`Tracer`](crate::tracer::Tracer).

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

use crate::OtherHasher;
use crate::error::{BreadcrumbError, Result};
use crate::function::{Function, FunctionId, Instance};
use crate::tracer::Wiring;
use crate::value::Value;
use crate::witness::Witness;

type Port = (FunctionId, usize);

#[derive(Debug, Default)]
pub struct Circuit {
    instances: Vec<Instance>,
    // (function, input) -> (function, output) feeding it
    wires: HashMap<Port, Port, OtherHasher>,
    fed: HashMap<Port, Value, OtherHasher>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn add(&mut self, function: Box<dyn Function>) -> FunctionId {
        self.instances.push(Instance::new(function));
        FunctionId(self.instances.len() - 1)
    }
    pub fn instance(&self, id: FunctionId) -> Result<&Instance> {
        self.instances
            .get(id.0)
            .ok_or_else(|| BreadcrumbError::Wiring(format!("unknown function {id}")))
    }
    pub fn len(&self) -> usize {
        self.instances.len()
    }
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
    fn check_input(&self, to: FunctionId, input: usize) -> Result<()> {
        let arity = self.instance(to)?.function().in_arity();
        if input >= arity {
            return Err(BreadcrumbError::Wiring(format!(
                "{to} has {arity} inputs, no input {input}"
            )));
        }
        Ok(())
    }
    /// Feeds output `output` of `from` into input `input` of `to`,
    /// replacing whatever fed that input before.
    pub fn connect(&mut self, from: FunctionId, output: usize, to: FunctionId, input: usize) -> Result<()> {
        let arity = self.instance(from)?.function().out_arity();
        if output >= arity {
            return Err(BreadcrumbError::Wiring(format!(
                "{from} has {arity} outputs, no output {output}"
            )));
        }
        self.check_input(to, input)?;
        self.fed.remove(&(to, input));
        self.wires.insert((to, input), (from, output));
        Ok(())
    }
    /// Makes input `input` of `to` an input of the circuit holding `value`.
    pub fn feed(&mut self, to: FunctionId, input: usize, value: Value) -> Result<()> {
        self.check_input(to, input)?;
        self.wires.remove(&(to, input));
        self.fed.insert((to, input), value);
        Ok(())
    }
    /// Outputs of `target`, evaluating everything upstream of it.
    pub fn evaluate(&mut self, target: FunctionId) -> Result<Vec<Value>> {
        let mut done = HashMap::<FunctionId, Vec<Value>, OtherHasher>::default();
        let mut visiting = HashSet::<FunctionId, OtherHasher>::default();
        self.pull(target, &mut done, &mut visiting)
    }
    fn pull(
        &mut self,
        id: FunctionId,
        done: &mut HashMap<FunctionId, Vec<Value>, OtherHasher>,
        visiting: &mut HashSet<FunctionId, OtherHasher>,
    ) -> Result<Vec<Value>> {
        if let Some(outputs) = done.get(&id) {
            return Ok(outputs.clone());
        }
        if !visiting.insert(id) {
            return Err(BreadcrumbError::Wiring(format!("{id} depends on its own output")));
        }
        let arity = self.instance(id)?.function().in_arity();
        let mut inputs = Vec::with_capacity(arity);
        for input in 0..arity {
            let fed = self.fed.get(&(id, input)).cloned();
            let wire = self.wires.get(&(id, input)).copied();
            let value = match (fed, wire) {
                (Some(value), _) => value,
                (None, Some((from, output))) => {
                    let outputs = self.pull(from, done, visiting)?;
                    outputs.get(output).cloned().ok_or_else(|| {
                        BreadcrumbError::Wiring(format!("{from} produced no output {output}"))
                    })?
                }
                (None, None) => {
                    return Err(BreadcrumbError::Wiring(format!(
                        "input {input} of {id} is not connected"
                    )));
                }
            };
            inputs.push(value);
        }
        let instance = &mut self.instances[id.0];
        let outputs = instance.evaluate(&inputs)?;
        debug!(function = %id, name = %instance.function().name(), "evaluated");
        visiting.remove(&id);
        done.insert(id, outputs.clone());
        Ok(outputs)
    }
    /// Copy of the circuit with the same wiring and fed values. With
    /// `preserve_state` every instance keeps its last witness.
    pub fn duplicate(&self, preserve_state: bool) -> Circuit {
        Circuit {
            instances: self
                .instances
                .iter()
                .map(|i| i.duplicate(preserve_state))
                .collect(),
            wires: self.wires.clone(),
            fed: self.fed.clone(),
        }
    }
}

impl Wiring for Circuit {
    fn upstream(&self, function: FunctionId, input: usize) -> Option<(FunctionId, usize)> {
        self.wires.get(&(function, input)).copied()
    }
    fn witness(&self, function: FunctionId) -> Option<Arc<dyn Witness>> {
        self.instances.get(function.0).and_then(Instance::witness)
    }
}
