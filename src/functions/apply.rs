use std::sync::Arc;

use crate::designator::{Designator, Part};
use crate::error::{BreadcrumbError, Result};
use crate::function::{Evaluation, Function, check_arity};
use crate::serial::FunctionSpec;
use crate::tree::{NodeFactory, NodeId, NodeKeeper, ObjectKey};
use crate::value::Value;
use crate::witness::{Quality, Query, Witness, link_all_inputs};

/// Applies a unary template function to every element of a list.
///
/// Each element gets its own stateless duplicate of the template, so the
/// evaluations never share a witness.
#[derive(Debug)]
pub struct ApplyToAll {
    template: Box<dyn Function>,
}

impl ApplyToAll {
    pub fn new(template: Box<dyn Function>) -> Result<Self> {
        for arity in [template.in_arity(), template.out_arity()] {
            if arity != 1 {
                return Err(BreadcrumbError::InvalidArity {
                    function: template.name(),
                    expected: 1,
                    actual: arity,
                });
            }
        }
        Ok(Self { template })
    }
    pub fn template(&self) -> &dyn Function {
        self.template.as_ref()
    }
}

impl Function for ApplyToAll {
    fn name(&self) -> String {
        format!("ApplyToAll({})", self.template.name())
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
        let mut outputs = Vec::with_capacity(list.len());
        let mut elements = Vec::with_capacity(list.len());
        for element in list {
            let evaluation = self
                .template
                .duplicate()
                .evaluate(std::slice::from_ref(element))?;
            outputs.extend(evaluation.outputs);
            elements.push(evaluation.witness);
        }
        let witness = ApplyWitness { elements };
        Ok(Evaluation::new(vec![Value::List(outputs)], Arc::new(witness)))
    }
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(Self {
            template: self.template.duplicate(),
        })
    }
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::ApplyToAll {
            template: Box::new(self.template.spec()),
        }
    }
}

/// One witness per list element, in order. Questions about element `k`
/// are answered by the witness of that element.
#[derive(Debug, Clone)]
pub struct ApplyWitness {
    elements: Vec<Arc<dyn Witness>>,
}

impl Witness for ApplyWitness {
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
        let k = match *designator.head() {
            Part::Identity => {
                let child = factory.object_node(Designator::compose([Part::NthInput(0)]));
                factory.add_child(root, child, Quality::Exact);
                return Ok(vec![child]);
            }
            Part::NthElement(k) if k < self.elements.len() => k,
            _ => return Ok(link_all_inputs(1, root, factory)),
        };
        // Ask the witness of element k, then move its explanation from the
        // template's input to element k of our input.
        let mut scratch = NodeKeeper::new();
        let (element_root, _) = scratch.keep(ObjectKey {
            designator: Designator::compose([Part::NthOutput(0)]),
            subject: factory.subject(),
        });
        let leaves = {
            let mut inner = scratch.factory(factory.subject());
            self.elements[k].answer(query, 0, &designator.rest(), element_root, &mut inner)?
        };
        let rename = |d: &Designator| match d.head() {
            Part::NthInput(_) => Designator::nest([Part::NthInput(0), Part::NthElement(k)], &d.rest()),
            _ => Designator::nest([Part::NthInput(0), Part::NthElement(k)], d),
        };
        Ok(factory.graft(&scratch, element_root, root, &leaves, &rename))
    }
}
