use regex::Regex;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::designator::{Designator, Part, Range};
use crate::error::{BreadcrumbError, Result};
use crate::function::{Evaluation, Function, check_arity};
use crate::serial::FunctionSpec;
use crate::tree::{NodeFactory, NodeId};
use crate::value::Value;
use crate::witness::{LinkAll, Quality, Query, Witness, link_all_inputs};

/// Extracts the first match of a pattern from a string, or the empty
/// string when there is none.
///
/// Positions recorded by the witness are character positions, not byte
/// offsets, so they line up with the [`Range`]s of designators.
#[derive(Debug, Clone)]
pub struct RegexFind {
    pattern: Regex,
    // shared by every evaluation that finds nothing
    not_found: Arc<LinkAll>,
}

impl RegexFind {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            not_found: Arc::new(LinkAll::new(1)),
        })
    }
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
    /// The matched substring, and where it was found if anywhere.
    pub fn find(&self, s: &str) -> (String, Option<RegexFound>) {
        let Some(m) = self.pattern.find(s) else {
            trace!(pattern = %self.pattern, input = s, "no match");
            return (String::new(), None);
        };
        if m.as_str().is_empty() {
            // nothing to point at in the input
            trace!(pattern = %self.pattern, input = s, "empty match");
            return (String::new(), None);
        }
        let start = s[..m.start()].chars().count() as i64;
        let matched = m.as_str().to_string();
        let end = start + matched.chars().count() as i64 - 1;
        let length = s.chars().count() as i64;
        trace!(pattern = %self.pattern, start, end, length, "match");
        (matched, Some(RegexFound { start, end, length }))
    }
}

impl Function for RegexFind {
    fn name(&self) -> String {
        format!("Find /{}/", self.pattern)
    }
    fn in_arity(&self) -> usize {
        1
    }
    fn out_arity(&self) -> usize {
        1
    }
    fn evaluate(&self, inputs: &[Value]) -> Result<Evaluation> {
        check_arity(self, inputs)?;
        let s = inputs[0]
            .as_str()
            .ok_or_else(|| BreadcrumbError::TypeMismatch {
                function: self.name(),
                expected: "string",
                found: inputs[0].kind().to_string(),
            })?;
        let (matched, found) = self.find(s);
        let witness: Arc<dyn Witness> = match found {
            Some(found) => Arc::new(found),
            None => Arc::clone(&self.not_found) as Arc<dyn Witness>,
        };
        Ok(Evaluation::new(vec![Value::Str(matched)], witness))
    }
    fn duplicate(&self) -> Box<dyn Function> {
        Box::new(self.clone())
    }
    fn spec(&self) -> FunctionSpec {
        FunctionSpec::RegexFind {
            pattern: self.pattern.as_str().to_string(),
        }
    }
}

/// Where the pattern matched: first and last character (inclusive) and the
/// length of the whole input string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegexFound {
    start: i64,
    end: i64,
    length: i64,
}

impl RegexFound {
    pub fn start(&self) -> i64 {
        self.start
    }
    pub fn end(&self) -> i64 {
        self.end
    }
    pub fn length(&self) -> i64 {
        self.length
    }
    /// Input range a designated part of the output came from. Offsets and
    /// lengths are clamped to the recorded input length.
    fn input_range(&self, head: &Part) -> Result<Option<Range>> {
        match head {
            Part::Range(r) => {
                let offset = self.start.min(self.length);
                let len = r.length()?.min(self.length);
                let overflow = || BreadcrumbError::Overflow(format!("{r} shifted by {offset}"));
                let start = r.start().checked_add(offset).ok_or_else(overflow)?;
                let end = offset.checked_add(len).ok_or_else(overflow)?;
                Range::new(start, end).map(Some)
            }
            Part::Identity => {
                Range::new(self.start.min(self.length), self.end.min(self.length)).map(Some)
            }
            _ => Ok(None),
        }
    }
}

impl Witness for RegexFound {
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
        let range = match self.input_range(designator.head()) {
            Ok(Some(range)) => range,
            Ok(None) => return Ok(link_all_inputs(1, root, factory)),
            Err(e) => {
                debug!(error = %e, designator = %designator, "range not mappable, linking the whole input");
                return Ok(link_all_inputs(1, root, factory));
            }
        };
        let d = Designator::nest([Part::NthInput(0), Part::Range(range)], &designator.rest());
        let child = factory.object_node(d);
        // A match does not pin down which input character caused which output one.
        factory.add_child(root, child, Quality::Over);
        Ok(vec![child])
    }
}
