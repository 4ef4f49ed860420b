//! The explanation-tree builder.
//!
//! Starting from a designated part of one function's output, the builder
//! asks that function's witness for an explanation, then follows every new
//! leaf that names an input port across the wire feeding it, asking the
//! upstream witness in turn. A leaf on an input nothing feeds is an input of
//! the whole circuit and stays a leaf.
//!
//! Object nodes are interned per build: when two branches reach the same
//! part of the same function they share a node, which is expanded once. A
//! node met again while it is still being expanded (a cycle in the circuit)
//! is not expanded a second time.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

use crate::OtherHasher;
use crate::designator::{Designator, Part};
use crate::error::Result;
use crate::function::FunctionId;
use crate::settings::Settings;
use crate::tree::{NodeKeeper, NodeId, ObjectKey, Tree};
use crate::witness::{Quality, Query, Witness};

/// How functions are connected, as far as the builder needs to know.
pub trait Wiring {
    /// Function and output port feeding input `input` of `function`, or
    /// `None` when that input is an input of the whole circuit.
    fn upstream(&self, function: FunctionId, input: usize) -> Option<(FunctionId, usize)>;
    /// Witness of the last evaluation of `function`.
    fn witness(&self, function: FunctionId) -> Option<Arc<dyn Witness>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tracer {
    max_depth: Option<usize>,
}

impl Tracer {
    pub fn new() -> Self {
        Self::default()
    }
    /// Leaves deeper than `max_depth` steps from the root are not expanded.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new().with_max_depth(settings.max_depth)
    }

    /// Builds the tree answering `query` about the part `designator` of
    /// function `root`. The designator starts with the output port, e.g.
    /// `out0/#1`. Every call starts from an empty node keeper.
    pub fn get_tree(
        &self,
        wiring: &dyn Wiring,
        query: Query,
        designator: Designator,
        root: FunctionId,
    ) -> Result<Tree> {
        let mut build = Build {
            wiring,
            query,
            max_depth: self.max_depth,
            keeper: NodeKeeper::new(),
            on_path: HashSet::default(),
            expanded: HashSet::default(),
        };
        let (root_node, _) = build.keeper.keep(ObjectKey {
            designator,
            subject: root,
        });
        build.expand(root_node, 0)?;
        let tree = build.keeper.into_tree(root_node);
        info!(%query, nodes = tree.len(), leaves = tree.leaves().len(), "tree built");
        Ok(tree)
    }
}

struct Build<'w> {
    wiring: &'w dyn Wiring,
    query: Query,
    max_depth: Option<usize>,
    keeper: NodeKeeper,
    on_path: HashSet<NodeId, OtherHasher>,
    expanded: HashSet<NodeId, OtherHasher>,
}

impl Build<'_> {
    fn expand(&mut self, node: NodeId, depth: usize) -> Result<()> {
        if self.on_path.contains(&node) {
            debug!(node = node.index(), "cycle, left unexpanded");
            return Ok(());
        }
        if self.max_depth.is_some_and(|max| depth > max) {
            debug!(node = node.index(), depth, "depth bound reached");
            return Ok(());
        }
        if !self.expanded.insert(node) {
            debug!(node = node.index(), "already expanded");
            return Ok(());
        }
        let Some(key) = self.keeper.object(node).cloned() else {
            return Ok(());
        };
        debug!(node = node.index(), designator = %key.designator, subject = %key.subject, "expanding");
        let leaves = match *key.designator.head() {
            Part::NthOutput(output) => {
                let Some(witness) = self.wiring.witness(key.subject) else {
                    debug!(subject = %key.subject, "no witness, left unexpanded");
                    return Ok(());
                };
                let mut factory = self.keeper.factory(key.subject);
                witness.answer(self.query, output, &key.designator.rest(), node, &mut factory)?
            }
            Part::NthInput(input) => match self.wiring.upstream(key.subject, input) {
                Some((upstream, output)) => {
                    let d = Designator::nest([Part::NthOutput(output)], &key.designator.rest());
                    let (up, _) = self.keeper.keep(ObjectKey {
                        designator: d,
                        subject: upstream,
                    });
                    self.keeper.add_child(node, up, Quality::Exact);
                    vec![up]
                }
                None => return Ok(()),
            },
            _ => return Ok(()),
        };
        self.on_path.insert(node);
        for leaf in leaves {
            self.expand(leaf, depth + 1)?;
        }
        self.on_path.remove(&node);
        Ok(())
    }
}
