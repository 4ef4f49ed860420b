//! Explanation trees.
//!
//! A tree is an arena of [`Node`]s addressed by [`NodeId`]. Object nodes
//! stand for "this part of what this function handled" and are interned by a
//! [`NodeKeeper`], so two branches reaching the same part of the same
//! function share one node and the tree becomes a DAG. When the underlying
//! circuit is cyclic an edge may even lead back to an ancestor.

use bimap::BiMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::OtherHasher;
use crate::designator::Designator;
use crate::function::FunctionId;
use crate::witness::Quality;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Identity of an object node: a designated part of a function's ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObjectKey {
    pub designator: Designator,
    pub subject: FunctionId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Object(ObjectKey),
    /// All children are jointly necessary.
    And,
    /// Any one child is sufficient.
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub to: NodeId,
    pub quality: Quality,
}

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Edge>,
}

impl Node {
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
    pub fn children(&self) -> &[Edge] {
        &self.children
    }
    pub fn object(&self) -> Option<&ObjectKey> {
        match &self.kind {
            NodeKind::Object(key) => Some(key),
            _ => None,
        }
    }
}

// ------------- NodeKeeper -------------
/// Owns the nodes of one tree build. Object nodes are kept once per
/// (designator, subject); AND/OR nodes are always fresh.
#[derive(Debug)]
pub struct NodeKeeper {
    nodes: Vec<Node>,
    kept: BiMap<ObjectKey, NodeId>,
}

impl NodeKeeper {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            kept: BiMap::new(),
        }
    }
    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            kind,
            children: Vec::new(),
        });
        id
    }
    pub fn keep(&mut self, key: ObjectKey) -> (NodeId, bool) {
        if let Some(id) = self.kept.get_by_left(&key) {
            return (*id, true);
        }
        let id = self.push(NodeKind::Object(key.clone()));
        self.kept.insert(key, id);
        (id, false)
    }
    pub fn and_node(&mut self) -> NodeId {
        self.push(NodeKind::And)
    }
    pub fn or_node(&mut self) -> NodeId {
        self.push(NodeKind::Or)
    }
    /// Adds an edge unless the very same one is already there.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, quality: Quality) {
        let edge = Edge { to: child, quality };
        let children = &mut self.nodes[parent.0].children;
        if !children.contains(&edge) {
            children.push(edge);
        }
    }
    pub fn object(&self, id: NodeId) -> Option<&ObjectKey> {
        self.kept.get_by_right(&id)
    }
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    /// Factory handed to the witness of `subject`.
    pub fn factory(&mut self, subject: FunctionId) -> NodeFactory<'_> {
        NodeFactory {
            keeper: self,
            subject,
        }
    }
    pub fn into_tree(self, root: NodeId) -> Tree {
        Tree {
            root,
            nodes: self.nodes,
        }
    }
}

impl Default for NodeKeeper {
    fn default() -> Self {
        Self::new()
    }
}

/// Node creation on behalf of one function's witness: every object node
/// made through it designates a part of that function.
#[derive(Debug)]
pub struct NodeFactory<'k> {
    keeper: &'k mut NodeKeeper,
    subject: FunctionId,
}

impl NodeFactory<'_> {
    pub fn subject(&self) -> FunctionId {
        self.subject
    }
    pub fn object_node(&mut self, designator: Designator) -> NodeId {
        let key = ObjectKey {
            designator,
            subject: self.subject,
        };
        self.keeper.keep(key).0
    }
    pub fn and_node(&mut self) -> NodeId {
        self.keeper.and_node()
    }
    pub fn or_node(&mut self) -> NodeId {
        self.keeper.or_node()
    }
    pub fn add_child(&mut self, parent: NodeId, child: NodeId, quality: Quality) {
        self.keeper.add_child(parent, child, quality);
    }
    /// Copies everything `scratch` hangs below `from` onto `onto`, passing
    /// the designator of every copied object node through `rename`.
    /// Returns the copies of `leaves`.
    pub fn graft(
        &mut self,
        scratch: &NodeKeeper,
        from: NodeId,
        onto: NodeId,
        leaves: &[NodeId],
        rename: &dyn Fn(&Designator) -> Designator,
    ) -> Vec<NodeId> {
        let mut copies = HashMap::<NodeId, NodeId, OtherHasher>::default();
        copies.insert(from, onto);
        for edge in scratch.node(from).children() {
            let child = self.copy(scratch, edge.to, &mut copies, rename);
            self.add_child(onto, child, edge.quality);
        }
        leaves
            .iter()
            .map(|leaf| self.copy(scratch, *leaf, &mut copies, rename))
            .collect()
    }
    fn copy(
        &mut self,
        scratch: &NodeKeeper,
        id: NodeId,
        copies: &mut HashMap<NodeId, NodeId, OtherHasher>,
        rename: &dyn Fn(&Designator) -> Designator,
    ) -> NodeId {
        if let Some(copy) = copies.get(&id) {
            return *copy;
        }
        let node = scratch.node(id);
        let copy = match node.kind() {
            NodeKind::Object(key) => self.object_node(rename(&key.designator)),
            NodeKind::And => self.and_node(),
            NodeKind::Or => self.or_node(),
        };
        copies.insert(id, copy);
        for edge in node.children() {
            let child = self.copy(scratch, edge.to, copies, rename);
            self.add_child(copy, child, edge.quality);
        }
        copy
    }
}

// ------------- Tree -------------
#[derive(Debug, Clone, Serialize)]
pub struct Tree {
    root: NodeId,
    nodes: Vec<Node>,
}

impl Tree {
    pub fn root(&self) -> NodeId {
        self.root
    }
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
    pub fn len(&self) -> usize {
        self.nodes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
    pub fn children(&self, id: NodeId) -> &[Edge] {
        &self.nodes[id.0].children
    }
    /// Childless nodes reachable from the root, in discovery order.
    pub fn leaves(&self) -> Vec<NodeId> {
        let mut seen = HashSet::<NodeId, OtherHasher>::default();
        let mut stack = vec![self.root];
        let mut leaves = Vec::new();
        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            let children = self.children(id);
            if children.is_empty() {
                leaves.push(id);
            }
            for edge in children.iter().rev() {
                stack.push(edge.to);
            }
        }
        leaves
    }
    /// Every path from the root to a node where it cannot be followed any
    /// further without revisiting itself.
    pub fn leaf_paths(&self) -> Vec<Vec<NodeId>> {
        let mut paths = Vec::new();
        let mut path = vec![self.root];
        self.collect_paths(&mut path, &mut paths);
        paths
    }
    fn collect_paths(&self, path: &mut Vec<NodeId>, paths: &mut Vec<Vec<NodeId>>) {
        let Some(&last) = path.last() else {
            return;
        };
        let mut extended = false;
        for edge in self.children(last) {
            if path.contains(&edge.to) {
                continue;
            }
            extended = true;
            path.push(edge.to);
            self.collect_paths(path, paths);
            path.pop();
        }
        if !extended {
            paths.push(path.clone());
        }
    }
    /// Composed quality of the edges along `path`. `None` when consecutive
    /// nodes are not linked or when the qualities admit no common bound.
    pub fn path_quality(&self, path: &[NodeId]) -> Option<Quality> {
        let mut quality = Quality::Exact;
        for pair in path.windows(2) {
            let edge = self.children(pair[0]).iter().find(|e| e.to == pair[1])?;
            quality = quality.compose(edge.quality)?;
        }
        Some(quality)
    }
}
