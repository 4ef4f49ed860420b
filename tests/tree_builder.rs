use std::sync::Arc;

use breadcrumb::functions::{ApplyToAll, Fork, Nary, NaryOp, Quantifier, RegexFind};
use breadcrumb::{
    Circuit, FunctionId, LinkAll, NodeKind, Quality, Query, Tracer, Tree, Value, Wiring, Witness,
};

// fork(5) feeding both inputs of add
fn fork_add() -> (Circuit, FunctionId, FunctionId) {
    let mut circuit = Circuit::new();
    let fork = circuit.add(Box::new(Fork::new(2)));
    let add = circuit.add(Box::new(Nary::new(NaryOp::Add, 2)));
    circuit.connect(fork, 0, add, 0).unwrap();
    circuit.connect(fork, 1, add, 1).unwrap();
    circuit.feed(fork, 0, Value::Int(5)).unwrap();
    (circuit, fork, add)
}

fn object(tree: &Tree, id: breadcrumb::NodeId) -> (String, FunctionId) {
    let key = tree.node(id).object().unwrap();
    (key.designator.to_string(), key.subject)
}

#[test]
fn converging_branches_share_a_node() {
    let (mut circuit, fork, add) = fork_add();
    assert_eq!(circuit.evaluate(add).unwrap(), vec![Value::Int(10)]);
    let tree = Tracer::new()
        .get_tree(&circuit, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    // out0@add, AND, in0@add, in1@add, out0@fork, out1@fork, in0@fork
    assert_eq!(tree.len(), 7);
    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(object(&tree, leaves[0]), ("in0".to_string(), fork));
    let paths = tree.leaf_paths();
    assert_eq!(paths.len(), 2);
    for path in &paths {
        assert_eq!(path.len(), 5);
        assert_eq!(path.last(), Some(&leaves[0]));
        assert_eq!(tree.path_quality(path), Some(Quality::Exact));
    }
}

#[test]
fn depth_bound_stops_expansion() {
    let (mut circuit, fork, add) = fork_add();
    circuit.evaluate(add).unwrap();
    let tree = Tracer::new()
        .with_max_depth(Some(1))
        .get_tree(&circuit, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    assert_eq!(tree.len(), 6);
    let leaves: Vec<_> = tree.leaves().iter().map(|id| object(&tree, *id)).collect();
    assert_eq!(
        leaves,
        vec![("out0".to_string(), fork), ("out1".to_string(), fork)]
    );
}

#[test]
fn every_build_starts_afresh() {
    let (mut circuit, _, add) = fork_add();
    circuit.evaluate(add).unwrap();
    let tracer = Tracer::new();
    let first = tracer
        .get_tree(&circuit, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    let second = tracer
        .get_tree(&circuit, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    assert_eq!(first.len(), second.len());
    assert_eq!(first.root(), second.root());
    assert_eq!(first.leaves(), second.leaves());
}

// A single function whose only input is fed by its own output.
#[derive(Debug)]
struct Loop;

impl Wiring for Loop {
    fn upstream(&self, function: FunctionId, input: usize) -> Option<(FunctionId, usize)> {
        (input == 0).then_some((function, 0))
    }
    fn witness(&self, _function: FunctionId) -> Option<Arc<dyn Witness>> {
        Some(Arc::new(LinkAll::new(1)))
    }
}

#[test]
fn cycle_is_not_expanded_twice() {
    let tree = Tracer::new()
        .get_tree(&Loop, Query::Provenance, "out0".parse().unwrap(), FunctionId(0))
        .unwrap();
    // out0, AND, in0, and in0 leads back to out0
    assert_eq!(tree.len(), 3);
    let and = tree.children(tree.root())[0].to;
    assert_eq!(*tree.node(and).kind(), NodeKind::And);
    let input = tree.children(and)[0].to;
    assert_eq!(object(&tree, input).0, "in0");
    assert_eq!(tree.children(input)[0].to, tree.root());
    assert!(tree.leaves().is_empty());
    assert_eq!(tree.leaf_paths(), vec![vec![tree.root(), and, input]]);
}

#[test]
fn unevaluated_function_stays_a_leaf() {
    let (circuit, _, add) = fork_add();
    let tree = Tracer::new()
        .get_tree(&circuit, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.leaves(), vec![tree.root()]);
}

#[test]
fn duplicate_keeps_or_drops_witnesses() {
    let (mut circuit, _, add) = fork_add();
    circuit.evaluate(add).unwrap();
    let tracer = Tracer::new();
    let kept = circuit.duplicate(true);
    let tree = tracer
        .get_tree(&kept, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    assert_eq!(tree.len(), 7);
    let fresh = circuit.duplicate(false);
    let tree = tracer
        .get_tree(&fresh, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    assert_eq!(tree.len(), 1);
}

#[test]
fn regex_range_survives_a_fork() {
    let mut circuit = Circuit::new();
    let find = circuit.add(Box::new(RegexFind::new("b+").unwrap()));
    let fork = circuit.add(Box::new(Fork::new(1)));
    circuit.connect(find, 0, fork, 0).unwrap();
    circuit.feed(find, 0, Value::from("aabbbcc")).unwrap();
    assert_eq!(circuit.evaluate(fork).unwrap(), vec![Value::from("bbb")]);
    let tree = Tracer::new()
        .get_tree(&circuit, Query::Provenance, "out0/I0-1".parse().unwrap(), fork)
        .unwrap();
    let leaves = tree.leaves();
    assert_eq!(leaves.len(), 1);
    assert_eq!(object(&tree, leaves[0]), ("in0/I2-4".to_string(), find));
    let paths = tree.leaf_paths();
    assert_eq!(tree.path_quality(&paths[0]), Some(Quality::Over));
}

#[test]
fn apply_to_all_points_at_the_element() {
    let mut circuit = Circuit::new();
    let apply = circuit.add(Box::new(
        ApplyToAll::new(Box::new(RegexFind::new("b+").unwrap())).unwrap(),
    ));
    circuit
        .feed(apply, 0, Value::from(vec!["abba", "bob", "cab"]))
        .unwrap();
    assert_eq!(
        circuit.evaluate(apply).unwrap(),
        vec![Value::from(vec!["bb", "b", "b"])]
    );
    let tracer = Tracer::new();
    let leaf = |designator: &str| {
        let tree = tracer
            .get_tree(&circuit, Query::Provenance, designator.parse().unwrap(), apply)
            .unwrap();
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 1, "{designator}");
        let quality = tree.path_quality(&tree.leaf_paths()[0]);
        (object(&tree, leaves[0]).0, quality)
    };
    // each element is answered with the match recorded for it
    assert_eq!(leaf("out0/#0"), ("in0/#0/I1-2".to_string(), Some(Quality::Over)));
    assert_eq!(leaf("out0/#1"), ("in0/#1/I0".to_string(), Some(Quality::Over)));
    assert_eq!(leaf("out0/#2"), ("in0/#2/I2".to_string(), Some(Quality::Over)));
    assert_eq!(leaf("out0/#1/I0"), ("in0/#1/I0-1".to_string(), Some(Quality::Over)));
    assert_eq!(leaf("out0"), ("in0".to_string(), Some(Quality::Exact)));
    assert_eq!(leaf("out0/#7"), ("in0".to_string(), Some(Quality::Exact)));
}

#[test]
fn apply_to_all_follows_the_element_witness() {
    let mut circuit = Circuit::new();
    let apply = circuit.add(Box::new(ApplyToAll::new(Box::new(Quantifier::for_all())).unwrap()));
    circuit
        .feed(
            apply,
            0,
            Value::from(vec![vec![true, false, false], vec![true, true]]),
        )
        .unwrap();
    assert_eq!(
        circuit.evaluate(apply).unwrap(),
        vec![Value::from(vec![false, true])]
    );
    let tracer = Tracer::new();
    let tree = tracer
        .get_tree(&circuit, Query::Causality, "out0/#0".parse().unwrap(), apply)
        .unwrap();
    let leaves: Vec<_> = tree.leaves().iter().map(|id| object(&tree, *id).0).collect();
    assert_eq!(leaves, vec!["in0/#0/#1", "in0/#0/#2"]);
    let or = tree.children(tree.root())[0].to;
    assert_eq!(*tree.node(or).kind(), NodeKind::Or);

    let tree = tracer
        .get_tree(&circuit, Query::Causality, "out0/#1".parse().unwrap(), apply)
        .unwrap();
    let leaves: Vec<_> = tree.leaves().iter().map(|id| object(&tree, *id).0).collect();
    assert_eq!(leaves, vec!["in0/#1/#0", "in0/#1/#1"]);
}

#[test]
fn quality_composition() {
    use Quality::*;
    assert_eq!(Exact.compose(Exact), Some(Exact));
    assert_eq!(Exact.compose(Over), Some(Over));
    assert_eq!(Under.compose(Exact), Some(Under));
    assert_eq!(Over.compose(Over), Some(Over));
    assert_eq!(Under.compose(Under), Some(Under));
    assert_eq!(Over.compose(Under), None);
    assert_eq!(Under.compose(Over), None);
}

#[test]
fn tree_serializes() {
    let (mut circuit, _, add) = fork_add();
    circuit.evaluate(add).unwrap();
    let tree = Tracer::new()
        .get_tree(&circuit, Query::Provenance, "out0".parse().unwrap(), add)
        .unwrap();
    let json = serde_json::to_value(&tree).unwrap();
    assert_eq!(json["nodes"].as_array().map(Vec::len), Some(7));
}
