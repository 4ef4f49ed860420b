use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use breadcrumb::functions::{Fork, Nary, NaryOp, Quantifier, RegexFind};
use breadcrumb::{Circuit, Designator, FunctionId, Query, Tracer, Value};

// A chain of diamonds: every fork feeds both inputs of the next add.
fn diamonds(layers: usize) -> (Circuit, FunctionId) {
    let mut circuit = Circuit::new();
    let mut last = circuit.add(Box::new(Fork::new(2)));
    circuit.feed(last, 0, Value::Int(1)).unwrap();
    for _ in 0..layers {
        let add = circuit.add(Box::new(Nary::new(NaryOp::Add, 2)));
        circuit.connect(last, 0, add, 0).unwrap();
        circuit.connect(last, 1, add, 1).unwrap();
        let fork = circuit.add(Box::new(Fork::new(2)));
        circuit.connect(add, 0, fork, 0).unwrap();
        last = fork;
    }
    circuit.evaluate(last).unwrap();
    (circuit, last)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let tracer = Tracer::new();
    let out0: Designator = "out0".parse().unwrap();
    for layers in [1, 10, 100] {
        let (circuit, last) = diamonds(layers);
        c.bench_function(&format!("diamonds {layers}"), |b| {
            b.iter(|| {
                tracer
                    .get_tree(&circuit, Query::Provenance, black_box(out0.clone()), last)
                    .unwrap()
            })
        });
    }

    let mut circuit = Circuit::new();
    let find = circuit.add(Box::new(RegexFind::new("b+").unwrap()));
    circuit
        .feed(find, 0, Value::from("a".repeat(1000) + &"b".repeat(1000)))
        .unwrap();
    circuit.evaluate(find).unwrap();
    let range: Designator = "out0/I10-500".parse().unwrap();
    c.bench_function("regex range", |b| {
        b.iter(|| {
            tracer
                .get_tree(&circuit, Query::Provenance, black_box(range.clone()), find)
                .unwrap()
        })
    });

    let mut circuit = Circuit::new();
    let all = circuit.add(Box::new(Quantifier::for_all()));
    let list: Vec<bool> = (0..10_000).map(|n| n % 7 != 0).collect();
    circuit.feed(all, 0, Value::from(list)).unwrap();
    circuit.evaluate(all).unwrap();
    c.bench_function("forall causality 10k", |b| {
        b.iter(|| {
            tracer
                .get_tree(&circuit, Query::Causality, black_box(out0.clone()), all)
                .unwrap()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
