//! # Construction Benchmarks
//!
//! Performance benchmarks for aif-core builders and dumps.
//!
//! Run with: `cargo bench -p aif-core`

use aif_core::{Graph, GraphStore, NTriples, NodeId, System, Turtle};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

/// Build a graph of `size` typed entities, each justified by a text span.
fn create_annotated_graph(size: usize) -> Graph {
    let mut graph = Graph::new();
    aif_core::add_standard_namespaces(&mut graph).expect("namespaces");
    let system = aif_core::make_system_with_uri(&mut graph, "http://ex.org/system")
        .expect("system");
    let person = graph.iri("http://ex.org/ontology#Person").expect("type");

    for i in 0..size {
        let entity = aif_core::make_entity(&mut graph, system, &format!("http://ex.org/e{i}"))
            .expect("entity");
        aif_core::mark_type(&mut graph, system, entity, person, Some(0.9), None).expect("type");
        aif_core::mark_text_justification(&mut graph, system, &[entity], "doc", 0, i as i32, 0.8)
            .expect("justification");
    }
    graph
}

fn entity_cluster(graph: &mut Graph, system: System, size: usize) -> Vec<NodeId> {
    (0..size)
        .map(|i| {
            aif_core::make_entity(graph, system, &format!("http://ex.org/m{i}")).expect("entity")
        })
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_annotated_entities(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotated_entities");

    for size in [100, 1000, 5000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| black_box(create_annotated_graph(size)));
        });
    }

    group.finish();
}

fn bench_cluster_membership(c: &mut Criterion) {
    let mut group = c.benchmark_group("cluster_membership");

    for size in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let mut graph = Graph::new();
                let system = aif_core::make_system_with_uri(&mut graph, "http://ex.org/system")
                    .expect("system");
                let members = entity_cluster(&mut graph, system, size);
                let cluster = aif_core::make_cluster_with_prototype(
                    &mut graph,
                    system,
                    "http://ex.org/cluster",
                    members[0],
                )
                .expect("cluster");
                for &member in &members[1..] {
                    let _ = aif_core::mark_as_possible_cluster_member(
                        &mut graph, system, member, cluster, 0.5,
                    );
                }
                black_box(graph)
            });
        });
    }

    group.finish();
}

fn bench_dumps(c: &mut Criterion) {
    let mut group = c.benchmark_group("dumps");

    for size in [100, 1000].iter() {
        let graph = create_annotated_graph(*size);

        group.bench_with_input(BenchmarkId::new("ntriples", size), size, |b, _| {
            b.iter(|| black_box(NTriples::to_string(&graph)));
        });
        group.bench_with_input(BenchmarkId::new("turtle", size), size, |b, _| {
            b.iter(|| black_box(Turtle::to_string(&graph)));
        });
    }

    group.finish();
}

fn bench_audit(c: &mut Criterion) {
    let mut group = c.benchmark_group("audit");

    for size in [100, 1000].iter() {
        let graph = create_annotated_graph(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(aif_core::audit_graph(&graph)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_annotated_entities,
    bench_cluster_membership,
    bench_dumps,
    bench_audit
);
criterion_main!(benches);
