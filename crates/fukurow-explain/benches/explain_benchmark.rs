use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fukurow_core::model::{Axiom, Individual, OwlIri, PropertyExpression};
use fukurow_dl::OwlDlReasoner;
use fukurow_explain::{Deduplicator, ExplainConfig, ExplanationEngine, QueryTarget, Tagger};
use fukurow_store::MemoryStatementStore;

fn iri(name: String) -> OwlIri {
    OwlIri::new(format!("http://example.org/bench#{}", name))
}

/// Subclass chain of `size` classes with one member at the bottom, and a
/// transitive property linking `size` individuals in sequence
fn create_test_store(size: usize) -> MemoryStatementStore {
    let precedes = iri("precedes".to_string());
    let mut axioms = vec![Axiom::TransitiveProperty(PropertyExpression::ObjectProperty(precedes.clone()))];

    for i in 0..size {
        let individual = Individual(iri(format!("ind{}", i)));
        if i > 0 {
            axioms.push(Axiom::subclass(&iri(format!("Class{}", i)), &iri(format!("Class{}", i - 1))));
            let previous = Individual(iri(format!("ind{}", i - 1)));
            axioms.push(Axiom::property_assertion(&precedes, &previous, &individual));
        }
    }
    axioms.push(Axiom::class_assertion(
        &iri(format!("Class{}", size - 1)),
        &Individual(iri("bottom".to_string())),
    ));

    MemoryStatementStore::from_axioms(axioms)
}

fn benchmark_class_membership(c: &mut Criterion) {
    for size in [4, 8] {
        let store = create_test_store(size);
        let kb = OwlDlReasoner::new().materialize(&store).unwrap();
        let engine = ExplanationEngine::new(&store, &kb);
        let target = QueryTarget::class_membership(&Individual(iri("bottom".to_string())), &iri("Class0".to_string()));

        c.bench_function(&format!("explain_class_membership_{}_classes", size), |b| {
            b.iter(|| black_box(engine.explain(black_box(&target))))
        });
    }
}

fn benchmark_transitive(c: &mut Criterion) {
    let store = create_test_store(8);
    let kb = OwlDlReasoner::new().materialize(&store).unwrap();
    let target = QueryTarget::property_assertion(
        &Individual(iri("ind0".to_string())),
        &iri("precedes".to_string()),
        &Individual(iri("ind3".to_string())),
    );

    let sequential = ExplanationEngine::new(&store, &kb);
    c.bench_function("explain_transitive_sequential", |b| {
        b.iter(|| black_box(sequential.explain(black_box(&target))))
    });

    let config = ExplainConfig { parallel: true, ..ExplainConfig::default() };
    let parallel = ExplanationEngine::with_config(&store, &kb, config).unwrap();
    c.bench_function("explain_transitive_parallel", |b| {
        b.iter(|| black_box(parallel.explain(black_box(&target))))
    });
}

fn benchmark_dedup_and_tagging(c: &mut Criterion) {
    let store = create_test_store(8);
    let kb = OwlDlReasoner::new().materialize(&store).unwrap();
    let engine = ExplanationEngine::new(&store, &kb);
    let target = QueryTarget::class_membership(&Individual(iri("bottom".to_string())), &iri("Class0".to_string()));
    let paths = engine.explain(&target);
    let doubled: Vec<_> = paths.iter().chain(paths.iter()).cloned().collect();
    let tagger = Tagger::new();

    c.bench_function("dedupe_paths", |b| {
        b.iter(|| black_box(Deduplicator::new().dedupe(black_box(doubled.clone()))))
    });
    c.bench_function("tag_paths", |b| b.iter(|| black_box(tagger.tag_all(black_box(&paths)))));
}

criterion_group!(benches, benchmark_class_membership, benchmark_transitive, benchmark_dedup_and_tagging);
criterion_main!(benches);
