//! Benchmarks for index construction and queries.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use laserlookup_catalog::Catalog;
use laserlookup_search::{FuzzyIndex, IndexOptions, SearchEngine, SearchSettings};

fn test_catalog() -> Catalog {
    Catalog::from_json_str(include_str!("../testdata/equipment.json")).unwrap()
}

fn bench_build(c: &mut Criterion) {
    let catalog = test_catalog();

    c.bench_function("index_build_strict", |b| {
        b.iter(|| FuzzyIndex::build(black_box(&catalog), IndexOptions::strict()))
    });
}

fn bench_queries(c: &mut Criterion) {
    let catalog = test_catalog();
    let strict = FuzzyIndex::build(&catalog, IndexOptions::strict());
    let loose = FuzzyIndex::build(&catalog, IndexOptions::loose());

    let mut group = c.benchmark_group("query");
    for query in ["gentle max pro", "gentlemx pro", "candela", "nd yag"] {
        group.bench_with_input(BenchmarkId::new("strict", query), query, |b, q| {
            b.iter(|| strict.search(black_box(q)))
        });
        group.bench_with_input(BenchmarkId::new("loose", query), query, |b, q| {
            b.iter(|| loose.search(black_box(q)))
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let settings = SearchSettings::default();
    let engine = SearchEngine::new(&test_catalog(), &mut settings.cache(), &settings);

    c.bench_function("lookup_with_suggestions", |b| {
        b.iter(|| engine.lookup(black_box("Candela GentleMax"), None))
    });
}

criterion_group!(benches, bench_build, bench_queries, bench_lookup);
criterion_main!(benches);
