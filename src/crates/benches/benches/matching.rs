use benches::support::{catalogue_with_mappings, matcher_for, request};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn exact_match_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("exact_match");

    for size in [10usize, 100, 1_000] {
        let catalogue = catalogue_with_mappings(size);
        let matcher = matcher_for(&catalogue);
        let req = request("GET", &format!("/fixtures/{}", size - 1));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(matcher.match_request(&req, &catalogue, None)));
        });
    }

    group.finish();
}

fn regex_match_bench(c: &mut Criterion) {
    let catalogue = catalogue_with_mappings(100);
    let matcher = matcher_for(&catalogue);
    let req = request("GET", "/fixtures/regex/42");

    c.bench_function("regex_match_among_100", |b| {
        b.iter(|| black_box(matcher.match_request(&req, &catalogue, None)));
    });
}

fn miss_bench(c: &mut Criterion) {
    let catalogue = catalogue_with_mappings(100);
    let matcher = matcher_for(&catalogue);
    let req = request("GET", "/does-not-exist");

    c.bench_function("miss_among_100", |b| {
        b.iter(|| black_box(matcher.match_request(&req, &catalogue, None)));
    });
}

criterion_group!(benches, exact_match_bench, regex_match_bench, miss_bench);
criterion_main!(benches);
