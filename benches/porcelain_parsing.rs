use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gitops_shell::git::parser::{
    parse_ahead_behind, parse_ahead_of_origin, parse_graph, parse_tracking_branch,
};

const SMALL_BRANCH_VV: &str = r#"  develop   3c4d5e6 [origin/develop] Merge pull request #12
* main      01b37f4 [origin/main: ahead 2] Tighten config parsing
  release   9f8e7d6 [origin/release: behind 4] Bump version"#;

fn generate_branch_vv(num_branches: usize) -> String {
    let mut output = String::new();
    for i in 0..num_branches {
        output.push_str(&format!(
            "  feature-{}  {:07x} [origin/feature-{}: ahead {}] Work on feature {}\n",
            i, i, i, i % 7, i
        ));
    }
    output.push_str("* main  01b37f4 [origin/main] Current work\n");
    output
}

fn generate_graph(num_commits: usize) -> String {
    let mut output = String::new();
    for i in 0..num_commits {
        output.push_str(&format!("* {:07x} Commit message {}\n", i, i));
    }
    output
}

fn bench_parse_tracking_branch(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_tracking_branch");

    group.bench_with_input(
        BenchmarkId::new("small", "3 branches"),
        &SMALL_BRANCH_VV,
        |b, input| b.iter(|| parse_tracking_branch(black_box(input))),
    );

    let large = generate_branch_vv(500);
    group.bench_with_input(
        BenchmarkId::new("large", "500 branches"),
        &large,
        |b, input| b.iter(|| parse_tracking_branch(black_box(input))),
    );

    group.finish();
}

fn bench_parse_ahead_of_origin(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_ahead_of_origin");

    group.bench_with_input(
        BenchmarkId::new("small", "3 branches"),
        &SMALL_BRANCH_VV,
        |b, input| b.iter(|| parse_ahead_of_origin(black_box(input), black_box("main"))),
    );

    let large = generate_branch_vv(500);
    group.bench_with_input(
        BenchmarkId::new("large", "500 branches"),
        &large,
        |b, input| b.iter(|| parse_ahead_of_origin(black_box(input), black_box("main"))),
    );

    group.finish();
}

fn bench_parse_ahead_behind(c: &mut Criterion) {
    c.bench_function("parse_ahead_behind", |b| {
        b.iter(|| parse_ahead_behind(black_box("[ahead 12, behind 3]\n")))
    });
}

fn bench_parse_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_graph");
    let graph = generate_graph(1000);

    for limit in [25, 1000] {
        group.bench_with_input(BenchmarkId::new("limit", limit), &limit, |b, &limit| {
            b.iter(|| parse_graph(black_box(&graph), limit))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_tracking_branch,
    bench_parse_ahead_of_origin,
    bench_parse_ahead_behind,
    bench_parse_graph
);
criterion_main!(benches);
