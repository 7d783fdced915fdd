//! End-to-end pipeline throughput benchmarks.
//! Run with: `cargo bench --package glint-eval`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn run(source: &str) {
    let tokens = glint_lex::scan(source).expect("benchmark source should scan");
    let stmts = glint_par::parse(tokens).expect("benchmark source should parse");
    let map = glint_sem::resolve(&stmts).expect("benchmark source should resolve");
    let (_, result) = glint_eval::evaluate(&stmts, map);
    result.expect("benchmark source should run");
}

fn bench_interpreter(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpreter");

    let fib = "fn fib(n) { if n < 2 { return n; } return fib(n - 1) + fib(n - 2); } print fib(20);";
    group.bench_function("fib_20", |b| b.iter(|| run(black_box(fib))));

    let loop_heavy = "dec total = 0; dec i = 0; while i < 5000 { total = total + i; i = i + 1; } print total;";
    group.bench_function("loop_heavy", |b| b.iter(|| run(black_box(loop_heavy))));

    group.finish();
}

criterion_group!(benches, bench_interpreter);
criterion_main!(benches);
