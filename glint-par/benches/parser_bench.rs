use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const FIB_SOURCE: &str = r#"
fn fib(n) {
    if n < 2 {
        return n;
    }
    return fib(n - 1) + fib(n - 2);
}
print fib(20);
"#;

const LOOP_SOURCE: &str = r#"
dec i = 0;
dec total = 0;
while i < 1000 {
    if i % 15 == 0 {
        total = total + i;
    } else {
        total = total + 1;
    }
    i = i + 1;
}
print total;
"#;

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for (name, source) in [("short_declaration", "x := 1;"), ("fib_source", FIB_SOURCE), ("loop_heavy", LOOP_SOURCE)] {
        let tokens = glint_lex::scan(source).expect("source should scan");
        group.throughput(Throughput::Elements(tokens.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| glint_par::parse(black_box(tokens.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
