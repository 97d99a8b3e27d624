//! Lexer and parser benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use jsast_core::{print_tree, teardown};
use jsast_parser::{parse, Lexer, TokenKind};

const SAMPLE_SOURCE: &str = r#"
// Sample JavaScript code for benchmarking
function fibonacci(n) {
    if (n <= 1) return n;
    return fibonacci(n - 1) + fibonacci(n - 2);
}

async function load(url, retries) {
    var attempt = 0;
    do {
        attempt++;
        if (attempt > retries) throw new Error("giving up on " + url);
    } while (!fetch(url));
    return attempt;
}

const limits = { min: 0, max: 100, [key]: value, shorthand };
let numbers = [1, 2, 3, 4, 5];
for (var i = 0; i < numbers.length; i++) {
    numbers[i] = numbers[i] * 2 + (i % 3 === 0 ? 1 : 0);
}
while (queue.length) {
    const item = queue.shift();
    if (!item) continue;
    process(item, typeof item === 'object' ? item.id : null);
}
"#;

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");
    group.throughput(Throughput::Bytes(SAMPLE_SOURCE.len() as u64));

    group.bench_function("sample", |b| {
        b.iter(|| {
            let mut lexer = Lexer::new(black_box(SAMPLE_SOURCE));
            while lexer.next_token().kind != TokenKind::Eof {}
        });
    });

    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");
    group.throughput(Throughput::Bytes(SAMPLE_SOURCE.len() as u64));

    group.bench_function("parse", |b| {
        b.iter(|| parse(black_box(SAMPLE_SOURCE)));
    });

    group.bench_function("parse_print_teardown", |b| {
        b.iter(|| {
            let parsed = parse(black_box(SAMPLE_SOURCE));
            let dump = print_tree(parsed.root.as_ref());
            black_box(dump);
            teardown(parsed.root)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_lexer, bench_parser);
criterion_main!(benches);
