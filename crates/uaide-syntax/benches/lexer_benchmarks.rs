//! Benchmarks for keyword highlighting and completion lookups.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use uaide_syntax::{Lexer, Vocabulary};

const LINE: &str = "поки не кінець: якщо x > 0: вивести(\"значення якщо\") інакше: повернути Ні";

fn bench_highlight(c: &mut Criterion) {
    let lexer = Lexer::builtin();
    let mut group = c.benchmark_group("highlight");

    group.bench_function("highlight_line", |b| {
        b.iter(|| black_box(lexer.highlight_line(black_box(LINE))))
    });

    let script: Vec<String> = (0..1000).map(|i| format!("{LINE} # {i}")).collect();
    group.bench_function("highlight_1000_lines", |b| {
        b.iter(|| {
            let spans: usize = script.iter().map(|l| lexer.highlight_line(l).len()).sum();
            black_box(spans)
        })
    });

    group.finish();
}

fn bench_prefix(c: &mut Criterion) {
    let vocabulary = Vocabulary::builtin();
    let mut group = c.benchmark_group("completion_prefix");

    for prefix in ["з", "зм", "пов"] {
        group.bench_function(prefix, |b| {
            b.iter(|| black_box(vocabulary.with_prefix(black_box(prefix)).count()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_highlight, bench_prefix);
criterion_main!(benches);
