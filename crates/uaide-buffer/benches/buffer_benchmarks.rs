//! Benchmarks for text buffer operations.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use uaide_buffer::TextBuffer;

/// Builds a script of `lines` lines using Ukrainian keywords.
fn generate_script(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("якщо x{i} > 0: вивести(\"рядок {i}\")\n"))
        .collect()
}

fn bench_buffer_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_creation");

    for size in [100, 1000, 10000].iter() {
        let text = generate_script(*size);

        group.bench_with_input(BenchmarkId::new("from_str", size), &text, |b, text| {
            b.iter(|| black_box(TextBuffer::from(black_box(text.as_str()))))
        });
    }

    group.finish();
}

/// Typing one character at a time, as the editor does.
fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");
    let base = generate_script(10000);

    group.bench_function("type_word_middle", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base.as_str()),
            |mut buffer| {
                let mut at = buffer.len_chars() / 2;
                for c in "зменшити".chars() {
                    buffer.insert(at, c.encode_utf8(&mut [0; 4])).unwrap();
                    at += 1;
                }
                black_box(buffer)
            },
        )
    });

    group.bench_function("replace_fragment", |b| {
        b.iter_with_setup(
            || TextBuffer::from(base.as_str()),
            |mut buffer| {
                buffer.replace(0..5, black_box("зменшити")).unwrap();
                black_box(buffer)
            },
        )
    });

    group.finish();
}

fn bench_undo_redo(c: &mut Criterion) {
    let mut group = c.benchmark_group("undo_redo");

    group.bench_function("undo_100_groups", |b| {
        b.iter_with_setup(
            || {
                let mut buffer = TextBuffer::new();
                for i in 0..100 {
                    buffer
                        .grouped(|buf| buf.insert(i * 5, "поки "))
                        .unwrap();
                }
                buffer
            },
            |mut buffer| {
                for _ in 0..100 {
                    buffer.undo().unwrap();
                }
                black_box(buffer)
            },
        )
    });

    group.finish();
}

fn bench_line_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_access");

    let text = generate_script(100000);
    let buffer = TextBuffer::from(text.as_str());

    group.bench_function("get_line", |b| {
        b.iter(|| black_box(buffer.line(black_box(50000)).unwrap()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_buffer_creation,
    bench_typing,
    bench_undo_redo,
    bench_line_access,
);
criterion_main!(benches);
