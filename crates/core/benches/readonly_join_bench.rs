//! Benchmarks comparing the nested-loop and hash-join read-only field matchers
//!
//! Run with: cargo bench -p annocmp-core --bench readonly_join_bench

use annocmp_core::{AnnotationRecord, readonly_fields, readonly_fields_nested};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

const SENTINEL: &str = r#" type = "OnlyRead")"#;

fn create_records(count: usize, value: impl Fn(usize) -> String) -> Vec<AnnotationRecord> {
  (0..count)
    .map(|idx| {
      let line = format!(
        r#"or (filename = "Src/File{}.cs" and lineNumber = "{}" and programElementType = "Field" and programElementName = "f{}" and{}"#,
        idx / 20,
        idx,
        idx,
        value(idx)
      );
      AnnotationRecord::from_line(&line, "and").expect("generated record has a prefix")
    })
    .collect()
}

/// Benchmark: nested loop vs hash join at annotation-file scale
fn bench_readonly_join(c: &mut Criterion) {
  let mut group = c.benchmark_group("readonly_join");

  for size in [100, 1_000, 5_000] {
    let manual = create_records(size, |_| r#" annotation = "Owning")"#.to_string());
    let facts = create_records(size, |idx| {
      if idx % 2 == 0 {
        SENTINEL.to_string()
      } else {
        r#" type = "Written")"#.to_string()
      }
    });

    group.throughput(Throughput::Elements(size as u64));

    group.bench_with_input(BenchmarkId::new("nested", size), &size, |b, _| {
      b.iter(|| readonly_fields_nested(black_box(&manual), black_box(&facts), SENTINEL))
    });

    group.bench_with_input(BenchmarkId::new("hash_join", size), &size, |b, _| {
      b.iter(|| readonly_fields(black_box(&manual), black_box(&facts), SENTINEL))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_readonly_join);
criterion_main!(benches);
