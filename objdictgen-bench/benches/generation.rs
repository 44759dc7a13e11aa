//! Generation benchmarks.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use objdictgen_bench::nodes::{range_node, type_names};
use objdictgen_codegen::c::{format_name, format_value};
use objdictgen_codegen::{Generator, TargetType, TypeCache, TypeResolver};
use objdictgen_schema::{DEFAULT_STRING_SIZE, Value};
use std::hint::black_box;

fn benchmark_resolve_cold(c: &mut Criterion) {
    let resolver = TypeResolver::new(DEFAULT_STRING_SIZE);
    let names = type_names();

    c.bench_function("resolve_cold", |b| {
        b.iter(|| {
            let mut cache = TypeCache::new();
            for name in &names {
                let _ = black_box(resolver.resolve(&mut cache, black_box(name)));
            }
        })
    });
}

fn benchmark_resolve_cached(c: &mut Criterion) {
    let resolver = TypeResolver::new(DEFAULT_STRING_SIZE);
    let names = type_names();
    let mut cache = TypeCache::new();
    for name in &names {
        let _ = resolver.resolve(&mut cache, name);
    }

    c.bench_function("resolve_cached", |b| {
        b.iter(|| {
            for name in &names {
                let _ = black_box(resolver.resolve(&mut cache, black_box(name)));
            }
        })
    });
}

fn benchmark_format(c: &mut Criterion) {
    let integer = Value::Integer(0x1234_5678);
    let domain = Value::from("binary payload");

    c.bench_function("format_integer", |b| {
        b.iter(|| format_value(black_box(&integer), &TargetType::Unsigned(32)))
    });

    c.bench_function("format_domain", |b| {
        b.iter(|| format_value(black_box(&domain), &TargetType::Domain))
    });

    c.bench_function("format_name", |b| {
        b.iter(|| format_name(black_box("Transmit PDO 1 Mapping (sub 3)")))
    });
}

fn benchmark_value_range_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_range_table");

    for ranges in [1usize, 16, 128, 448] {
        let node = range_node(ranges, 64);
        group.bench_with_input(BenchmarkId::from_parameter(ranges), &node, |b, node| {
            b.iter(|| Generator::new(black_box(node)).generate())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_resolve_cold,
    benchmark_resolve_cached,
    benchmark_format,
    benchmark_value_range_table,
);
criterion_main!(benches);
