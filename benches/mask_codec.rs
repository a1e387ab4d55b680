use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use formwork::domain::mask::{apply_mask, mask_to_pattern, remove_mask};

fn benchmark_apply_mask(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_mask");
    for (label, digits, mask) in [
        ("phone", "11987654321", "(99) 99999-9999"),
        ("cpf", "12345678901", "999.999.999-99"),
        ("cep", "01310100", "99999-999"),
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(label), &(digits, mask), |b, (digits, mask)| {
            b.iter(|| apply_mask(black_box(digits), black_box(mask)))
        });
    }
    group.finish();
}

fn benchmark_remove_mask(c: &mut Criterion) {
    c.bench_function("remove_mask", |b| {
        b.iter(|| remove_mask(black_box("(11) 98765-4321")))
    });
}

fn benchmark_pattern_compile_and_match(c: &mut Criterion) {
    c.bench_function("mask_to_pattern", |b| {
        b.iter(|| mask_to_pattern(black_box("(99) 99999-9999")).unwrap())
    });

    let pattern = mask_to_pattern("(99) 99999-9999").unwrap();
    c.bench_function("pattern_match", |b| {
        b.iter(|| pattern.is_match(black_box("(11) 98765-4321")))
    });
}

criterion_group!(
    benches,
    benchmark_apply_mask,
    benchmark_remove_mask,
    benchmark_pattern_compile_and_match
);
criterion_main!(benches);
