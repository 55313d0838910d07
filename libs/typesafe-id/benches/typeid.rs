use criterion::{black_box, criterion_group, criterion_main, Criterion};
use typesafe_id::ordering::{lexicographic, timestamp_first};
use typesafe_id::{define_id, generator, TypeId};

pub struct Customer;
define_id!(CustomerId, Customer);

const ID: &str = "customer_01h455vb4pex5vsknk084sn02q";

// Generation
fn bench_generate(c: &mut Criterion) {
    c.bench_function("generator_generate_now", |b| {
        b.iter(|| black_box(generator::generate_now()))
    });
    c.bench_function("type_id_new", |b| {
        b.iter(|| black_box(TypeId::new(black_box("customer"))))
    });
    c.bench_function("typed_id_new", |b| b.iter(|| black_box(CustomerId::new())));
}

// Parsing
fn bench_parse(c: &mut Criterion) {
    c.bench_function("type_id_parse", |b| {
        b.iter(|| black_box(TypeId::parse(black_box(ID))))
    });
    c.bench_function("type_id_parse_bytes", |b| {
        b.iter(|| black_box(TypeId::parse_bytes(black_box(ID.as_bytes()))))
    });
    c.bench_function("typed_id_parse", |b| {
        b.iter(|| black_box(CustomerId::parse(black_box(ID))))
    });
}

// Formatting
fn bench_format(c: &mut Criterion) {
    let id = TypeId::parse(ID).unwrap();
    c.bench_function("type_id_to_string", |b| b.iter(|| black_box(id.to_string())));
    c.bench_function("type_id_write_to", |b| {
        let mut buf = [0u8; TypeId::MAX_LENGTH];
        b.iter(|| black_box(id.write_to(&mut buf).map(str::len)))
    });
}

// Comparison
fn bench_compare(c: &mut Criterion) {
    let ids: Vec<TypeId> = (0..1_000)
        .map(|i| {
            let prefix = if i % 2 == 0 { "customer" } else { "order" };
            TypeId::new(prefix).unwrap()
        })
        .collect();

    c.bench_function("sort_lexicographic_1000", |b| {
        b.iter(|| {
            let mut ids = ids.clone();
            ids.sort_by(lexicographic);
            black_box(ids)
        })
    });
    c.bench_function("sort_timestamp_first_1000", |b| {
        b.iter(|| {
            let mut ids = ids.clone();
            ids.sort_by(timestamp_first);
            black_box(ids)
        })
    });
}

criterion_group!(benches, bench_generate, bench_parse, bench_format, bench_compare);
criterion_main!(benches);
