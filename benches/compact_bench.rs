use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scale_model::{
    parse_compact, write_compact, ByteCounter, Compact, Decode, Encode, SliceParser, U128,
};

const SAMPLES: [u128; 8] = [
    0,
    63,
    16383,
    (1 << 30) - 1,
    1 << 30,
    u64::MAX as u128,
    1 << 100,
    u128::MAX,
];

fn encode_bench(c: &mut Criterion) {
    let values: Vec<U128> = SAMPLES.iter().copied().map(U128::from).collect();
    let mut buf = Vec::with_capacity(17 * values.len());

    c.bench_function("compact_encode", |b| {
        b.iter(|| {
            buf.clear();
            for v in &values {
                write_compact(black_box(*v), &mut buf);
            }
        })
    });

    c.bench_function("compact_measure", |b| {
        b.iter(|| {
            let mut counter: ByteCounter = std::io::sink();
            values
                .iter()
                .map(|v| write_compact(black_box(*v), &mut counter))
                .sum::<usize>()
        })
    });
}

fn decode_bench(c: &mut Criterion) {
    let mut input = Vec::new();
    for v in SAMPLES {
        write_compact(U128::from(v), &mut input);
    }

    c.bench_function("compact_decode_raw", |b| {
        b.iter(|| {
            let mut p = SliceParser::new(black_box(&input));
            for _ in 0..SAMPLES.len() {
                black_box(parse_compact(&mut p).unwrap());
            }
        })
    });

    let narrow: Vec<u8> = Compact(1u32 << 20).to_bytes().unwrap();
    c.bench_function("compact_decode_u32", |b| {
        b.iter(|| Compact::<u32>::from_bytes(black_box(&narrow)).unwrap())
    });
}

criterion_group! {
    name = compact_benches;
    config = Criterion::default();
    targets = encode_bench, decode_bench
}

criterion_main!(compact_benches);
