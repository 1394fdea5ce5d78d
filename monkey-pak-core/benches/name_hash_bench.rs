use criterion::{Criterion, criterion_group, criterion_main};
use monkey_pak_core::filename::FileNameTable;
use monkey_pak_core::hasher::name_hash;
use std::hint::black_box;

const TYPICAL_LONG_FILENAME: &str = "data/stage/stage01/model/monkey_pink_lod0.gmd";

fn bench_name_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_hash");

    group.bench_with_input("long_name", TYPICAL_LONG_FILENAME, |b, filename| {
        b.iter(|| black_box(name_hash(black_box(filename))));
    });

    for &filename in &["a.bin", "Ñoño.file", "モンキー.dat"] {
        group.bench_with_input(format!("unicode/{}", filename), filename, |b, filename| {
            b.iter(|| black_box(name_hash(black_box(filename))));
        });
    }

    group.finish();
}

fn bench_wordlist(c: &mut Criterion) {
    let list: String = (0..10_000)
        .map(|i| format!("data/stage{:02}/file{:05}.bin\n", i % 40, i))
        .collect();

    c.bench_function("wordlist_10k", |b| {
        b.iter(|| black_box(FileNameTable::from_list(black_box(&list))));
    });
}

criterion_group!(benches, bench_name_hash, bench_wordlist);

criterion_main!(benches);
