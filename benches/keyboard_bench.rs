use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::io::Cursor;
use univkbd::config::KeyboardConfig;
use univkbd::layouts::{CharMap, LogicalLayout};
use univkbd::platform::table::TableProvider;
use univkbd::Keyboard;

const TABLES_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/translation_tables.tsv");

fn criterion_benchmark(c: &mut Criterion) {
    let keyboard = Keyboard::reference();
    let mut bytes = Vec::new();
    keyboard
        .serialize(&mut bytes)
        .expect("Failed to serialize reference keyboard");

    c.bench_function("serialize reference", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(bytes.len());
            black_box(&keyboard).serialize(&mut out).unwrap();
            out
        })
    });

    c.bench_function("deserialize reference", |b| {
        b.iter(|| Keyboard::deserialize(&mut Cursor::new(black_box(&bytes))).unwrap())
    });

    let map = CharMap::between(
        LogicalLayout::Azerty.get_str(),
        LogicalLayout::Colemak.get_str(),
    )
    .expect("Failed to build char map");
    c.bench_function("remap azerty -> colemak", |b| {
        b.iter(|| black_box(&keyboard).convert_layout_with(&map))
    });

    let provider = TableProvider::load_from_file(TABLES_PATH).expect("Failed to load tables");
    let config = KeyboardConfig::default();
    c.bench_function("generate US from tables", |b| {
        b.iter(|| Keyboard::from_provider(&provider, black_box("US"), "qwerty", &config).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
