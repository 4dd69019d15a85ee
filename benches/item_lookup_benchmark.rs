use criterion::{criterion_group, criterion_main, Criterion};
use runesync::services::ItemCatalog;
use std::hint::black_box;

/// Catalog shaped like the real item list: ~30k lines, many shared prefixes.
fn synthetic_catalog() -> ItemCatalog {
    let materials = ["bronze", "iron", "steel", "mithril", "adamant", "rune", "dragon"];
    let kinds = ["scimitar", "sword", "longsword", "platebody", "full helm", "kiteshield"];

    let mut contents = String::new();
    let mut id = 1;
    for variant in 0..700 {
        for material in materials {
            for kind in kinds {
                contents.push_str(&format!("{}:{} {} ({})\n", id, material, kind, variant));
                id += 1;
            }
        }
    }
    contents.push_str(&format!("{}:Abyssal whip\n", id));
    ItemCatalog::parse(&contents)
}

fn benchmark_item_lookup(c: &mut Criterion) {
    let catalog = synthetic_catalog();

    let mut group = c.benchmark_group("item_lookup");

    group.bench_function("exact_match", |b| {
        b.iter(|| catalog.resolve(black_box("Rune Scimitar (350)")))
    });

    group.bench_function("unique_partial_match", |b| {
        b.iter(|| catalog.resolve(black_box("abyssal")))
    });

    group.bench_function("ambiguous_partial_match", |b| {
        b.iter(|| catalog.lookup(black_box("rune scim")))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| catalog.resolve(black_box("twisted bow")))
    });

    group.finish();
}

criterion_group!(benches, benchmark_item_lookup);
criterion_main!(benches);
