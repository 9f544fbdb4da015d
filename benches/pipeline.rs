//! Benchmarks for the glyphrom export pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use glyphrom::{
    export_document, pack_column_groups, pack_columns, pack_rows, AsmOptions, Flip, Layout,
    MappingTable, Packer, PixelGrid, SpriteSet,
};

/// A deterministic, non-trivial glyph pattern.
fn glyph(width: usize, height: usize, seed: usize) -> PixelGrid {
    let mut grid = PixelGrid::new(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            if (x * 7 + y * 13 + seed) % 5 < 2 {
                grid.set(x, y).unwrap();
            }
        }
    }
    grid
}

/// A full 256-glyph 8x8 character set, every glyph mapped.
fn charset() -> SpriteSet {
    (0..256)
        .map(|i| {
            let mut g = glyph(8, 8, i);
            g.set_index(i as u32);
            g
        })
        .collect()
}

// -- Single-glyph packers --

fn bench_packers(c: &mut Criterion) {
    let mut group = c.benchmark_group("packers");

    let small = glyph(8, 8, 1);
    let large = glyph(32, 32, 3);

    group.bench_function("pack_rows_8x8", |b| {
        b.iter(|| pack_rows(black_box(&small), Flip::None).unwrap())
    });

    group.bench_function("pack_rows_32x32_flip_xy", |b| {
        b.iter(|| pack_rows(black_box(&large), Flip::XY).unwrap())
    });

    group.bench_function("pack_columns_32x32", |b| {
        b.iter(|| pack_columns(black_box(&large), Flip::None).unwrap())
    });

    group.bench_function("pack_column_groups_32x32", |b| {
        b.iter(|| pack_column_groups(black_box(&large), 8).unwrap())
    });

    group.finish();
}

// -- Whole character sets --

fn bench_charset(c: &mut Criterion) {
    let mut group = c.benchmark_group("charset");

    let set = charset();
    let rows = Packer::rows();
    let columns = Packer::new(Layout::Columns, Flip::Y);
    let options = AsmOptions::default();

    group.bench_function("pack_rows_256", |b| {
        b.iter(|| black_box(&set).pack(true, &rows).unwrap())
    });

    group.bench_function("pack_columns_256", |b| {
        b.iter(|| black_box(&set).pack(true, &columns).unwrap())
    });

    group.bench_function("mapping_table_256", |b| {
        b.iter(|| MappingTable::build(black_box(&set)).unwrap())
    });

    group.bench_function("export_document_256", |b| {
        b.iter(|| export_document(black_box(&set), &rows, &options).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_packers, bench_charset);
criterion_main!(benches);
