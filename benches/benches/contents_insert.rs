// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use coffer_contents::{
    Contents, IndexedPagination, Layout, MenuItem, PaginationConfig, SharedContents, SlotStore,
};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};

fn gen_items(n: usize) -> Vec<MenuItem> {
    (0..n).map(|i| MenuItem::new(format!("item-{i}"))).collect()
}

// Every other slot taken, so inserts have to skip.
fn checkerboard(rows: usize, growable: bool) -> Contents {
    let mut contents = Contents::new(Layout::chest(rows, growable).unwrap());
    let filler = MenuItem::new("filler");
    for slot in (0..contents.size()).step_by(2) {
        let _ = contents.set(slot, filler.clone());
    }
    contents
}

fn bench_contents(c: &mut Criterion) {
    let mut group = c.benchmark_group("contents");
    for &n in &[9usize, 27, 54] {
        let items = gen_items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("add_items_grow_n{n}"), |b| {
            b.iter_batched(
                || Contents::new(Layout::chest(1, true).unwrap()),
                |mut contents| {
                    let placed = contents.add_items(items.iter().cloned());
                    black_box(placed);
                },
                BatchSize::SmallInput,
            );
        });
    }
    let items = gen_items(27);
    group.bench_function("add_items_checkerboard", |b| {
        b.iter_batched(
            || checkerboard(6, false),
            |mut contents| {
                black_box(contents.add_items(items.iter().cloned()));
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("first_empty_slot_checkerboard", |b| {
        let contents = checkerboard(6, false);
        b.iter(|| black_box(contents.first_empty_slot(black_box(17))));
    });
    group.finish();
}

fn bench_shared(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared");
    let items = gen_items(54);
    group.throughput(Throughput::Elements(54));
    group.bench_function("add_items_n54", |b| {
        b.iter_batched(
            || SharedContents::new(Layout::chest(1, true).unwrap()),
            |mut contents| {
                black_box(contents.add_items(items.iter().cloned()));
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("entries_snapshot", |b| {
        let mut contents = SharedContents::new(Layout::chest(6, false).unwrap());
        contents.add_items(items.iter().cloned());
        b.iter(|| black_box(contents.entries().len()));
    });
    group.finish();
}

fn bench_pagination(c: &mut Criterion) {
    let mut group = c.benchmark_group("pagination");
    for &n in &[100usize, 1000] {
        let items = gen_items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("dynamic_add_items_n{n}"), |b| {
            b.iter_batched(
                || {
                    let config = PaginationConfig::default().with_rows(5).with_dynamic_paging(true);
                    let mut pages: IndexedPagination = IndexedPagination::new(config).unwrap();
                    pages.set_shared_item(44, MenuItem::new("next")).unwrap();
                    pages
                },
                |mut pages| {
                    black_box(pages.add_items(items.iter().cloned()));
                    black_box(pages.page_count());
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_contents, bench_shared, bench_pagination);
criterion_main!(benches);
