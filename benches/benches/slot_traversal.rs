// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use coffer_contents::{Contents, Layout, MenuItem, SlotStore};
use coffer_slots::{Direction, Grid, SlotIter};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_slot_iter(c: &mut Criterion) {
    let mut group = c.benchmark_group("slot_iter");
    let grid = Grid::chest(6);
    for direction in Direction::ALL {
        group.bench_function(format!("{direction:?}"), |b| {
            b.iter(|| {
                let mut sum = 0;
                for slot in SlotIter::new(direction, grid) {
                    sum += slot.index(grid.columns);
                }
                black_box(sum)
            });
        });
    }
    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("traverse");
    let mut contents = Contents::new(Layout::chest(6, false).unwrap());
    for slot in (0..54).step_by(3) {
        let _ = contents.set(slot, MenuItem::new(format!("{slot}")));
    }
    // Horizontal walks the map directly; the others probe every slot.
    for direction in [Direction::Horizontal, Direction::Vertical, Direction::BackwardsHorizontal] {
        group.bench_function(format!("{direction:?}"), |b| {
            b.iter(|| black_box(contents.traverse(direction).len()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_slot_iter, bench_traverse);
criterion_main!(benches);
