// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;

use coffer_actions::{
    ClickAction, ClickEvent, Immediate, Menu, MenuConfig, MenuItem, Modifiers, PagedMenu,
    PaginationConfig, Region, ViewerId,
};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_menu_clicks(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_click");
    let viewer = ViewerId::random();
    for (name, modifiers) in [
        ("open", Modifiers::empty()),
        ("read_only", Modifiers::all()),
    ] {
        let mut menu = Menu::new(MenuConfig::default().with_modifiers(modifiers)).unwrap();
        menu.actions_mut().set_spawner(Arc::new(Immediate));
        menu.set_item(4, MenuItem::new("button").with_click(|_| {}))
            .unwrap();
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut event = ClickEvent::new(viewer, 4, ClickAction::PickupAll, Region::Menu);
                black_box(menu.handle_click(&mut event))
            });
        });
    }

    let mut menu = Menu::new(MenuConfig::default()).unwrap();
    for _ in 0..16 {
        menu.actions_mut().on_top_click(|click| {
            black_box(click.slot);
        });
    }
    group.bench_function("sixteen_listeners", |b| {
        b.iter(|| {
            let mut event = ClickEvent::menu(viewer, 10);
            black_box(menu.handle_click(&mut event))
        });
    });
    group.finish();
}

fn bench_page_turns(c: &mut Criterion) {
    let mut group = c.benchmark_group("page_turn");
    let config = PaginationConfig::default().with_rows(3).with_pages(8);
    let mut menu = PagedMenu::new(config, Modifiers::all()).unwrap();
    menu.set_navigation((26, MenuItem::new("next")), (18, MenuItem::new("previous")))
        .unwrap();
    let viewer = ViewerId::random();
    group.bench_function("next_then_previous", |b| {
        b.iter(|| {
            black_box(menu.handle_click(&mut ClickEvent::menu(viewer, 26)));
            black_box(menu.handle_click(&mut ClickEvent::menu(viewer, 18)));
        });
    });
    group.finish();
}

criterion_group!(benches, bench_menu_clicks, bench_page_turns);
criterion_main!(benches);
