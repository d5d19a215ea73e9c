// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A catalog spread over pages that are allocated on demand.
//!
//! Navigation buttons are shared by every page. A page-change listener
//! refuses to leave the first page until the viewer has clicked the notice.
//!
//! Run:
//! - `cargo run -p coffer_demos --example paged_catalog`

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use coffer_actions::{
    Cancellable, ClickEvent, MenuItem, Modifiers, PagedMenu, PagedView, PaginationConfig, ViewerId,
};
use coffer_contents::{RenderContext, Viewport};
use coffer_slots::{Direction, SlotIter};
use tracing::info;
use tracing_subscriber::EnvFilter;

struct PageLog;

impl Viewport for PageLog {
    fn refresh(&mut self, ctx: &RenderContext, entries: &[(usize, MenuItem)]) {
        if let Some(page) = ctx.page {
            info!(page = page.index + 1, of = page.count, items = entries.len(), "rendered");
        }
    }
}

const NEXT: usize = 17;
const PREVIOUS: usize = 9;
const NOTICE: usize = 13;

fn main() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();

    let config = PaginationConfig::default()
        .with_rows(2)
        .with_dynamic_paging(true);
    let mut menu = PagedMenu::with_viewport(config, Modifiers::all(), PageLog).unwrap();
    menu.set_navigation((NEXT, MenuItem::new("next")), (PREVIOUS, MenuItem::new("previous")))
        .unwrap();

    let read = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&read);
    let notice = MenuItem::new("notice")
        .with_click(move |_| flag.store(true, Ordering::Relaxed))
        .with_visibility(|ctx| ctx.page.is_some_and(|page| page.index == 0));
    menu.pagination_mut().set_shared_item(NOTICE, notice).unwrap();

    let gate = Arc::clone(&read);
    menu.actions_mut().on_page_change(move |change| {
        if !gate.load(Ordering::Relaxed) {
            info!(to = change.new_key, "read the notice first");
            change.set_cancelled(true);
        }
    });

    // Fill the catalog in column order so the listing reads top to bottom.
    let layout = menu.pagination().layout();
    let order: Vec<usize> = SlotIter::new(Direction::Vertical, layout.grid())
        .map(|slot| slot.index(layout.columns()))
        .collect();
    info!(?order, "slot order within a page");
    let placed = menu.add_items((0..40).map(|i| MenuItem::new(format!("entry-{i}"))));
    info!(placed, pages = menu.pagination().page_count(), "catalog filled");
    menu.pagination_mut().go_to_index(0);

    let viewer = ViewerId::random();
    for slot in [NEXT, NOTICE, NEXT, NEXT, PREVIOUS] {
        let mut click = ClickEvent::menu(viewer, slot);
        let outcome = menu.handle_click(&mut click);
        info!(
            slot,
            page = menu.current_key() + 1,
            vetoed = outcome.report.cancelled && !outcome.item_clicked,
            "click"
        );
    }
}
