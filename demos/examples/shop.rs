// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A read-only shop menu.
//!
//! Builds a chest with a border, a few buyable items, and a close button,
//! then replays some clicks the way a host would deliver them. Guard denials
//! and dispatch rounds are logged; raise the filter to see them.
//!
//! Run:
//! - `RUST_LOG=coffer_actions=debug cargo run -p coffer_demos --example shop`

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use coffer_actions::{
    Cancellable, ClickAction, ClickEvent, CloseEvent, CloseOutcome, CloseReason, DragEvent, Menu,
    MenuConfig, MenuItem, Modifiers, OpenEvent, Region, SlotStore, ViewerId,
};
use coffer_contents::{Layout, RenderContext, Viewport};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Prints the grid after every render.
struct Terminal;

impl Viewport for Terminal {
    fn refresh(&mut self, ctx: &RenderContext, entries: &[(usize, MenuItem)]) {
        let columns = ctx.layout.columns();
        let mut cells = vec!["."; ctx.layout.size()];
        for (slot, item) in entries {
            cells[*slot] = if item.key() == "border" { "#" } else { "@" };
        }
        for row in cells.chunks(columns) {
            println!("  {}", row.concat());
        }
        println!();
    }

    fn reshape(&mut self, layout: Layout) {
        println!("  window resized to {} rows", layout.rows());
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("coffer_actions=info,shop=info"))
        .unwrap();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let config = MenuConfig::default()
        .with_rows(3)
        .with_modifiers(Modifiers::all());
    let store = coffer_actions::Contents::new(config.layout().unwrap());
    let mut menu = Menu::with_store(config, store, Terminal).unwrap();

    let border = MenuItem::new("border");
    menu.store_mut().fill_borders(&border);

    let coins = Arc::new(AtomicU32::new(100));
    for (name, price) in [("apple", 5), ("sword", 60), ("shield", 45)] {
        let wallet = Arc::clone(&coins);
        let item = MenuItem::new(name).with_click(move |click| {
            let paid = wallet.fetch_update(Ordering::Relaxed, Ordering::Relaxed, |left| left.checked_sub(price));
            match paid {
                Ok(left) => info!(viewer = %click.viewer(), item = name, left = left - price, "bought"),
                Err(left) => info!(viewer = %click.viewer(), item = name, left, "not enough coins"),
            }
        });
        menu.add_items([item]);
    }
    let close = MenuItem::new("close").with_click(|click| click.close());
    menu.set_item(22, close).unwrap();

    menu.actions_mut().on_close(|close| {
        if close.reason == CloseReason::Player {
            info!("the shopkeeper insists you stay");
            close.set_cancelled(true);
        }
    });

    let viewer = ViewerId::random();
    menu.handle_open(&mut OpenEvent::new(viewer));

    for slot in [10, 11, 11] {
        let mut click = ClickEvent::menu(viewer, slot);
        let outcome = menu.handle_click(&mut click);
        info!(slot, cancelled = click.is_cancelled(), handled = outcome.item_clicked, "click");
    }

    let mut shift = ClickEvent::new(viewer, 3, ClickAction::MoveToOtherInventory, Region::Player);
    menu.handle_click(&mut shift);
    info!(cancelled = shift.is_cancelled(), "shift-click from the inventory");

    let mut drag = DragEvent::new(viewer, vec![12, 13, 40]);
    menu.handle_drag(&mut drag);
    info!(cancelled = drag.is_cancelled(), "drag across the counter");

    let outcome = menu.handle_click(&mut ClickEvent::menu(viewer, 22));
    info!(close = outcome.close, "close button");

    let mut close = CloseEvent::new(viewer, CloseReason::Player);
    if menu.handle_close(&mut close) == CloseOutcome::Reopen {
        menu.handle_open(&mut OpenEvent::new(viewer));
    }
    let mut close = CloseEvent::new(viewer, CloseReason::Disconnect);
    info!(outcome = ?menu.handle_close(&mut close), "disconnect");
}
