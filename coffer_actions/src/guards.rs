// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Built-in interaction guards.
//!
//! Menu constructors call [`register_default_guards`] on the registry they
//! own, before any user action is added. The guards translate clicks and drags
//! that the menu's [`Modifiers`](crate::Modifiers) deny into cancelled semantic
//! events, which cancels the host event.

use tracing::debug;

use crate::action;
use crate::dispatch::Actions;
use crate::event::{Cancellable, ClickEvent, DragEvent};
use crate::menu::MenuView;
use crate::semantic::{DragAttempt, SlotModification};

/// Register the click and drag guards on `actions`.
pub fn register_default_guards<C: MenuView + ?Sized + 'static>(actions: &mut Actions<C>) {
    actions.add_action(
        action::on::<ClickEvent>()
            .translate(|click: &ClickEvent, menu: &C| {
                SlotModification::new(
                    click.viewer,
                    click.slot,
                    click.action,
                    click.region,
                    menu.modifiers().denies(click),
                )
            })
            .when(|click, menu| !menu.modifiers().denies(click).is_empty())
            .then(|modification| {
                debug!(
                    slot = modification.slot,
                    action = ?modification.action,
                    denied_by = ?modification.denied_by,
                    "click denied"
                );
                modification.set_cancelled(true);
            }),
    );
    actions.add_action(
        action::on::<DragEvent>()
            .translate(|drag: &DragEvent, _: &C| DragAttempt::new(drag.viewer, drag.raw_slots.clone()))
            .when(|drag, menu| menu.modifiers().denies_drag(drag, menu.size()))
            .then(|attempt| {
                debug!(slots = attempt.raw_slots.len(), "drag denied");
                attempt.set_cancelled(true);
            }),
    );
}
