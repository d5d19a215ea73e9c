// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Type-keyed action registry and the dispatch round.
//!
//! ## Overview
//!
//! [`Actions`] maps each host event type to the ordered list of actions
//! registered for it. [`Actions::dispatch`] runs one round for one host event:
//!
//! - Only actions registered for the event's exact type run.
//! - Actions run in registration order; that order is the only priority.
//! - Once an action cancels, later actions are pre-empted unless they ignore
//!   cancellation.
//! - A cancelled translation cancels the host event as well.
//!
//! The [`DispatchReport`] lists which semantic event types were cancelled and
//! which were pre-empted, so callers can react to a specific veto.

use core::any::TypeId;
use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::trace;

use crate::action::{self, Action, ErasedAction, Step};
use crate::event::{
    ClickEvent, CloseEvent, DragEvent, EventKind, HostEvent, OpenEvent, Region, SemanticEvent,
};
use crate::semantic::{DragAttempt, MenuCloseEvent, MenuOpenEvent};
use crate::spawn::{Spawner, default_spawner};

/// What one dispatch round did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Whether any action cancelled.
    pub cancelled: bool,
    /// Semantic event types that ended up cancelled, in first-cancelled order.
    pub cancelled_kinds: Vec<EventKind>,
    /// Semantic event types of actions skipped because of an earlier cancellation.
    pub preempted: Vec<EventKind>,
    /// Number of actions whose consumer ran or was handed off.
    pub invoked: usize,
}

impl DispatchReport {
    /// Whether an action translating to `S` cancelled.
    pub fn was_cancelled<S: SemanticEvent>(&self) -> bool {
        self.cancelled_kinds.iter().any(EventKind::is::<S>)
    }

    /// Whether an action translating to `S` was pre-empted.
    pub fn was_preempted<S: SemanticEvent>(&self) -> bool {
        self.preempted.iter().any(EventKind::is::<S>)
    }
}

/// Registry of actions evaluated in context `C`.
///
/// Menus own one registry each, with `C` the menu's view trait object.
/// Async consumers go to the registry's [`Spawner`].
pub struct Actions<C: ?Sized + 'static> {
    by_kind: HashMap<TypeId, Vec<Box<dyn ErasedAction<C>>>>,
    spawner: Arc<dyn Spawner>,
}

impl<C: ?Sized + 'static> fmt::Debug for Actions<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kinds: Vec<EventKind> = self
            .by_kind
            .values()
            .filter_map(|list| list.first().map(|action| action.host_kind()))
            .collect();
        f.debug_struct("Actions")
            .field("kinds", &kinds)
            .field("action_count", &self.action_count())
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized + 'static> Default for Actions<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized + 'static> Actions<C> {
    /// Empty registry using the process-wide [`default_spawner`].
    pub fn new() -> Self {
        Self::with_spawner(default_spawner())
    }

    /// Empty registry handing async work to `spawner`.
    pub fn with_spawner(spawner: Arc<dyn Spawner>) -> Self {
        Self {
            by_kind: HashMap::new(),
            spawner,
        }
    }

    /// Spawner for async consumers.
    pub fn spawner(&self) -> &Arc<dyn Spawner> {
        &self.spawner
    }

    /// Replace the spawner. Already spawned work is unaffected.
    pub fn set_spawner(&mut self, spawner: Arc<dyn Spawner>) {
        self.spawner = spawner;
    }

    /// Append `action` to the list for its host event type.
    pub fn add_action<H, S>(&mut self, action: Action<H, S, C>)
    where
        H: HostEvent,
        S: SemanticEvent,
    {
        trace!(
            host = EventKind::of::<H>().name(),
            semantic = EventKind::of::<S>().name(),
            "action registered"
        );
        self.by_kind
            .entry(TypeId::of::<H>())
            .or_default()
            .push(Box::new(action));
    }

    /// Drop every action registered for `H`. Returns how many were removed.
    pub fn remove_actions_for<H: HostEvent>(&mut self) -> usize {
        let removed = self
            .by_kind
            .remove(&TypeId::of::<H>())
            .map_or(0, |list| list.len());
        trace!(host = EventKind::of::<H>().name(), removed, "actions removed");
        removed
    }

    /// Whether any action is registered for `H`.
    pub fn has_actions_for<H: HostEvent>(&self) -> bool {
        self.by_kind
            .get(&TypeId::of::<H>())
            .is_some_and(|list| !list.is_empty())
    }

    /// Number of actions registered for `H`.
    pub fn actions_for<H: HostEvent>(&self) -> usize {
        self.by_kind.get(&TypeId::of::<H>()).map_or(0, Vec::len)
    }

    /// Total number of registered actions.
    pub fn action_count(&self) -> usize {
        self.by_kind.values().map(Vec::len).sum()
    }

    /// Run one dispatch round for `event` in context `ctx`.
    pub fn dispatch<H: HostEvent>(&self, event: &mut H, ctx: &C) -> DispatchReport {
        let mut report = DispatchReport::default();
        let Some(actions) = self.by_kind.get(&TypeId::of::<H>()) else {
            return report;
        };
        for action in actions {
            if report.cancelled && !action.ignores_cancelled() {
                report.preempted.push(action.semantic_kind());
                continue;
            }
            match action.run(&mut *event, ctx, &*self.spawner) {
                Step::Skipped => {}
                Step::Invoked { cancelled } => {
                    report.invoked += 1;
                    if cancelled {
                        report.cancelled = true;
                        let kind = action.semantic_kind();
                        if !report.cancelled_kinds.contains(&kind) {
                            report.cancelled_kinds.push(kind);
                        }
                    }
                }
            }
        }
        trace!(
            event = EventKind::of::<H>().name(),
            invoked = report.invoked,
            cancelled = report.cancelled,
            preempted = report.preempted.len(),
            "dispatch round"
        );
        report
    }

    /// React to every click, in any region.
    pub fn on_click(&mut self, f: impl Fn(&mut ClickEvent) + Send + Sync + 'static) {
        self.add_action(action::on::<ClickEvent>().identity::<C>().then(f));
    }

    /// React to clicks on the menu's own slots.
    pub fn on_top_click(&mut self, f: impl Fn(&mut ClickEvent) + Send + Sync + 'static) {
        self.add_action(
            action::on::<ClickEvent>()
                .identity::<C>()
                .when(|click, _| click.region == Region::Menu)
                .then(f),
        );
    }

    /// React to clicks in the viewer's own inventory.
    pub fn on_bottom_click(&mut self, f: impl Fn(&mut ClickEvent) + Send + Sync + 'static) {
        self.add_action(
            action::on::<ClickEvent>()
                .identity::<C>()
                .when(|click, _| click.region == Region::Player)
                .then(f),
        );
    }

    /// React to drags. Cancelling the attempt cancels the drag.
    pub fn on_drag(&mut self, f: impl Fn(&mut DragAttempt) + Send + Sync + 'static) {
        self.add_action(
            action::on::<DragEvent>()
                .translate(|drag: &DragEvent, _: &C| DragAttempt::new(drag.viewer, drag.raw_slots.clone()))
                .then(f),
        );
    }

    /// React to the menu opening.
    pub fn on_open(&mut self, f: impl Fn(&mut MenuOpenEvent) + Send + Sync + 'static) {
        self.add_action(
            action::on::<OpenEvent>()
                .translate(|open: &OpenEvent, _: &C| MenuOpenEvent {
                    viewer: open.viewer,
                })
                .then(f),
        );
    }

    /// React to the menu closing. Cancelling the close reopens the menu.
    pub fn on_close(&mut self, f: impl Fn(&mut MenuCloseEvent) + Send + Sync + 'static) {
        self.add_action(
            action::on::<CloseEvent>()
                .translate(|close: &CloseEvent, _: &C| MenuCloseEvent::new(close.viewer, close.reason))
                .then(f),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Cancellable, ClickAction, CloseReason};
    use crate::semantic::SlotModification;
    use crate::modifiers::Modifiers;
    use crate::spawn::{Immediate, Worker};
    use coffer_contents::ViewerId;
    use crossbeam_channel::unbounded;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Semantic markers so each test action has its own kind.
    macro_rules! marker {
        ($($name:ident),*) => {
            $(
                #[derive(Debug, Default)]
                struct $name {
                    cancelled: bool,
                }

                impl Cancellable for $name {
                    fn is_cancelled(&self) -> bool {
                        self.cancelled
                    }

                    fn set_cancelled(&mut self, cancelled: bool) {
                        self.cancelled = cancelled;
                    }
                }

                impl SemanticEvent for $name {
                    fn as_cancellable(&self) -> Option<&dyn Cancellable> {
                        Some(self)
                    }
                }
            )*
        };
    }

    marker!(A, B, C);

    type Log = Arc<Mutex<Vec<&'static str>>>;

    fn registry() -> Actions<()> {
        Actions::with_spawner(Arc::new(Immediate))
    }

    fn logging<S: SemanticEvent + Default + Cancellable>(
        log: &Log,
        name: &'static str,
        cancel: bool,
    ) -> Action<ClickEvent, S, ()> {
        let log = Arc::clone(log);
        action::on::<ClickEvent>()
            .translate(|_: &ClickEvent, _: &()| S::default())
            .then(move |event: &mut S| {
                log.lock().unwrap().push(name);
                if cancel {
                    event.set_cancelled(true);
                }
            })
    }

    fn click() -> ClickEvent {
        ClickEvent::menu(ViewerId::random(), 4)
    }

    #[test]
    fn cancellation_preempts_later_actions() {
        let log: Log = Arc::default();
        let mut actions = registry();
        actions.add_action(logging::<A>(&log, "a", false));
        actions.add_action(logging::<B>(&log, "b", true));
        actions.add_action(logging::<C>(&log, "c", false));

        let mut event = click();
        let report = actions.dispatch(&mut event, &());
        assert_eq!(*log.lock().unwrap(), ["a", "b"]);
        assert!(report.cancelled);
        assert!(report.was_cancelled::<B>());
        assert!(report.was_preempted::<C>());
        assert!(!report.was_preempted::<A>());
        assert_eq!(report.invoked, 2);
        assert!(event.is_cancelled());
    }

    #[test]
    fn ignoring_cancellation_still_runs() {
        let log: Log = Arc::default();
        let mut actions = registry();
        actions.add_action(logging::<A>(&log, "a", true));
        actions.add_action(logging::<B>(&log, "b", false).ignore_cancelled(true));
        actions.add_action(logging::<C>(&log, "c", false));

        let report = actions.dispatch(&mut click(), &());
        assert_eq!(*log.lock().unwrap(), ["a", "b"]);
        assert_eq!(report.cancelled_kinds, [EventKind::of::<A>()]);
        assert_eq!(report.preempted, [EventKind::of::<C>()]);
    }

    #[test]
    fn only_the_exact_event_type_is_dispatched() {
        let log: Log = Arc::default();
        let mut actions = registry();
        actions.add_action(logging::<A>(&log, "a", true));
        let mut drag = DragEvent::new(ViewerId::random(), vec![1]);
        let report = actions.dispatch(&mut drag, &());
        assert_eq!(report, DispatchReport::default());
        assert!(log.lock().unwrap().is_empty());
        assert!(!drag.is_cancelled());
    }

    #[test]
    fn removal_is_per_host_type() {
        let log: Log = Arc::default();
        let mut actions = registry();
        actions.add_action(logging::<A>(&log, "a", false));
        actions.add_action(logging::<B>(&log, "b", false));
        actions.on_drag(|_| {});
        assert_eq!(actions.action_count(), 3);
        assert_eq!(actions.actions_for::<ClickEvent>(), 2);

        assert_eq!(actions.remove_actions_for::<ClickEvent>(), 2);
        assert!(!actions.has_actions_for::<ClickEvent>());
        assert!(actions.has_actions_for::<DragEvent>());
        assert_eq!(actions.remove_actions_for::<OpenEvent>(), 0);
        assert_eq!(actions.action_count(), 1);
    }

    #[test]
    fn region_filters_on_clicks() {
        let log: Log = Arc::default();
        let mut actions = registry();
        let top = Arc::clone(&log);
        actions.on_top_click(move |_| top.lock().unwrap().push("top"));
        let bottom = Arc::clone(&log);
        actions.on_bottom_click(move |_| bottom.lock().unwrap().push("bottom"));
        let any = Arc::clone(&log);
        actions.on_click(move |_| any.lock().unwrap().push("any"));

        let mut player = ClickEvent::new(ViewerId::random(), 0, ClickAction::PickupAll, Region::Player);
        actions.dispatch(&mut player, &());
        assert_eq!(*log.lock().unwrap(), ["bottom", "any"]);
    }

    #[test]
    fn identity_clicks_cancel_the_host_click() {
        let mut actions = registry();
        actions.on_click(|click| click.set_cancelled(true));
        let mut event = click();
        let report = actions.dispatch(&mut event, &());
        assert!(event.is_cancelled());
        assert!(report.was_cancelled::<ClickEvent>());
    }

    #[test]
    fn close_listeners_can_refuse() {
        let mut actions = registry();
        actions.on_close(|close| {
            if close.reason == CloseReason::Player {
                close.set_cancelled(true);
            }
        });
        let mut by_player = CloseEvent::new(ViewerId::random(), CloseReason::Player);
        let mut by_plugin = CloseEvent::new(ViewerId::random(), CloseReason::Plugin);
        actions.dispatch(&mut by_player, &());
        actions.dispatch(&mut by_plugin, &());
        assert!(by_player.is_cancelled());
        assert!(!by_plugin.is_cancelled());
    }

    #[test]
    fn context_reaches_predicates() {
        let mut actions: Actions<Modifiers> = Actions::with_spawner(Arc::new(Immediate));
        actions.add_action(
            action::on::<ClickEvent>()
                .translate(|click: &ClickEvent, mods: &Modifiers| {
                    SlotModification::new(click.viewer, click.slot, click.action, click.region, mods.denies(click))
                })
                .when(|click, mods| !mods.denies(click).is_empty())
                .then(|modification| modification.set_cancelled(true)),
        );
        let mut pickup = click();
        actions.dispatch(&mut pickup, &Modifiers::DISABLE_ITEM_ADD);
        assert!(!pickup.is_cancelled());
        actions.dispatch(&mut pickup, &Modifiers::DISABLE_ITEM_REMOVAL);
        assert!(pickup.is_cancelled());
    }

    #[test]
    fn async_actions_run_on_the_worker() {
        let worker = Worker::start("dispatch-test").unwrap();
        let mut actions: Actions<()> = Actions::with_spawner(Arc::new(worker));
        let (tx, rx) = unbounded();
        actions.add_action(
            action::on::<OpenEvent>()
                .translate(|open: &OpenEvent, _: &()| MenuOpenEvent { viewer: open.viewer })
                .then(move |open| tx.send(open.viewer).unwrap())
                .run_async(true),
        );
        let viewer = ViewerId::random();
        let report = actions.dispatch(&mut OpenEvent::new(viewer), &());
        assert_eq!(report.invoked, 1);
        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(viewer));
    }
}
