// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Actions: translation rules from host events to semantic events.
//!
//! ## Overview
//!
//! An [`Action`] reacts to one host event type `H` in a context `C` (usually
//! the menu receiving the event). When it runs it:
//!
//! 1. evaluates its predicate over `(&H, &C)`; `false` skips it without translating,
//! 2. translates the host event into a semantic event `S`,
//! 3. hands `S` to its consumer, inline or on a [`Spawner`],
//! 4. if `S` ended up cancelled, cancels the host event and calls the cancellation hook.
//!
//! Actions are built with [`on`] and registered on an
//! [`Actions`](crate::dispatch::Actions) registry, which runs them in
//! registration order.
//!
//! ```rust
//! use coffer_actions::action;
//! use coffer_actions::event::{Cancellable, ClickEvent, Region};
//! use coffer_actions::semantic::DragAttempt;
//!
//! // Every click outside the window becomes a cancelled drag attempt.
//! let rule = action::on::<ClickEvent>()
//!     .translate(|click, _: &()| DragAttempt::new(click.viewer, vec![click.slot]))
//!     .when(|click, _| click.region == Region::Outside)
//!     .then(|attempt| attempt.set_cancelled(true));
//! assert!(!rule.ignores_cancelled());
//! ```

use core::any::Any;
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::event::{EventKind, HostEvent, SemanticEvent};
use crate::spawn::Spawner;

type Translate<H, S, C> = Box<dyn Fn(&H, &C) -> Option<S> + Send + Sync>;
type Predicate<H, C> = Box<dyn Fn(&H, &C) -> bool + Send + Sync>;
type Consumer<S> = Arc<dyn Fn(&mut S) + Send + Sync>;
type CancelHook<S> = Box<dyn Fn(&S) + Send + Sync>;

/// Start building an action reacting to host events of type `H`.
///
/// Only [`HostEvent`] types are accepted, so registering against anything
/// else fails to compile.
pub fn on<H: HostEvent>() -> Untranslated<H> {
    Untranslated {
        _host: PhantomData,
    }
}

/// An action under construction that still needs its translation.
#[derive(Debug)]
pub struct Untranslated<H> {
    _host: PhantomData<fn() -> H>,
}

impl<H: HostEvent> Untranslated<H> {
    /// Translate every matching host event with `f`.
    pub fn translate<S, C, F>(self, f: F) -> Action<H, S, C>
    where
        S: SemanticEvent,
        C: ?Sized,
        F: Fn(&H, &C) -> S + Send + Sync + 'static,
    {
        Action::from_translation(Box::new(move |host: &H, ctx: &C| Some(f(host, ctx))))
    }

    /// Translate with `f`, skipping the action when `f` returns `None`.
    ///
    /// A `None` counts the same as a failed predicate.
    pub fn filter_map<S, C, F>(self, f: F) -> Action<H, S, C>
    where
        S: SemanticEvent,
        C: ?Sized,
        F: Fn(&H, &C) -> Option<S> + Send + Sync + 'static,
    {
        Action::from_translation(Box::new(f))
    }
}

impl<H: HostEvent + SemanticEvent + Clone> Untranslated<H> {
    /// Hand consumers a copy of the host event itself.
    pub fn identity<C: ?Sized>(self) -> Action<H, H, C> {
        Action::from_translation(Box::new(|host: &H, _: &C| Some(host.clone())))
    }
}

/// A translation rule from host events `H` to semantic events `S`, evaluated in context `C`.
pub struct Action<H, S, C: ?Sized> {
    translate: Translate<H, S, C>,
    predicate: Option<Predicate<H, C>>,
    consumer: Option<Consumer<S>>,
    on_cancel: Option<CancelHook<S>>,
    ignore_cancelled: bool,
    run_async: bool,
}

impl<H, S, C: ?Sized> fmt::Debug for Action<H, S, C>
where
    H: HostEvent,
    S: SemanticEvent,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("host", &EventKind::of::<H>())
            .field("semantic", &EventKind::of::<S>())
            .field("ignore_cancelled", &self.ignore_cancelled)
            .field("run_async", &self.run_async)
            .finish_non_exhaustive()
    }
}

impl<H, S, C: ?Sized> Action<H, S, C>
where
    H: HostEvent,
    S: SemanticEvent,
{
    fn from_translation(translate: Translate<H, S, C>) -> Self {
        Self {
            translate,
            predicate: None,
            consumer: None,
            on_cancel: None,
            ignore_cancelled: false,
            run_async: false,
        }
    }

    /// Only run when `predicate` holds. Replaces any earlier predicate.
    pub fn when(mut self, predicate: impl Fn(&H, &C) -> bool + Send + Sync + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Consume the translated event. Without a consumer the action does nothing
    /// beyond translating.
    pub fn then(mut self, consumer: impl Fn(&mut S) + Send + Sync + 'static) -> Self {
        self.consumer = Some(Arc::new(consumer));
        self
    }

    /// Called with the translated event when a synchronous consumer cancelled it.
    pub fn on_cancel(mut self, hook: impl Fn(&S) + Send + Sync + 'static) -> Self {
        self.on_cancel = Some(Box::new(hook));
        self
    }

    /// Run even after an earlier action in the same round cancelled the event.
    pub fn ignore_cancelled(mut self, ignore: bool) -> Self {
        self.ignore_cancelled = ignore;
        self
    }

    /// Hand the consumer to the registry's spawner instead of running it inline.
    ///
    /// An async consumer cannot cancel anything: dispatch has already moved on.
    pub fn run_async(mut self, run_async: bool) -> Self {
        self.run_async = run_async;
        self
    }

    /// Whether this action runs after a cancellation.
    pub fn ignores_cancelled(&self) -> bool {
        self.ignore_cancelled
    }

    /// Whether the consumer runs on the spawner.
    pub fn is_async(&self) -> bool {
        self.run_async
    }
}

/// Result of running one action.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Step {
    /// The predicate or the translation declined.
    Skipped,
    /// The consumer ran or was handed off.
    Invoked {
        /// Whether the translated event ended up cancelled.
        cancelled: bool,
    },
}

/// An [`Action`] with its event types erased, so one registry can hold them all.
pub(crate) trait ErasedAction<C: ?Sized>: Send + Sync {
    fn host_kind(&self) -> EventKind;

    fn semantic_kind(&self) -> EventKind;

    fn ignores_cancelled(&self) -> bool;

    /// `host` must be of the action's host type; anything else is skipped.
    fn run(&self, host: &mut dyn Any, ctx: &C, spawner: &dyn Spawner) -> Step;
}

impl<H, S, C: ?Sized> ErasedAction<C> for Action<H, S, C>
where
    H: HostEvent,
    S: SemanticEvent,
{
    fn host_kind(&self) -> EventKind {
        EventKind::of::<H>()
    }

    fn semantic_kind(&self) -> EventKind {
        EventKind::of::<S>()
    }

    fn ignores_cancelled(&self) -> bool {
        self.ignore_cancelled
    }

    fn run(&self, host: &mut dyn Any, ctx: &C, spawner: &dyn Spawner) -> Step {
        let Some(host) = host.downcast_mut::<H>() else {
            return Step::Skipped;
        };
        if self
            .predicate
            .as_ref()
            .is_some_and(|predicate| !predicate(&*host, ctx))
        {
            return Step::Skipped;
        }
        let Some(mut semantic) = (self.translate)(&*host, ctx) else {
            return Step::Skipped;
        };

        if self.run_async {
            if let Some(consumer) = &self.consumer {
                let consumer = Arc::clone(consumer);
                spawner.spawn(Box::new(move || consumer(&mut semantic)));
            }
            return Step::Invoked { cancelled: false };
        }

        if let Some(consumer) = &self.consumer {
            consumer(&mut semantic);
        }
        let cancelled = semantic
            .as_cancellable()
            .is_some_and(|state| state.is_cancelled());
        if cancelled {
            if let Some(state) = host.as_cancellable_mut() {
                state.set_cancelled(true);
            }
            if let Some(hook) = &self.on_cancel {
                hook(&semantic);
            }
        }
        Step::Invoked { cancelled }
    }
}
