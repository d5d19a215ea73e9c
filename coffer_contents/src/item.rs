// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu items: identity, click handlers, and render-time visibility.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use uuid::Uuid;

use crate::viewport::RenderContext;

/// Handler run when a viewer clicks the slot holding an item.
pub type ClickHandler = Arc<dyn Fn(&mut ItemClick) + Send + Sync>;

/// Predicate deciding at render time whether an item is shown.
pub type Visibility = Arc<dyn Fn(&RenderContext) -> bool + Send + Sync>;

/// Identity of a viewer (the player looking at a menu).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewerId(pub Uuid);

impl ViewerId {
    /// A fresh random viewer id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Follow-up requested by a click handler, applied by the owning menu once
/// the handler returns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    /// Turn to the following page.
    NextPage,
    /// Turn to the preceding page.
    PreviousPage,
    /// Jump to the page at this position.
    GoToIndex(usize),
    /// Jump to the page with this key.
    GoToKey(String),
    /// Re-render the current contents.
    Refresh,
    /// Close the menu for the clicking viewer.
    Close,
}

/// What a click handler sees, and where it queues follow-up commands.
#[derive(Clone, Debug)]
pub struct ItemClick {
    slot: usize,
    viewer: ViewerId,
    commands: Vec<MenuCommand>,
}

impl ItemClick {
    /// Click on `slot` by `viewer`.
    pub fn new(slot: usize, viewer: ViewerId) -> Self {
        Self {
            slot,
            viewer,
            commands: Vec::new(),
        }
    }

    /// Clicked slot.
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Clicking viewer.
    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    /// Queue a command.
    pub fn push(&mut self, command: MenuCommand) {
        self.commands.push(command);
    }

    /// Queue [`MenuCommand::NextPage`].
    pub fn next_page(&mut self) {
        self.push(MenuCommand::NextPage);
    }

    /// Queue [`MenuCommand::PreviousPage`].
    pub fn previous_page(&mut self) {
        self.push(MenuCommand::PreviousPage);
    }

    /// Queue [`MenuCommand::Close`].
    pub fn close(&mut self) {
        self.push(MenuCommand::Close);
    }

    /// Commands queued so far.
    pub fn commands(&self) -> &[MenuCommand] {
        &self.commands
    }

    /// Drain the queued commands.
    pub fn take_commands(&mut self) -> Vec<MenuCommand> {
        core::mem::take(&mut self.commands)
    }
}

struct ItemInner {
    id: Uuid,
    key: String,
    on_click: RwLock<Option<ClickHandler>>,
    visibility: RwLock<Option<Visibility>>,
    run_async: AtomicBool,
}

/// An item placed in a slot.
///
/// `MenuItem` is a cheap handle: clones share the same item, and two handles
/// are equal exactly when they refer to the same item. The display key is
/// opaque to this crate; appearance lives with the host.
///
/// Handlers may be replaced after construction, which is how navigation
/// buttons get bound to their pagination.
#[derive(Clone)]
pub struct MenuItem {
    inner: Arc<ItemInner>,
}

impl MenuItem {
    /// A new item with a fresh identity.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ItemInner {
                id: Uuid::new_v4(),
                key: key.into(),
                on_click: RwLock::new(None),
                visibility: RwLock::new(None),
                run_async: AtomicBool::new(false),
            }),
        }
    }

    /// Set the click handler and return the item.
    pub fn with_click(self, handler: impl Fn(&mut ItemClick) + Send + Sync + 'static) -> Self {
        self.set_click_handler(handler);
        self
    }

    /// Set the visibility predicate and return the item.
    pub fn with_visibility(
        self,
        predicate: impl Fn(&RenderContext) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.set_visibility(predicate);
        self
    }

    /// Mark the click handler as fire-and-forget and return the item.
    pub fn with_async(self, run_async: bool) -> Self {
        self.inner.run_async.store(run_async, Ordering::Relaxed);
        self
    }

    /// Unique identity of this item.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Opaque display key.
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Whether the click handler should run off the event thread.
    pub fn runs_async(&self) -> bool {
        self.inner.run_async.load(Ordering::Relaxed)
    }

    /// Replace the click handler on every handle of this item.
    pub fn set_click_handler(&self, handler: impl Fn(&mut ItemClick) + Send + Sync + 'static) {
        *self
            .inner
            .on_click
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(handler));
    }

    /// Remove the click handler.
    pub fn clear_click_handler(&self) {
        *self
            .inner
            .on_click
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Current click handler, if any.
    pub fn click_handler(&self) -> Option<ClickHandler> {
        self.inner
            .on_click
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the visibility predicate.
    pub fn set_visibility(&self, predicate: impl Fn(&RenderContext) -> bool + Send + Sync + 'static) {
        *self
            .inner
            .visibility
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(predicate));
    }

    /// Run the click handler. Returns `false` if the item has none.
    ///
    /// The handler is cloned out of its lock first, so it may replace itself.
    pub fn click(&self, ctx: &mut ItemClick) -> bool {
        match self.click_handler() {
            Some(handler) => {
                handler(ctx);
                true
            }
            None => false,
        }
    }

    /// Whether the item is shown in `ctx`. Items without a predicate always are.
    pub fn is_visible(&self, ctx: &RenderContext) -> bool {
        let predicate = self
            .inner
            .visibility
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        predicate.is_none_or(|p| p(ctx))
    }
}

impl PartialEq for MenuItem {
    fn eq(&self, other: &Self) -> bool {
        self.inner.id == other.inner.id
    }
}

impl Eq for MenuItem {}

impl core::hash::Hash for MenuItem {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.inner.id.hash(state);
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("id", &self.inner.id)
            .field("key", &self.inner.key)
            .field("runs_async", &self.runs_async())
            .finish_non_exhaustive()
    }
}
