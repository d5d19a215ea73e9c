// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host interaction events and the traits dispatch relies on.
//!
//! ## Overview
//!
//! The host raises four kinds of raw events on a menu: [`ClickEvent`],
//! [`DragEvent`], [`OpenEvent`], and [`CloseEvent`]. Dispatch only needs each
//! event's runtime type ([`EventKind`]) and, for cancellable events, a way to
//! mark them cancelled so the host undoes the interaction.
//!
//! ## Click classification
//!
//! [`ClickEvent`] carries the host's raw [`ClickAction`] and the [`Region`]
//! that was clicked. The `is_*` helpers classify a click from the menu's
//! point of view:
//!
//! | Helper | Region | Actions |
//! |---|---|---|
//! | `is_place` | `Menu` | `PlaceOne`, `PlaceSome`, `PlaceAll` |
//! | `is_place` | `Player` | `MoveToOtherInventory` |
//! | `is_take` | `Menu` | pickups, `CollectToCursor`, `HotbarSwap`, `MoveToOtherInventory` |
//! | `is_swap` | `Menu` | `HotbarSwap`, `SwapWithCursor`, `HotbarMoveAndReadd` |
//! | `is_drop` | `Menu` | the four drop actions |
//! | `is_clone` | `Menu` | `CloneStack`, `Unknown` |
//!
//! Clicks outside the window, or plain clicks in the viewer's own inventory,
//! never modify the menu.

use core::any::{Any, TypeId};
use core::fmt;

use coffer_contents::ViewerId;
use coffer_slots::Slot;

/// An event that can be cancelled.
pub trait Cancellable {
    /// Whether the event is cancelled.
    fn is_cancelled(&self) -> bool;

    /// Cancel or un-cancel the event.
    fn set_cancelled(&mut self, cancelled: bool);
}

/// A raw event delivered by the host.
///
/// Only types implementing this trait can be registered against, so a rule
/// for a non-event type is rejected when it is compiled.
pub trait HostEvent: Any + Send {
    /// Cancellation state, if this event type can be cancelled.
    fn as_cancellable_mut(&mut self) -> Option<&mut dyn Cancellable> {
        None
    }
}

/// A library-level event produced by translating a host event.
pub trait SemanticEvent: Any + Send {
    /// Cancellation state, if this event type can be cancelled.
    fn as_cancellable(&self) -> Option<&dyn Cancellable> {
        None
    }
}

/// Runtime type tag of an event.
#[derive(Copy, Clone)]
pub struct EventKind {
    id: TypeId,
    name: &'static str,
}

impl EventKind {
    /// Tag of `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    /// Type identifier.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Type name, for logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this tags `T`.
    pub fn is<T: Any>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for EventKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for EventKind {}

impl core::hash::Hash for EventKind {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Inventory actions the host reports for a click.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ClickAction {
    /// Nothing happens.
    Nothing,
    /// Pick up the whole stack.
    PickupAll,
    /// Pick up part of the stack.
    PickupSome,
    /// Pick up half the stack.
    PickupHalf,
    /// Pick up one item.
    PickupOne,
    /// Place the whole cursor stack.
    PlaceAll,
    /// Place part of the cursor stack.
    PlaceSome,
    /// Place one item.
    PlaceOne,
    /// Exchange the cursor stack with the slot.
    SwapWithCursor,
    /// Drop the whole cursor stack.
    DropAllCursor,
    /// Drop one item from the cursor.
    DropOneCursor,
    /// Drop the whole slot.
    DropAllSlot,
    /// Drop one item from the slot.
    DropOneSlot,
    /// Shift-click into the other inventory.
    MoveToOtherInventory,
    /// Hotbar key moved an item and re-added the previous one.
    HotbarMoveAndReadd,
    /// Hotbar key swapped with the slot.
    HotbarSwap,
    /// Creative-mode middle click.
    CloneStack,
    /// Double click gathering matching items.
    CollectToCursor,
    /// The host could not classify the action.
    Unknown,
}

impl ClickAction {
    const fn takes(self) -> bool {
        matches!(
            self,
            Self::PickupOne
                | Self::PickupSome
                | Self::PickupHalf
                | Self::PickupAll
                | Self::CollectToCursor
                | Self::HotbarSwap
                | Self::MoveToOtherInventory
        )
    }

    const fn places(self) -> bool {
        matches!(self, Self::PlaceOne | Self::PlaceSome | Self::PlaceAll)
    }

    const fn swaps(self) -> bool {
        matches!(
            self,
            Self::HotbarSwap | Self::SwapWithCursor | Self::HotbarMoveAndReadd
        )
    }

    const fn drops(self) -> bool {
        matches!(
            self,
            Self::DropOneSlot | Self::DropAllSlot | Self::DropOneCursor | Self::DropAllCursor
        )
    }

    const fn clones(self) -> bool {
        matches!(self, Self::CloneStack | Self::Unknown)
    }
}

/// Where a click landed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The menu's own slots.
    Menu,
    /// The viewer's inventory below the menu.
    Player,
    /// Outside the window.
    Outside,
}

/// A click in or around an open menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent {
    /// Clicking viewer.
    pub viewer: ViewerId,
    /// Slot index within the clicked region.
    pub slot: usize,
    /// Raw inventory action.
    pub action: ClickAction,
    /// Clicked region.
    pub region: Region,
    cancelled: bool,
}

impl ClickEvent {
    /// A click that is not yet cancelled.
    pub fn new(viewer: ViewerId, slot: usize, action: ClickAction, region: Region) -> Self {
        Self {
            viewer,
            slot,
            action,
            region,
            cancelled: false,
        }
    }

    /// A plain left click on a menu slot.
    pub fn menu(viewer: ViewerId, slot: usize) -> Self {
        Self::new(viewer, slot, ClickAction::PickupAll, Region::Menu)
    }

    /// Whether the click landed on the menu's own slots.
    pub fn is_menu_click(&self) -> bool {
        self.region == Region::Menu
    }

    /// Clicked slot as `(row, column)` for a grid of `columns` columns.
    pub fn position(&self, columns: usize) -> Slot {
        Slot::from_index(self.slot, columns)
    }

    /// Whether the click puts an item into the menu.
    pub fn is_place(&self) -> bool {
        match self.region {
            Region::Menu => self.action.places(),
            Region::Player => self.action == ClickAction::MoveToOtherInventory,
            Region::Outside => false,
        }
    }

    /// Whether the click takes an item out of the menu.
    pub fn is_take(&self) -> bool {
        self.region == Region::Menu && self.action.takes()
    }

    /// Whether the click swaps a menu item with another stack.
    pub fn is_swap(&self) -> bool {
        self.region == Region::Menu && self.action.swaps()
    }

    /// Whether the click drops a menu item.
    pub fn is_drop(&self) -> bool {
        self.region == Region::Menu && self.action.drops()
    }

    /// Whether the click clones a menu item.
    pub fn is_clone(&self) -> bool {
        self.region == Region::Menu && self.action.clones()
    }
}

impl Cancellable for ClickEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

impl HostEvent for ClickEvent {
    fn as_cancellable_mut(&mut self) -> Option<&mut dyn Cancellable> {
        Some(self)
    }
}

// Plain click listeners receive a copy of the host click.
impl SemanticEvent for ClickEvent {
    fn as_cancellable(&self) -> Option<&dyn Cancellable> {
        Some(self)
    }
}

/// Items dragged across one or more slots.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEvent {
    /// Dragging viewer.
    pub viewer: ViewerId,
    /// Raw slot indices: menu slots first (`0..menu size`), then the viewer's inventory.
    pub raw_slots: Vec<usize>,
    cancelled: bool,
}

impl DragEvent {
    /// A drag that is not yet cancelled.
    pub fn new(viewer: ViewerId, raw_slots: Vec<usize>) -> Self {
        Self {
            viewer,
            raw_slots,
            cancelled: false,
        }
    }

    /// Whether any dragged slot belongs to a menu of `menu_size` slots.
    pub fn touches_menu(&self, menu_size: usize) -> bool {
        self.raw_slots.iter().any(|&slot| slot < menu_size)
    }
}

impl Cancellable for DragEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

impl HostEvent for DragEvent {
    fn as_cancellable_mut(&mut self) -> Option<&mut dyn Cancellable> {
        Some(self)
    }
}

/// A viewer opened the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenEvent {
    /// Opening viewer.
    pub viewer: ViewerId,
}

impl OpenEvent {
    /// Open by `viewer`.
    pub fn new(viewer: ViewerId) -> Self {
        Self { viewer }
    }
}

impl HostEvent for OpenEvent {}

/// Why a menu closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CloseReason {
    /// The viewer closed it.
    Player,
    /// Another window replaced it.
    OpenNew,
    /// The viewer disconnected.
    Disconnect,
    /// Closed by the server or a plugin.
    Plugin,
    /// Anything else.
    Unknown,
}

/// A viewer closed the menu.
///
/// Cancelling a close asks the menu owner to reopen the menu.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseEvent {
    /// Closing viewer.
    pub viewer: ViewerId,
    /// Why it closed.
    pub reason: CloseReason,
    cancelled: bool,
}

impl CloseEvent {
    /// A close that is not yet cancelled.
    pub fn new(viewer: ViewerId, reason: CloseReason) -> Self {
        Self {
            viewer,
            reason,
            cancelled: false,
        }
    }
}

impl Cancellable for CloseEvent {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

impl HostEvent for CloseEvent {
    fn as_cancellable_mut(&mut self) -> Option<&mut dyn Cancellable> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(action: ClickAction, region: Region) -> ClickEvent {
        ClickEvent::new(ViewerId::random(), 0, action, region)
    }

    #[test]
    fn place_covers_both_directions() {
        assert!(click(ClickAction::PlaceAll, Region::Menu).is_place());
        assert!(click(ClickAction::MoveToOtherInventory, Region::Player).is_place());
        assert!(!click(ClickAction::PlaceAll, Region::Player).is_place());
        assert!(!click(ClickAction::PickupAll, Region::Menu).is_place());
        assert!(!click(ClickAction::PlaceAll, Region::Outside).is_place());
    }

    #[test]
    fn take_swap_drop_clone_need_the_menu_region() {
        for region in [Region::Player, Region::Outside] {
            assert!(!click(ClickAction::PickupAll, region).is_take());
            assert!(!click(ClickAction::HotbarSwap, region).is_swap());
            assert!(!click(ClickAction::DropAllSlot, region).is_drop());
            assert!(!click(ClickAction::CloneStack, region).is_clone());
        }
        assert!(click(ClickAction::MoveToOtherInventory, Region::Menu).is_take());
        assert!(click(ClickAction::HotbarSwap, Region::Menu).is_take());
        assert!(click(ClickAction::HotbarSwap, Region::Menu).is_swap());
        assert!(click(ClickAction::DropOneCursor, Region::Menu).is_drop());
        assert!(click(ClickAction::Unknown, Region::Menu).is_clone());
        assert!(!click(ClickAction::Nothing, Region::Menu).is_take());
    }

    #[test]
    fn drag_touches_menu_by_raw_slot() {
        let drag = DragEvent::new(ViewerId::random(), vec![30, 31]);
        assert!(!drag.touches_menu(27));
        assert!(drag.touches_menu(36));
    }

    #[test]
    fn kinds_compare_by_type() {
        assert_eq!(EventKind::of::<ClickEvent>(), EventKind::of::<ClickEvent>());
        assert_ne!(EventKind::of::<ClickEvent>(), EventKind::of::<DragEvent>());
        assert!(EventKind::of::<OpenEvent>().is::<OpenEvent>());
        assert!(EventKind::of::<CloseEvent>().name().ends_with("CloseEvent"));
    }

    #[test]
    fn cancellation_flags() {
        let mut open = OpenEvent::new(ViewerId::random());
        assert!(open.as_cancellable_mut().is_none());
        let mut close = CloseEvent::new(ViewerId::random(), CloseReason::Player);
        if let Some(state) = close.as_cancellable_mut() {
            state.set_cancelled(true);
        }
        assert!(close.is_cancelled());
        close.set_cancelled(false);
        assert!(!close.is_cancelled());
    }

    #[test]
    fn click_position_uses_columns() {
        let mut c = click(ClickAction::PickupAll, Region::Menu);
        c.slot = 22;
        assert_eq!(c.position(9), Slot::new(2, 4));
    }
}
