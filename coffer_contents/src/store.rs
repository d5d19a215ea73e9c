// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content stores: the slot → item mapping of one container or page.
//!
//! ## Overview
//!
//! [`SlotStore`] is the mutation surface menu builders work against.
//! [`Contents`] is the default single-owner store; it makes no thread-safety
//! promises. [`SharedContents`](crate::SharedContents) wraps one behind a lock
//! for containers touched from async handlers.
//!
//! ## Invariants
//!
//! - Every occupied index lies in `0..layout.size()`.
//! - Iteration is ascending by index.
//! - Failed calls change nothing.
//!
//! ## Insertion
//!
//! [`SlotStore::add_items`] walks a cursor forward through empty slots,
//! skipping `None` entries and slots that were already occupied. When the
//! cursor runs off the end the store grows by a row and continues; once the
//! layout is at its maximum the remainder is dropped. See
//! [`overflow`](crate::overflow).

use std::collections::btree_map;
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::sync::Arc;

use coffer_slots::{Direction, SlotIter};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::error::ContentsError;
use crate::item::MenuItem;
use crate::layout::Layout;
use crate::overflow::{Overflow, distribute};
use crate::viewport::RenderContext;

/// Producer for an item that is recomputed on every refresh.
pub type ItemSupplier = Arc<dyn Fn() -> MenuItem + Send + Sync>;

/// The content-store contract.
pub trait SlotStore {
    /// Current shape.
    fn layout(&self) -> Layout;

    /// Current number of slots.
    fn size(&self) -> usize {
        self.layout().size()
    }

    /// Item at `index`, if any.
    fn get(&self, index: usize) -> Option<MenuItem>;

    /// Put `item` at `index`, returning what was there. Never grows the store.
    fn set(&mut self, index: usize, item: MenuItem) -> Result<Option<MenuItem>, ContentsError>;

    /// Take the item out of `index`.
    fn remove(&mut self, index: usize) -> Option<MenuItem>;

    /// Whether `index` is occupied.
    fn has_item(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// First unoccupied index at or after `from`.
    fn first_empty_slot(&self, from: usize) -> Option<usize>;

    /// Insert items into empty slots at or after `from`, growing by rows if
    /// allowed. `None` entries are skipped. Returns the number placed.
    fn add_items_from<I>(&mut self, from: usize, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>;

    /// [`add_items_from`](Self::add_items_from) starting at slot zero.
    fn add_items<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        self.add_items_from(0, items)
    }

    /// Replace everything with `items`, laid out from slot zero.
    ///
    /// The count must fill whole rows and fit within the maximum rows. The
    /// store grows to hold a longer replacement; it never shrinks.
    fn replace_contents<I>(&mut self, items: I) -> Result<(), ContentsError>
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>;

    /// Remove every entry identity-equal to one of `items`. Returns whether
    /// anything was removed.
    fn remove_items(&mut self, items: &[MenuItem]) -> bool;

    /// Add rows. Returns `false` at the maximum.
    fn grow(&mut self, by_rows: usize) -> bool;

    /// Remove every item.
    fn clear(&mut self);

    /// Number of occupied slots.
    fn item_count(&self) -> usize;

    /// Snapshot of every `(index, item)` in ascending order.
    fn entries(&self) -> Vec<(usize, MenuItem)>;

    /// Visit every `(index, item)` in ascending order.
    fn for_each_indexed<F: FnMut(usize, &MenuItem)>(&self, f: F);

    /// Visit every item in ascending slot order.
    fn for_each<F: FnMut(&MenuItem)>(&self, mut f: F) {
        self.for_each_indexed(|_, item| f(item));
    }

    /// First entry, in ascending order, whose item matches.
    fn find_first<P: FnMut(&MenuItem) -> bool>(&self, mut predicate: P) -> Option<(usize, MenuItem)> {
        self.entries().into_iter().find(|(_, item)| predicate(item))
    }

    /// Put the same item into every slot of `slots`.
    ///
    /// All slots are checked before any is written.
    fn set_items(&mut self, slots: &[usize], item: &MenuItem) -> Result<(), ContentsError> {
        let layout = self.layout();
        for &slot in slots {
            layout.check(slot)?;
        }
        for &slot in slots {
            self.set(slot, item.clone())?;
        }
        Ok(())
    }

    /// Put `item` into every empty slot. Returns how many were filled.
    fn fill(&mut self, item: &MenuItem) -> usize {
        let empty: Vec<usize> = (0..self.size()).filter(|&i| !self.has_item(i)).collect();
        empty
            .into_iter()
            .filter(|&i| self.set(i, item.clone()).is_ok())
            .count()
    }

    /// Put `item` into every empty slot of the outer ring.
    fn fill_borders(&mut self, item: &MenuItem) -> usize {
        let layout = self.layout();
        let (rows, columns) = (layout.rows(), layout.columns());
        let border: Vec<usize> = (0..layout.size())
            .filter(|&i| {
                let (row, column) = coffer_slots::to_row_col(i, columns);
                row == 0 || row + 1 == rows || column == 0 || column + 1 == columns
            })
            .filter(|&i| !self.has_item(i))
            .collect();
        border
            .into_iter()
            .filter(|&i| self.set(i, item.clone()).is_ok())
            .count()
    }

    /// Put `item` into every slot of zero-based `row`, overwriting.
    fn fill_row(&mut self, row: usize, item: &MenuItem) -> Result<(), ContentsError> {
        let layout = self.layout();
        if row >= layout.rows() {
            return Err(ContentsError::RowOutOfRange {
                row,
                rows: layout.rows(),
            });
        }
        let start = coffer_slots::to_index(row, 0, layout.columns());
        let slots: Vec<usize> = (start..start + layout.columns()).collect();
        self.set_items(&slots, item)
    }

    /// Entries whose items are visible in `ctx`.
    fn visible_entries(&self, ctx: &RenderContext) -> Vec<(usize, MenuItem)> {
        let mut entries = self.entries();
        entries.retain(|(_, item)| item.is_visible(ctx));
        entries
    }

    /// Occupied entries in the order `direction` walks the grid.
    fn traverse(&self, direction: Direction) -> Vec<(usize, MenuItem)> {
        if direction == Direction::Horizontal {
            return self.entries();
        }
        let layout = self.layout();
        SlotIter::new(direction, layout.grid())
            .filter_map(|slot| {
                let index = slot.index(layout.columns());
                self.get(index).map(|item| (index, item))
            })
            .collect()
    }

    /// Place the supplier's item at `index` and remember the supplier for
    /// [`refresh_item`](Self::refresh_item). Returns the replaced item.
    fn set_refreshable(
        &mut self,
        index: usize,
        supplier: ItemSupplier,
    ) -> Result<Option<MenuItem>, ContentsError>;

    /// Forget the supplier at `index` and remove its item.
    fn remove_refreshable(&mut self, index: usize) -> Option<MenuItem>;

    /// Recompute the item at `index` from its supplier.
    fn refresh_item(&mut self, index: usize) -> Option<MenuItem>;

    /// Recompute every supplied item. Returns how many were refreshed.
    fn refresh_items(&mut self) -> usize;

    /// Whether concurrent readers and writers are safe.
    fn is_concurrent(&self) -> bool {
        false
    }
}

/// The default content store: an ordered map from slot to item.
#[derive(Clone)]
pub struct Contents {
    layout: Layout,
    items: BTreeMap<usize, MenuItem>,
    suppliers: BTreeMap<usize, ItemSupplier>,
}

impl fmt::Debug for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Contents")
            .field("layout", &self.layout)
            .field("items", &self.items)
            .field("suppliers", &self.suppliers.len())
            .finish()
    }
}

impl Contents {
    /// An empty store with the given shape.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            items: BTreeMap::new(),
            suppliers: BTreeMap::new(),
        }
    }

    /// Borrowing iterator over `(index, item)` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &MenuItem)> + '_ {
        self.items.iter().map(|(i, item)| (*i, item))
    }

    /// Borrowing walk over occupied entries in `direction` order.
    pub fn walk(&self, direction: Direction) -> Walk<'_> {
        let state = if direction == Direction::Horizontal {
            WalkState::Ordered(self.items.iter())
        } else {
            WalkState::Slots {
                slots: SlotIter::new(direction, self.layout.grid()),
                items: &self.items,
                columns: self.layout.columns(),
            }
        };
        Walk { state }
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Fill empty slots from `cursor` onward with items from the front of
    /// `pending`, advancing `cursor` past each filled slot.
    pub(crate) fn place_from(&mut self, cursor: &mut usize, pending: &mut VecDeque<MenuItem>) -> usize {
        let mut placed = 0;
        while !pending.is_empty() {
            let Some(slot) = self.first_empty_slot(*cursor) else {
                break;
            };
            let Some(item) = pending.pop_front() else {
                break;
            };
            self.items.insert(slot, item);
            *cursor = slot + 1;
            placed += 1;
        }
        placed
    }

    /// Supplier registered at `index`.
    pub(crate) fn supplier(&self, index: usize) -> Option<ItemSupplier> {
        self.suppliers.get(&index).cloned()
    }

    /// Every registered supplier, in ascending slot order.
    pub(crate) fn suppliers(&self) -> Vec<(usize, ItemSupplier)> {
        self.suppliers
            .iter()
            .map(|(&index, supplier)| (index, Arc::clone(supplier)))
            .collect()
    }

    /// Register `supplier` at `index` along with the item it already produced.
    pub(crate) fn install_refreshable(
        &mut self,
        index: usize,
        supplier: ItemSupplier,
        item: MenuItem,
    ) -> Result<Option<MenuItem>, ContentsError> {
        self.layout.check(index)?;
        self.suppliers.insert(index, supplier);
        Ok(self.items.insert(index, item))
    }

    /// Store a refreshed `item`, unless `supplier` was removed or replaced at
    /// `index` in the meantime.
    pub(crate) fn store_refreshed(&mut self, index: usize, supplier: &ItemSupplier, item: MenuItem) -> bool {
        let current = self
            .suppliers
            .get(&index)
            .is_some_and(|registered| Arc::ptr_eq(registered, supplier));
        if current {
            self.items.insert(index, item);
        }
        current
    }

    /// Copy every `(slot, item)` in `items` over the current entries.
    /// Slots outside the layout are skipped.
    pub(crate) fn overlay(&mut self, items: &BTreeMap<usize, MenuItem>) {
        for (&slot, item) in items {
            if self.layout.contains(slot) {
                self.items.insert(slot, item.clone());
            }
        }
    }
}

/// Single-row-growth insertion target for [`distribute`].
struct RowFiller<'a> {
    contents: &'a mut Contents,
    cursor: usize,
}

impl Overflow for RowFiller<'_> {
    fn place(&mut self, pending: &mut VecDeque<MenuItem>) -> usize {
        self.contents.place_from(&mut self.cursor, pending)
    }

    fn grow(&mut self) -> bool {
        // Growth can never bring a cursor past the maximum into range.
        self.cursor < self.contents.layout.max_size() && self.contents.grow(1)
    }

    fn short_of_start(&self) -> bool {
        self.cursor >= self.contents.layout.size()
    }
}

impl SlotStore for Contents {
    fn layout(&self) -> Layout {
        self.layout
    }

    fn get(&self, index: usize) -> Option<MenuItem> {
        self.items.get(&index).cloned()
    }

    fn set(&mut self, index: usize, item: MenuItem) -> Result<Option<MenuItem>, ContentsError> {
        self.layout.check(index)?;
        Ok(self.items.insert(index, item))
    }

    fn remove(&mut self, index: usize) -> Option<MenuItem> {
        self.items.remove(&index)
    }

    fn has_item(&self, index: usize) -> bool {
        self.items.contains_key(&index)
    }

    fn first_empty_slot(&self, from: usize) -> Option<usize> {
        (from..self.layout.size()).find(|i| !self.items.contains_key(i))
    }

    fn add_items_from<I>(&mut self, from: usize, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        let mut filler = RowFiller {
            contents: self,
            cursor: from,
        };
        let placed = distribute(&mut filler, items.into_iter().filter_map(Into::into));
        trace!(placed, from, rows = self.layout.rows(), "added items");
        placed
    }

    fn replace_contents<I>(&mut self, items: I) -> Result<(), ContentsError>
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        let items: Vec<Option<MenuItem>> = items.into_iter().map(Into::into).collect();
        let columns = self.layout.columns();
        if items.len() % columns != 0 {
            return Err(ContentsError::SizeMismatch {
                len: items.len(),
                columns,
            });
        }
        let rows = items.len() / columns;
        if rows > self.layout.max_rows() {
            return Err(ContentsError::InvalidRows {
                rows,
                max: self.layout.max_rows(),
            });
        }
        if rows > self.layout.rows() {
            self.grow(rows - self.layout.rows());
        }
        self.items = items
            .into_iter()
            .enumerate()
            .filter_map(|(i, item)| item.map(|item| (i, item)))
            .collect();
        self.suppliers.clear();
        Ok(())
    }

    fn remove_items(&mut self, items: &[MenuItem]) -> bool {
        let ids: HashSet<Uuid> = items.iter().map(MenuItem::id).collect();
        let before = self.items.len();
        self.items.retain(|_, item| !ids.contains(&item.id()));
        self.items.len() != before
    }

    fn grow(&mut self, by_rows: usize) -> bool {
        let grew = self.layout.grow(by_rows);
        if grew {
            debug!(by_rows, rows = self.layout.rows(), "container grew");
        }
        grew
    }

    fn clear(&mut self) {
        self.items.clear();
        self.suppliers.clear();
    }

    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn entries(&self) -> Vec<(usize, MenuItem)> {
        self.items.iter().map(|(i, item)| (*i, item.clone())).collect()
    }

    fn for_each_indexed<F: FnMut(usize, &MenuItem)>(&self, mut f: F) {
        for (i, item) in &self.items {
            f(*i, item);
        }
    }

    fn find_first<P: FnMut(&MenuItem) -> bool>(&self, mut predicate: P) -> Option<(usize, MenuItem)> {
        self.items
            .iter()
            .find(|(_, item)| predicate(item))
            .map(|(i, item)| (*i, item.clone()))
    }

    fn traverse(&self, direction: Direction) -> Vec<(usize, MenuItem)> {
        self.walk(direction)
            .map(|(i, item)| (i, item.clone()))
            .collect()
    }

    fn set_refreshable(
        &mut self,
        index: usize,
        supplier: ItemSupplier,
    ) -> Result<Option<MenuItem>, ContentsError> {
        self.layout.check(index)?;
        let item = supplier();
        self.install_refreshable(index, supplier, item)
    }

    fn remove_refreshable(&mut self, index: usize) -> Option<MenuItem> {
        self.suppliers.remove(&index);
        self.items.remove(&index)
    }

    fn refresh_item(&mut self, index: usize) -> Option<MenuItem> {
        let supplier = self.suppliers.get(&index)?;
        let item = supplier();
        self.items.insert(index, item.clone());
        Some(item)
    }

    fn refresh_items(&mut self) -> usize {
        let mut refreshed = 0;
        for (&index, supplier) in &self.suppliers {
            self.items.insert(index, supplier());
            refreshed += 1;
        }
        refreshed
    }
}

/// Iterator returned by [`Contents::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    state: WalkState<'a>,
}

#[derive(Debug)]
enum WalkState<'a> {
    // Horizontal order is the map's own key order.
    Ordered(btree_map::Iter<'a, usize, MenuItem>),
    Slots {
        slots: SlotIter,
        items: &'a BTreeMap<usize, MenuItem>,
        columns: usize,
    },
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a MenuItem);

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            WalkState::Ordered(iter) => iter.next().map(|(i, item)| (*i, item)),
            WalkState::Slots {
                slots,
                items,
                columns,
            } => loop {
                let index = slots.next()?.index(*columns);
                if let Some(item) = items.get(&index) {
                    return Some((index, item));
                }
            },
        }
    }
}
