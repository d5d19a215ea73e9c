// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thread-safe content store.
//!
//! [`SharedContents`] puts a [`Contents`] behind an `Arc<RwLock<_>>`. Clones
//! share state, so an async click handler can hold one while the event thread
//! keeps another. Each call takes the lock once, so multi-slot operations
//! such as `add_items` are atomic with respect to other handles.
//!
//! Iteration works on a snapshot taken under the read lock; callbacks run
//! after the lock is released and may mutate the store freely. Item suppliers
//! also run with no lock held, so they may read the store they fill. A poisoned
//! lock is recovered rather than propagated, since every mutation leaves the
//! map consistent before it could panic.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use coffer_slots::Direction;

use crate::error::ContentsError;
use crate::item::MenuItem;
use crate::layout::Layout;
use crate::store::{Contents, ItemSupplier, SlotStore};
use crate::viewport::RenderContext;

/// A [`Contents`] shared between threads.
#[derive(Clone)]
pub struct SharedContents {
    inner: Arc<RwLock<Contents>>,
}

impl fmt::Debug for SharedContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.read();
        f.debug_struct("SharedContents")
            .field("layout", &guard.layout())
            .field("item_count", &guard.item_count())
            .finish_non_exhaustive()
    }
}

impl From<Contents> for SharedContents {
    fn from(contents: Contents) -> Self {
        Self {
            inner: Arc::new(RwLock::new(contents)),
        }
    }
}

impl SharedContents {
    /// An empty shared store with the given shape.
    pub fn new(layout: Layout) -> Self {
        Contents::new(layout).into()
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Contents {
        self.read().clone()
    }

    /// Whether `other` shares state with `self`.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn read(&self) -> RwLockReadGuard<'_, Contents> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Contents> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SlotStore for SharedContents {
    fn layout(&self) -> Layout {
        self.read().layout()
    }

    fn get(&self, index: usize) -> Option<MenuItem> {
        self.read().get(index)
    }

    fn set(&mut self, index: usize, item: MenuItem) -> Result<Option<MenuItem>, ContentsError> {
        self.write().set(index, item)
    }

    fn remove(&mut self, index: usize) -> Option<MenuItem> {
        self.write().remove(index)
    }

    fn has_item(&self, index: usize) -> bool {
        self.read().has_item(index)
    }

    fn first_empty_slot(&self, from: usize) -> Option<usize> {
        self.read().first_empty_slot(from)
    }

    fn add_items_from<I>(&mut self, from: usize, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        // Collect first so user iterators never run under the lock.
        let items: Vec<Option<MenuItem>> = items.into_iter().map(Into::into).collect();
        self.write().add_items_from(from, items)
    }

    fn replace_contents<I>(&mut self, items: I) -> Result<(), ContentsError>
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        let items: Vec<Option<MenuItem>> = items.into_iter().map(Into::into).collect();
        self.write().replace_contents(items)
    }

    fn remove_items(&mut self, items: &[MenuItem]) -> bool {
        self.write().remove_items(items)
    }

    fn grow(&mut self, by_rows: usize) -> bool {
        self.write().grow(by_rows)
    }

    fn clear(&mut self) {
        self.write().clear();
    }

    fn item_count(&self) -> usize {
        self.read().item_count()
    }

    fn entries(&self) -> Vec<(usize, MenuItem)> {
        self.read().entries()
    }

    fn for_each_indexed<F: FnMut(usize, &MenuItem)>(&self, mut f: F) {
        for (i, item) in self.entries() {
            f(i, &item);
        }
    }

    fn set_items(&mut self, slots: &[usize], item: &MenuItem) -> Result<(), ContentsError> {
        self.write().set_items(slots, item)
    }

    fn fill(&mut self, item: &MenuItem) -> usize {
        self.write().fill(item)
    }

    fn fill_borders(&mut self, item: &MenuItem) -> usize {
        self.write().fill_borders(item)
    }

    fn fill_row(&mut self, row: usize, item: &MenuItem) -> Result<(), ContentsError> {
        self.write().fill_row(row, item)
    }

    fn visible_entries(&self, ctx: &RenderContext) -> Vec<(usize, MenuItem)> {
        // Predicates are user code; evaluate them outside the lock.
        let mut entries = self.entries();
        entries.retain(|(_, item)| item.is_visible(ctx));
        entries
    }

    fn traverse(&self, direction: Direction) -> Vec<(usize, MenuItem)> {
        self.read().traverse(direction)
    }

    fn set_refreshable(
        &mut self,
        index: usize,
        supplier: ItemSupplier,
    ) -> Result<Option<MenuItem>, ContentsError> {
        self.layout().check(index)?;
        let item = supplier();
        self.write().install_refreshable(index, supplier, item)
    }

    fn remove_refreshable(&mut self, index: usize) -> Option<MenuItem> {
        self.write().remove_refreshable(index)
    }

    fn refresh_item(&mut self, index: usize) -> Option<MenuItem> {
        let supplier = self.read().supplier(index)?;
        let item = supplier();
        self.write()
            .store_refreshed(index, &supplier, item.clone())
            .then_some(item)
    }

    fn refresh_items(&mut self) -> usize {
        let suppliers = self.read().suppliers();
        let fresh: Vec<(usize, ItemSupplier, MenuItem)> = suppliers
            .into_iter()
            .map(|(index, supplier)| {
                let item = supplier();
                (index, supplier, item)
            })
            .collect();
        let mut guard = self.write();
        fresh
            .into_iter()
            .filter(|(index, supplier, item)| guard.store_refreshed(*index, supplier, item.clone()))
            .count()
    }

    fn is_concurrent(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn shared(rows: usize, growable: bool) -> SharedContents {
        SharedContents::new(Layout::chest(rows, growable).unwrap())
    }

    #[test]
    fn clones_share_state() {
        let mut a = shared(1, false);
        let b = a.clone();
        let item = MenuItem::new("x");
        a.set(2, item.clone()).unwrap();
        assert_eq!(b.get(2), Some(item));
        assert!(a.ptr_eq(&b));
        assert!(b.is_concurrent());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut a = shared(1, false);
        a.set(0, MenuItem::new("x")).unwrap();
        let snap = a.snapshot();
        a.clear();
        assert_eq!(snap.item_count(), 1);
        assert_eq!(a.item_count(), 0);
    }

    #[test]
    fn callbacks_may_mutate_during_iteration() {
        let mut store = shared(2, false);
        store.add_items((0..5).map(|i| MenuItem::new(format!("{i}"))));
        let mut writer = store.clone();
        let mut visited = 0;
        store.for_each_indexed(|i, _| {
            writer.remove(i);
            visited += 1;
        });
        assert_eq!(visited, 5);
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn concurrent_adds_never_collide() {
        let store = shared(6, false);
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let mut store = store.clone();
                thread::spawn(move || {
                    store.add_items((0..10).map(|i| MenuItem::new(format!("{t}-{i}"))))
                })
            })
            .collect();
        let placed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(placed, 40);
        assert_eq!(store.item_count(), 40);
        assert_eq!(store.first_empty_slot(0), Some(40));
    }

    fn counting_supplier(reader: SharedContents) -> ItemSupplier {
        Arc::new(move || MenuItem::new(format!("count-{}", reader.item_count())))
    }

    #[test]
    fn suppliers_may_read_their_own_store() {
        let mut store = shared(1, false);
        store.set(8, MenuItem::new("x")).unwrap();
        let supplier = counting_supplier(store.clone());
        let (tx, rx) = std::sync::mpsc::channel();
        let mut worker = store.clone();
        thread::spawn(move || {
            worker.set_refreshable(0, supplier).unwrap();
            worker.set(1, MenuItem::new("y")).unwrap();
            let one = worker.refresh_item(0).map(|item| item.key().to_owned());
            let all = worker.refresh_items();
            tx.send((one, all)).unwrap();
        });
        let (one, all) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(one.as_deref(), Some("count-3"));
        assert_eq!(all, 1);
        assert_eq!(store.get(0).unwrap().key(), "count-3");
    }

    #[test]
    fn refresh_skips_suppliers_removed_meanwhile() {
        let mut store = shared(1, false);
        let remover = store.clone();
        let supplier: ItemSupplier = Arc::new(move || {
            let mut remover = remover.clone();
            remover.remove_refreshable(2);
            MenuItem::new("stale")
        });
        store.set_refreshable(2, supplier).unwrap();
        assert_eq!(store.refresh_item(2), None);
        assert!(!store.has_item(2));
    }

    #[test]
    fn growth_goes_through_the_lock() {
        let mut store = shared(1, true);
        let other = store.clone();
        assert_eq!(store.add_items((0..12).map(|i| MenuItem::new(format!("{i}")))), 12);
        assert_eq!(other.layout().rows(), 2);
    }
}
