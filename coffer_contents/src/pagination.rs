// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pagination: an ordered set of content stores shown one at a time.
//!
//! ## Overview
//!
//! A [`Pagination`] owns every [`Page`] (a [`Contents`] plus a key), a map of
//! shared items, and the position of the page being displayed. Two flavours
//! share the implementation:
//!
//! - [`IndexedPagination`]: `usize` keys, with `next`/`previous`, boundary
//!   checks, navigation buttons, and optional dynamic page allocation.
//! - [`KeyedPagination`]: `String` keys, navigated only by key.
//!
//! ## Shared items
//!
//! Shared items (navigation buttons, borders) are copied into each page when
//! the page is created and whenever they are set again. A page holds a copy,
//! not a live link: editing a page never touches the shared map, and changing
//! the shared map reaches existing pages only through the setters or
//! [`Pagination::reapply_shared_items`].
//!
//! ## Overflow
//!
//! [`Pagination::add_items`] fills pages in order starting from the current
//! one, through the same [`distribute`] loop a single store uses. With dynamic
//! paging, growth allocates a new page; otherwise the remainder is dropped.
//!
//! All pages share one fixed layout. Pages never grow by rows.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use tracing::{debug, trace};

use crate::error::ContentsError;
use crate::item::MenuItem;
use crate::layout::Layout;
use crate::overflow::{Overflow, distribute};
use crate::store::{Contents, SlotStore};
use crate::viewport::{NoViewport, RenderContext, Viewport};

/// Page identifiers.
pub trait PageKey: Clone + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Key for a page allocated at `position` by dynamic paging, or `None` if
    /// this key type cannot be generated.
    fn allocate(position: usize) -> Option<Self>;

    /// Key of the following (`forward`) or preceding page, for sequential keys.
    fn neighbour(&self, forward: bool) -> Option<Self>;

    /// Parse a key from a label, as used by [`MenuCommand::GoToKey`](crate::MenuCommand::GoToKey).
    fn parse_label(label: &str) -> Option<Self>;
}

impl PageKey for usize {
    fn allocate(position: usize) -> Option<Self> {
        Some(position)
    }

    fn neighbour(&self, forward: bool) -> Option<Self> {
        if forward {
            self.checked_add(1)
        } else {
            self.checked_sub(1)
        }
    }

    fn parse_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl PageKey for String {
    fn allocate(_position: usize) -> Option<Self> {
        None
    }

    fn neighbour(&self, _forward: bool) -> Option<Self> {
        None
    }

    fn parse_label(label: &str) -> Option<Self> {
        Some(label.to_owned())
    }
}

/// One page: a content store and its key.
#[derive(Clone, Debug)]
pub struct Page<K> {
    key: K,
    contents: Contents,
}

impl<K> Page<K> {
    /// Key of this page.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Store of this page.
    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    /// Mutable store of this page. Call [`Pagination::refresh`] afterwards if
    /// the page is on display.
    pub fn contents_mut(&mut self) -> &mut Contents {
        &mut self.contents
    }
}

/// A proposed navigation, described before it is committed so that a
/// listener can veto it.
#[derive(Clone, Debug)]
pub struct PageChange<K> {
    /// Key of the page on display.
    pub old_key: K,
    /// Snapshot of the page on display.
    pub old_page: Contents,
    /// Key of the target page.
    pub new_key: K,
    /// Snapshot of the target page.
    pub new_page: Contents,
}

/// Construction parameters for an [`IndexedPagination`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Rows per page, `1..=6`.
    pub rows: usize,
    /// Pages created up front, at least one.
    pub pages: usize,
    /// Allocate pages when items overflow the last one.
    pub dynamic_paging: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            rows: Layout::MAX_CHEST_ROWS,
            pages: 1,
            dynamic_paging: false,
        }
    }
}

impl PaginationConfig {
    /// Set rows per page.
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    /// Set the initial page count.
    pub fn with_pages(mut self, pages: usize) -> Self {
        self.pages = pages;
        self
    }

    /// Enable or disable dynamic paging.
    pub fn with_dynamic_paging(mut self, dynamic: bool) -> Self {
        self.dynamic_paging = dynamic;
        self
    }
}

/// Pages keyed by `K`, displayed through `V`.
pub struct Pagination<K: PageKey, V: Viewport = NoViewport> {
    layout: Layout,
    pages: Vec<Page<K>>,
    shared: BTreeMap<usize, MenuItem>,
    current: usize,
    dynamic: bool,
    next_slot: Option<usize>,
    previous_slot: Option<usize>,
    viewport: V,
}

/// Sequential pagination with `usize` keys.
pub type IndexedPagination<V = NoViewport> = Pagination<usize, V>;

/// Pagination with string keys.
pub type KeyedPagination<V = NoViewport> = Pagination<String, V>;

impl<K: PageKey, V: Viewport> fmt::Debug for Pagination<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("layout", &self.layout)
            .field("pages", &self.pages.len())
            .field("current", &self.current_key())
            .field("shared", &self.shared.len())
            .field("dynamic", &self.dynamic)
            .finish_non_exhaustive()
    }
}

impl<K: PageKey, V: Viewport> Pagination<K, V> {
    /// Create one page per key, in order. The first page is displayed.
    ///
    /// Pages use `layout` with growth disabled. Fails on an empty or
    /// duplicate key list.
    pub fn with_keys<I>(layout: Layout, keys: I, dynamic: bool, viewport: V) -> Result<Self, ContentsError>
    where
        I: IntoIterator<Item = K>,
    {
        let layout = Layout::fixed(layout.rows(), layout.columns())?;
        let mut this = Self {
            layout,
            pages: Vec::new(),
            shared: BTreeMap::new(),
            current: 0,
            dynamic,
            next_slot: None,
            previous_slot: None,
            viewport,
        };
        for key in keys {
            this.add_page(key)?;
        }
        if this.pages.is_empty() {
            return Err(ContentsError::InvalidPageCount(0));
        }
        Ok(this)
    }

    /// Shape shared by every page.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Whether overflow allocates new pages.
    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    /// Enable or disable dynamic paging.
    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Every page, in order.
    pub fn pages(&self) -> &[Page<K>] {
        &self.pages
    }

    /// Page keys, in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.pages.iter().map(|p| &p.key)
    }

    /// Position of the page with `key`.
    pub fn position(&self, key: &K) -> Option<usize> {
        self.pages.iter().position(|p| &p.key == key)
    }

    /// Key of the page at `position`.
    pub fn key_at(&self, position: usize) -> Option<&K> {
        self.pages.get(position).map(|p| &p.key)
    }

    /// Page with `key`.
    pub fn page(&self, key: &K) -> Option<&Page<K>> {
        self.pages.iter().find(|p| &p.key == key)
    }

    /// Mutable page with `key`.
    pub fn page_mut(&mut self, key: &K) -> Option<&mut Page<K>> {
        self.pages.iter_mut().find(|p| &p.key == key)
    }

    /// Position of the page on display.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Key of the page on display.
    pub fn current_key(&self) -> &K {
        &self.pages[self.current].key
    }

    /// Page on display.
    pub fn current(&self) -> &Page<K> {
        &self.pages[self.current]
    }

    /// Mutable page on display. Call [`refresh`](Self::refresh) afterwards.
    pub fn current_mut(&mut self) -> &mut Page<K> {
        &mut self.pages[self.current]
    }

    /// The live display.
    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// The live display, mutably.
    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    /// Append an empty page holding a copy of every shared item.
    pub fn add_page(&mut self, key: K) -> Result<&mut Page<K>, ContentsError> {
        if self.position(&key).is_some() {
            return Err(ContentsError::DuplicatePage(key.to_string()));
        }
        let page = new_page(key, self.layout, &self.shared);
        trace!(key = %page.key, pages = self.pages.len() + 1, "page added");
        let index = self.pages.len();
        self.pages.push(page);
        Ok(&mut self.pages[index])
    }

    /// Replace the store of an existing page. Shared items are copied back in.
    pub fn set_page(&mut self, key: &K, mut contents: Contents) -> Result<(), ContentsError> {
        let position = self
            .position(key)
            .ok_or_else(|| ContentsError::UnknownPage(key.to_string()))?;
        let found = contents.layout();
        if !self.layout.same_grid(&found) {
            return Err(ContentsError::LayoutMismatch {
                expected: self.layout,
                found,
            });
        }
        contents.overlay(&self.shared);
        self.pages[position].contents = contents;
        if position == self.current {
            self.refresh();
        }
        Ok(())
    }

    /// Display the page with `key`. Returns `false` if there is none.
    ///
    /// Going to the current page re-renders it without touching its contents.
    pub fn go_to_page(&mut self, key: &K) -> bool {
        match self.position(key) {
            Some(position) => {
                self.go_to_index(position);
                true
            }
            None => {
                trace!(%key, "no such page");
                false
            }
        }
    }

    /// Display the page at `position`. Returns `false` if out of range.
    pub fn go_to_index(&mut self, position: usize) -> bool {
        if position >= self.pages.len() {
            return false;
        }
        let from = self.current;
        self.current = position;
        trace!(from, to = position, "page changed");
        self.refresh();
        true
    }

    /// Render context for the page on display.
    pub fn render_context(&self) -> RenderContext {
        RenderContext::paged(self.layout, self.current, self.pages.len())
    }

    /// Push the page on display to the viewport.
    pub fn refresh(&mut self) {
        let ctx = self.render_context();
        let entries = self.pages[self.current].contents.visible_entries(&ctx);
        self.viewport.refresh(&ctx, &entries);
    }

    /// Insert items into pages, starting at the current one. Returns how many
    /// were placed.
    ///
    /// With dynamic paging, pages are allocated until everything fits and the
    /// last page touched is displayed. Otherwise items that do not fit in the
    /// existing pages are dropped.
    pub fn add_items<I>(&mut self, items: I) -> usize
    where
        I: IntoIterator,
        I::Item: Into<Option<MenuItem>>,
    {
        let pages_before = self.pages.len();
        let mut filler = PageFiller {
            pages: &mut self.pages,
            shared: &self.shared,
            layout: self.layout,
            dynamic: self.dynamic,
            position: self.current,
            cursor: 0,
            last_touched: None,
        };
        let placed = distribute(&mut filler, items.into_iter().filter_map(Into::into));
        let last_touched = filler.last_touched;
        match last_touched {
            Some(position) if self.pages.len() > pages_before => {
                self.go_to_index(position);
            }
            _ if placed > 0 => self.refresh(),
            _ => {}
        }
        placed
    }

    /// Put `item` at `slot` on every page, and on pages created later.
    pub fn set_shared_item(&mut self, slot: usize, item: MenuItem) -> Result<(), ContentsError> {
        self.set_shared_items(&[slot], &[item])
    }

    /// Put `items[i]` at `slots[i]` on every page, and on pages created later.
    ///
    /// The lists must be the same length and every slot inside the layout.
    pub fn set_shared_items(&mut self, slots: &[usize], items: &[MenuItem]) -> Result<(), ContentsError> {
        if slots.len() != items.len() {
            return Err(ContentsError::LengthMismatch {
                slots: slots.len(),
                items: items.len(),
            });
        }
        for &slot in slots {
            self.layout.check(slot)?;
        }
        let batch: BTreeMap<usize, MenuItem> =
            slots.iter().copied().zip(items.iter().cloned()).collect();
        for page in &mut self.pages {
            page.contents.overlay(&batch);
        }
        self.shared.extend(batch);
        self.refresh();
        Ok(())
    }

    /// Stop sharing the item at `slot`, removing it from every page that
    /// still holds it there.
    pub fn remove_shared_item(&mut self, slot: usize) -> Option<MenuItem> {
        let removed = self.shared.remove(&slot)?;
        for page in &mut self.pages {
            if page.contents.get(slot).as_ref() == Some(&removed) {
                page.contents.remove(slot);
            }
        }
        if self.next_slot == Some(slot) {
            self.next_slot = None;
        }
        if self.previous_slot == Some(slot) {
            self.previous_slot = None;
        }
        self.refresh();
        Some(removed)
    }

    /// Copy every shared item into every page again.
    pub fn reapply_shared_items(&mut self) {
        for page in &mut self.pages {
            page.contents.overlay(&self.shared);
        }
        self.refresh();
    }

    /// Run `decorate` on every existing page, then render. Pages allocated
    /// later start from the shared items only.
    pub fn decorate<F: FnMut(&mut Contents)>(&mut self, mut decorate: F) {
        for page in &mut self.pages {
            decorate(&mut page.contents);
        }
        self.refresh();
    }

    /// Put `item` into every empty slot of every page. Returns how many slots
    /// were filled.
    pub fn fill_pages(&mut self, item: &MenuItem) -> usize {
        let mut filled = 0;
        self.decorate(|contents| filled += contents.fill(item));
        filled
    }

    /// Put `item` into every empty border slot of every page.
    pub fn fill_page_borders(&mut self, item: &MenuItem) -> usize {
        let mut filled = 0;
        self.decorate(|contents| filled += contents.fill_borders(item));
        filled
    }

    /// Put `item` into zero-based `row` of every page, overwriting.
    pub fn fill_page_row(&mut self, row: usize, item: &MenuItem) -> Result<(), ContentsError> {
        if row >= self.layout.rows() {
            return Err(ContentsError::RowOutOfRange {
                row,
                rows: self.layout.rows(),
            });
        }
        let mut result = Ok(());
        self.decorate(|contents| {
            if result.is_ok() {
                result = contents.fill_row(row, item);
            }
        });
        result
    }

    /// Shared items by slot.
    pub fn shared_items(&self) -> impl Iterator<Item = (usize, &MenuItem)> + '_ {
        self.shared.iter().map(|(slot, item)| (*slot, item))
    }

    /// Describe navigating to `target` without doing it. `None` if unknown.
    pub fn page_change(&self, target: &K) -> Option<PageChange<K>> {
        let new_page = self.page(target)?;
        let old_page = self.current();
        Some(PageChange {
            old_key: old_page.key.clone(),
            old_page: old_page.contents.clone(),
            new_key: target.clone(),
            new_page: new_page.contents.clone(),
        })
    }

    /// Key of the page after (`forward`) or before the current one, if it exists.
    pub fn neighbour_key(&self, forward: bool) -> Option<K> {
        self.current_key()
            .neighbour(forward)
            .filter(|key| self.position(key).is_some())
    }

    /// Whether `slot` holds a navigation button.
    pub fn is_navigation_slot(&self, slot: usize) -> bool {
        self.next_slot == Some(slot) || self.previous_slot == Some(slot)
    }

    /// Describe the navigation a click on `slot` would trigger: `None` if the
    /// slot is not a navigation button or there is no page in that direction.
    pub fn page_change_for(&self, slot: usize) -> Option<PageChange<K>> {
        let forward = if self.next_slot == Some(slot) {
            true
        } else if self.previous_slot == Some(slot) {
            false
        } else {
            return None;
        };
        let target = self.neighbour_key(forward)?;
        self.page_change(&target)
    }
}

impl<V: Viewport> Pagination<usize, V> {
    /// Sequential pages `0..config.pages`, rendered through `viewport`.
    pub fn with_viewport(config: PaginationConfig, viewport: V) -> Result<Self, ContentsError> {
        if config.pages == 0 {
            return Err(ContentsError::InvalidPageCount(0));
        }
        let layout = Layout::chest(config.rows, false)?;
        Self::with_keys(layout, 0..config.pages, config.dynamic_paging, viewport)
    }

    /// Append an empty page keyed by the current page count. Returns its key.
    pub fn push_page(&mut self) -> Result<usize, ContentsError> {
        let key = self.pages.len();
        self.add_page(key)?;
        Ok(key)
    }

    /// Display the following page. `false` on the last page.
    #[allow(clippy::should_implement_trait, reason = "Turns a page, not an iterator step.")]
    pub fn next(&mut self) -> bool {
        self.neighbour_key(true)
            .is_some_and(|key| self.go_to_page(&key))
    }

    /// Display the preceding page. `false` on the first page.
    pub fn previous(&mut self) -> bool {
        self.neighbour_key(false)
            .is_some_and(|key| self.go_to_page(&key))
    }

    /// Whether no page precedes the current one.
    pub fn is_first_page(&self) -> bool {
        self.neighbour_key(false).is_none()
    }

    /// Whether no page follows the current one.
    pub fn is_last_page(&self) -> bool {
        self.neighbour_key(true).is_none()
    }

    /// One-based number of the current page.
    pub fn current_page_number(&self) -> usize {
        self.current_key() + 1
    }

    /// Install the "next page" button at `slot` on every page.
    ///
    /// The item's click handler is replaced with one requesting the next page.
    pub fn set_next_item(&mut self, slot: usize, item: MenuItem) -> Result<(), ContentsError> {
        self.set_shared_item(slot, item.clone())?;
        item.set_click_handler(|click| click.next_page());
        self.next_slot = Some(slot);
        Ok(())
    }

    /// Install the "previous page" button at `slot` on every page.
    pub fn set_previous_item(&mut self, slot: usize, item: MenuItem) -> Result<(), ContentsError> {
        self.set_shared_item(slot, item.clone())?;
        item.set_click_handler(|click| click.previous_page());
        self.previous_slot = Some(slot);
        Ok(())
    }

    /// Install both navigation buttons.
    pub fn with_navigation(
        mut self,
        next: (usize, MenuItem),
        previous: (usize, MenuItem),
    ) -> Result<Self, ContentsError> {
        self.set_next_item(next.0, next.1)?;
        self.set_previous_item(previous.0, previous.1)?;
        Ok(self)
    }
}

impl<V: Viewport + Default> Pagination<usize, V> {
    /// Sequential pages with a default viewport.
    pub fn new(config: PaginationConfig) -> Result<Self, ContentsError> {
        Self::with_viewport(config, V::default())
    }
}

impl<V: Viewport> Pagination<String, V> {
    /// One chest page of `rows` rows per key.
    pub fn with_pages<I, S>(rows: usize, keys: I, viewport: V) -> Result<Self, ContentsError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let layout = Layout::chest(rows, false)?;
        Self::with_keys(layout, keys.into_iter().map(Into::into), false, viewport)
    }
}

fn new_page<K>(key: K, layout: Layout, shared: &BTreeMap<usize, MenuItem>) -> Page<K> {
    let mut contents = Contents::new(layout);
    contents.overlay(shared);
    Page { key, contents }
}

/// Page-growth insertion target for [`distribute`].
struct PageFiller<'a, K> {
    pages: &'a mut Vec<Page<K>>,
    shared: &'a BTreeMap<usize, MenuItem>,
    layout: Layout,
    dynamic: bool,
    position: usize,
    cursor: usize,
    last_touched: Option<usize>,
}

impl<K: PageKey> Overflow for PageFiller<'_, K> {
    fn place(&mut self, pending: &mut VecDeque<MenuItem>) -> usize {
        let mut placed = 0;
        while !pending.is_empty() {
            let Some(page) = self.pages.get_mut(self.position) else {
                break;
            };
            let step = page.contents.place_from(&mut self.cursor, pending);
            if step > 0 {
                self.last_touched = Some(self.position);
            }
            placed += step;
            if !pending.is_empty() {
                self.position += 1;
                self.cursor = 0;
            }
        }
        placed
    }

    fn grow(&mut self) -> bool {
        if !self.dynamic {
            return false;
        }
        let Some(key) = K::allocate(self.pages.len()) else {
            return false;
        };
        if self.pages.iter().any(|p| p.key == key) {
            return false;
        }
        self.pages.push(new_page(key, self.layout, self.shared));
        debug!(pages = self.pages.len(), "page allocated for overflow");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemClick, MenuCommand, ViewerId};
    use crate::viewport::PagePosition;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<(Option<PagePosition>, Vec<usize>)>,
    }

    impl Viewport for Recorder {
        fn refresh(&mut self, ctx: &RenderContext, entries: &[(usize, MenuItem)]) {
            self.frames
                .push((ctx.page, entries.iter().map(|(i, _)| *i).collect()));
        }
    }

    fn items(n: usize) -> Vec<MenuItem> {
        (0..n).map(|i| MenuItem::new(format!("item-{i}"))).collect()
    }

    #[test]
    fn decoration_reaches_every_page() {
        let mut p = one_row(3, false);
        p.add_items(items(2));
        let glass = MenuItem::new("glass");
        assert_eq!(p.fill_pages(&glass), 25);
        assert!(p.pages().iter().all(|page| page.contents().item_count() == 9));
        assert_eq!(p.page(&0).unwrap().contents().get(0).unwrap().key(), "item-0");
        assert_eq!(p.page(&2).unwrap().contents().get(0), Some(glass));
        assert!(!p.viewport().frames.is_empty());
    }

    #[test]
    fn page_rows_are_checked_before_any_page_changes() {
        let mut p = one_row(2, false);
        let bar = MenuItem::new("bar");
        assert_eq!(
            p.fill_page_row(1, &bar),
            Err(ContentsError::RowOutOfRange { row: 1, rows: 1 })
        );
        assert!(p.pages().iter().all(|page| page.contents().is_empty()));
        p.fill_page_row(0, &bar).unwrap();
        assert!(p.pages().iter().all(|page| page.contents().item_count() == 9));
        assert_eq!(p.fill_page_borders(&bar), 0);
    }

    fn one_row(pages: usize, dynamic: bool) -> IndexedPagination<Recorder> {
        let config = PaginationConfig::default()
            .with_rows(1)
            .with_pages(pages)
            .with_dynamic_paging(dynamic);
        IndexedPagination::<Recorder>::new(config).unwrap()
    }

    #[test]
    fn construction_is_validated() {
        let zero = PaginationConfig::default().with_pages(0);
        assert_eq!(
            IndexedPagination::<NoViewport>::new(zero).unwrap_err(),
            ContentsError::InvalidPageCount(0)
        );
        let tall = PaginationConfig::default().with_rows(7);
        assert!(matches!(
            IndexedPagination::<NoViewport>::new(tall),
            Err(ContentsError::InvalidRows { rows: 7, .. })
        ));
        let dup = KeyedPagination::with_pages(1, ["a", "a"], NoViewport);
        assert_eq!(dup.unwrap_err(), ContentsError::DuplicatePage("a".into()));
    }

    #[test]
    fn overflow_by_one_allocates_one_page() {
        let mut p = one_row(1, true);
        let batch = items(10);
        assert_eq!(p.add_items(batch.clone()), 10);
        assert_eq!(p.page_count(), 2);
        assert_eq!(p.pages()[0].contents().item_count(), 9);
        assert_eq!(p.pages()[1].contents().entries(), vec![(0, batch[9].clone())]);
        assert_eq!(*p.current_key(), 1);
    }

    #[test]
    fn without_dynamic_paging_the_remainder_is_dropped() {
        let mut p = one_row(2, false);
        assert_eq!(p.add_items(items(20)), 18);
        assert_eq!(p.page_count(), 2);
        assert_eq!(*p.current_key(), 0);
    }

    #[test]
    fn insertion_starts_at_the_current_page() {
        let mut p = one_row(3, false);
        assert!(p.go_to_page(&1));
        assert_eq!(p.add_items(items(12)), 12);
        assert!(p.pages()[0].contents().is_empty());
        assert_eq!(p.pages()[1].contents().item_count(), 9);
        assert_eq!(p.pages()[2].contents().item_count(), 3);
    }

    #[test]
    fn going_to_the_current_page_rerenders_only() {
        let mut p = one_row(2, false);
        p.add_items(items(4));
        let before = p.current().contents().entries();
        let frames = p.viewport().frames.len();
        assert!(p.go_to_page(&0));
        assert_eq!(p.viewport().frames.len(), frames + 1);
        assert_eq!(p.current().contents().entries(), before);
        assert_eq!(
            p.viewport().frames.last().unwrap(),
            &(Some(PagePosition { index: 0, count: 2 }), vec![0, 1, 2, 3])
        );
    }

    #[test]
    fn unknown_page_is_refused() {
        let mut p = one_row(2, false);
        let frames = p.viewport().frames.len();
        assert!(!p.go_to_page(&5));
        assert_eq!(p.viewport().frames.len(), frames);
        assert_eq!(*p.current_key(), 0);
    }

    #[test]
    fn sequential_navigation_and_bounds() {
        let mut p = one_row(3, false);
        assert!(p.is_first_page());
        assert!(!p.previous());
        assert!(p.next());
        assert_eq!(p.current_page_number(), 2);
        assert!(p.next());
        assert!(p.is_last_page());
        assert!(!p.next());
        assert!(p.previous());
        assert_eq!(*p.current_key(), 1);
    }

    #[test]
    fn shared_items_reach_every_page() {
        let mut p = one_row(2, true);
        let border = MenuItem::new("border");
        p.set_shared_item(8, border.clone()).unwrap();
        assert!(p.pages().iter().all(|page| page.contents().get(8) == Some(border.clone())));

        let key = p.push_page().unwrap();
        assert_eq!(p.page(&key).unwrap().contents().get(8), Some(border.clone()));

        // Three pages of eight free slots, then an overflow page with its own copy.
        assert_eq!(p.add_items(items(26)), 26);
        assert_eq!(p.page_count(), 4);
        assert_eq!(p.pages()[3].contents().get(8), Some(border));
        assert_eq!(p.pages()[3].contents().item_count(), 3);
        assert_eq!(*p.current_key(), 3);
    }

    #[test]
    fn page_copies_are_independent() {
        let mut p = one_row(2, false);
        let shared = MenuItem::new("shared");
        p.set_shared_item(0, shared.clone()).unwrap();
        p.current_mut().contents_mut().remove(0);
        assert!(p.pages()[1].contents().has_item(0));
        assert_eq!(p.shared_items().count(), 1);

        p.reapply_shared_items();
        assert_eq!(p.current().contents().get(0), Some(shared));
    }

    #[test]
    fn remove_shared_item_only_removes_copies() {
        let mut p = one_row(2, false);
        let shared = MenuItem::new("shared");
        p.set_shared_item(4, shared.clone()).unwrap();
        let own = MenuItem::new("own");
        p.page_mut(&1).unwrap().contents_mut().set(4, own.clone()).unwrap();
        assert_eq!(p.remove_shared_item(4), Some(shared));
        assert!(!p.pages()[0].contents().has_item(4));
        assert_eq!(p.pages()[1].contents().get(4), Some(own));
        assert_eq!(p.remove_shared_item(4), None);
    }

    #[test]
    fn shared_item_lists_must_match() {
        let mut p = one_row(1, false);
        assert_eq!(
            p.set_shared_items(&[0, 1], &items(1)),
            Err(ContentsError::LengthMismatch { slots: 2, items: 1 })
        );
        assert!(p.set_shared_items(&[0, 9], &items(2)).is_err());
        assert_eq!(p.shared_items().count(), 0);
        assert!(p.current().contents().is_empty());
    }

    #[test]
    fn set_page_checks_and_reapplies() {
        let mut p = one_row(2, false);
        let nav = MenuItem::new("nav");
        p.set_shared_item(8, nav.clone()).unwrap();

        let wrong = Contents::new(Layout::chest(2, false).unwrap());
        assert!(matches!(
            p.set_page(&1, wrong),
            Err(ContentsError::LayoutMismatch { .. })
        ));
        let fresh = Contents::new(Layout::chest(1, false).unwrap());
        assert_eq!(
            p.set_page(&7, fresh.clone()),
            Err(ContentsError::UnknownPage("7".into()))
        );
        p.set_page(&1, fresh).unwrap();
        assert_eq!(p.pages()[1].contents().entries(), vec![(8, nav)]);
    }

    #[test]
    fn navigation_buttons_request_turns() {
        let next = MenuItem::new("next");
        let prev = MenuItem::new("prev");
        let p = one_row(2, false)
            .with_navigation((8, next.clone()), (0, prev.clone()))
            .unwrap();
        assert!(p.is_navigation_slot(8));
        assert!(p.is_navigation_slot(0));
        assert!(!p.is_navigation_slot(4));

        let mut click = ItemClick::new(8, ViewerId::random());
        assert!(next.click(&mut click));
        assert!(prev.click(&mut click));
        assert_eq!(
            click.commands(),
            &[MenuCommand::NextPage, MenuCommand::PreviousPage]
        );
    }

    #[test]
    fn page_change_describes_without_committing() {
        let mut p = one_row(2, false)
            .with_navigation((8, MenuItem::new("next")), (0, MenuItem::new("prev")))
            .unwrap();
        let change = p.page_change_for(8).unwrap();
        assert_eq!((change.old_key, change.new_key), (0, 1));
        assert!(change.new_page.has_item(8));
        assert_eq!(*p.current_key(), 0);
        assert!(p.page_change_for(0).is_none());
        assert!(p.page_change_for(3).is_none());

        assert!(p.next());
        assert!(p.page_change_for(8).is_none());
        assert_eq!(p.page_change_for(0).unwrap().new_key, 0);
        assert!(p.page_change(&9).is_none());
    }

    #[test]
    fn keyed_pages_navigate_by_key_only() {
        let mut p = KeyedPagination::with_pages(1, ["weapons", "armour"], Recorder::default()).unwrap();
        p.set_dynamic(true);
        assert_eq!(p.current_key(), "weapons");
        assert!(p.go_to_page(&"armour".to_owned()));
        assert!(p.neighbour_key(true).is_none());
        // String keys cannot be generated, so overflow is dropped.
        assert_eq!(p.add_items(items(12)), 9);
        assert_eq!(p.page_count(), 2);
        assert!(p.add_page("tools".into()).is_ok());
        assert!(p.add_page("tools".into()).is_err());
        assert_eq!(p.keys().cloned().collect::<Vec<_>>(), ["weapons", "armour", "tools"]);
    }

    #[test]
    fn hidden_items_are_not_rendered() {
        let mut p = one_row(2, false);
        let only_first = MenuItem::new("intro")
            .with_visibility(|ctx| ctx.page.is_some_and(|page| page.index == 0));
        p.set_shared_item(4, only_first).unwrap();
        assert_eq!(p.viewport().frames.last().unwrap().1, vec![4]);
        assert!(p.next());
        assert!(p.viewport().frames.last().unwrap().1.is_empty());
    }
}
