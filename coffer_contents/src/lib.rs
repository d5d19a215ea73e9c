// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coffer Contents: what occupies which slot of a menu.
//!
//! This crate is the source of truth for menu contents:
//!
//! - [`MenuItem`]: a shared item handle with identity equality, an optional click handler,
//!   and an optional render-time visibility predicate.
//! - [`Layout`] and [`MenuKind`]: container shape and the host's container kinds.
//! - [`SlotStore`]: the store contract, implemented by [`Contents`] (single owner) and
//!   [`SharedContents`] (lock-protected, cloneable).
//! - [`overflow`]: the place/grow/retry loop shared by stores and pagination.
//! - [`Pagination`]: pages of stores with shared items, navigation, and dynamic page allocation.
//! - [`Viewport`]: where rendered contents go; the host side implements it.
//!
//! Stores never fail silently on caller errors: out-of-range slots and malformed
//! replacements return [`ContentsError`] and leave the store untouched. Overflow is
//! different: items that cannot be placed after growth is exhausted are dropped, and
//! only the placed count is reported.
//!
//! # Example
//!
//! ```rust
//! use coffer_contents::{Contents, Layout, MenuItem, SlotStore};
//!
//! // A three-row chest that may grow to six rows.
//! let mut contents = Contents::new(Layout::chest(3, true).unwrap());
//! let items: Vec<MenuItem> = (0..30).map(|i| MenuItem::new(format!("gem-{i}"))).collect();
//!
//! assert_eq!(contents.add_items(items), 30);
//! assert_eq!(contents.layout().rows(), 4);
//! assert_eq!(contents.first_empty_slot(0), Some(30));
//! ```
//!
//! Pages work the same way, growing by pages instead of rows:
//!
//! ```rust
//! use coffer_contents::{IndexedPagination, MenuItem, PaginationConfig};
//!
//! let config = PaginationConfig::default().with_rows(1).with_dynamic_paging(true);
//! let mut pages: IndexedPagination = IndexedPagination::new(config).unwrap();
//! assert_eq!(pages.add_items((0..10).map(|i| MenuItem::new(format!("{i}")))), 10);
//! assert_eq!(pages.page_count(), 2);
//! assert_eq!(pages.current_page_number(), 2);
//! ```

pub mod concurrent;
pub mod error;
pub mod item;
pub mod layout;
pub mod overflow;
pub mod pagination;
pub mod store;
pub mod viewport;

pub use concurrent::SharedContents;
pub use error::ContentsError;
pub use item::{ClickHandler, ItemClick, MenuCommand, MenuItem, ViewerId, Visibility};
pub use layout::{Container, Layout, MenuKind};
pub use pagination::{
    IndexedPagination, KeyedPagination, Page, PageChange, PageKey, Pagination, PaginationConfig,
};
pub use store::{Contents, ItemSupplier, SlotStore, Walk};
pub use viewport::{NoViewport, PagePosition, RenderContext, Viewport};

#[cfg(test)]
mod tests {
    use super::*;
    use coffer_slots::Direction;

    #[test]
    fn shared_and_plain_stores_agree() {
        let layout = Layout::chest(2, true).unwrap();
        let mut plain = Contents::new(layout);
        let mut shared = SharedContents::new(layout);
        let items: Vec<MenuItem> = (0..25).map(|i| MenuItem::new(format!("{i}"))).collect();

        assert_eq!(plain.add_items(items.clone()), 25);
        assert_eq!(shared.add_items(items.clone()), 25);
        assert_eq!(plain.entries(), shared.entries());
        assert_eq!(plain.layout(), shared.layout());
        assert_eq!(
            plain.traverse(Direction::Vertical),
            shared.traverse(Direction::Vertical)
        );

        assert!(plain.remove_items(&items[..5]));
        assert!(shared.remove_items(&items[..5]));
        assert_eq!(plain.first_empty_slot(0), shared.first_empty_slot(0));
    }
}
