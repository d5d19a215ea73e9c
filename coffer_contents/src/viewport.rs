// Copyright 2025 the Coffer Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live-display seam.
//!
//! Stores never talk to the host directly. Whoever owns a store (a menu, a
//! pagination) hands rendered entries to a [`Viewport`] after every change
//! the viewer should see.

use crate::item::MenuItem;
use crate::layout::Layout;

/// Position of the displayed page within a pagination.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PagePosition {
    /// Zero-based page position.
    pub index: usize,
    /// Number of pages.
    pub count: usize,
}

/// What visibility predicates see when a container is rendered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RenderContext {
    /// Shape being rendered.
    pub layout: Layout,
    /// Current page, for paged containers.
    pub page: Option<PagePosition>,
}

impl RenderContext {
    /// Context for an unpaged container.
    pub const fn new(layout: Layout) -> Self {
        Self { layout, page: None }
    }

    /// Context for page `index` of `count`.
    pub const fn paged(layout: Layout, index: usize, count: usize) -> Self {
        Self {
            layout,
            page: Some(PagePosition { index, count }),
        }
    }
}

/// Receiver of rendered container state.
pub trait Viewport {
    /// Replace what the viewer sees with `entries`, already filtered for visibility.
    fn refresh(&mut self, ctx: &RenderContext, entries: &[(usize, MenuItem)]);

    /// The container changed shape; the host must rebuild its window.
    fn reshape(&mut self, layout: Layout) {
        let _ = layout;
    }
}

/// A viewport that discards everything.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoViewport;

impl Viewport for NoViewport {
    fn refresh(&mut self, _ctx: &RenderContext, _entries: &[(usize, MenuItem)]) {}
}

impl<V: Viewport + ?Sized> Viewport for &mut V {
    fn refresh(&mut self, ctx: &RenderContext, entries: &[(usize, MenuItem)]) {
        (**self).refresh(ctx, entries);
    }

    fn reshape(&mut self, layout: Layout) {
        (**self).reshape(layout);
    }
}
