//! Page-number window for the pagination control.
//!
//! At most seven tokens are produced whatever the page count: the first and
//! last page are always present and the rest collapse into ellipses around
//! a three-page neighbourhood of the current page.

/// A renderable unit of the pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageToken {
    Page(u32),
    Ellipsis,
}

const MAX_UNCOLLAPSED: u32 = 7;

/// Tokens to render, left to right, for `current` out of `total` pages.
///
/// A `total` of zero is rendered as a single page, and `current` is clamped
/// into `[1, total]` first.
pub fn page_window(current: u32, total: u32) -> Vec<PageToken> {
    use PageToken::{Ellipsis, Page};

    let total = total.max(1);
    let current = current.clamp(1, total);

    if total <= MAX_UNCOLLAPSED {
        return (1..=total).map(Page).collect();
    }

    let mut tokens = vec![Page(1)];
    if current <= 3 {
        tokens.extend([Page(2), Page(3), Page(4), Ellipsis, Page(total)]);
    } else if current >= total - 2 {
        tokens.extend([
            Ellipsis,
            Page(total - 3),
            Page(total - 2),
            Page(total - 1),
            Page(total),
        ]);
    } else {
        tokens.extend([
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(total),
        ]);
    }
    tokens
}

/// Current page plus the page count, with boundary-aware navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    current: u32,
    total: u32,
}

impl Pager {
    pub fn new(current: u32, total: u32) -> Self {
        let total = total.max(1);
        Self {
            current: current.clamp(1, total),
            total,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn has_next(&self) -> bool {
        self.current < self.total
    }

    /// Clamped target page for a click on `page`.
    pub fn select(&self, page: u32) -> u32 {
        page.clamp(1, self.total)
    }

    /// `None` when already on the first page.
    pub fn previous(&self) -> Option<u32> {
        self.has_previous().then(|| self.current - 1)
    }

    /// `None` when already on the last page.
    pub fn next(&self) -> Option<u32> {
        self.has_next().then(|| self.current + 1)
    }

    pub fn tokens(&self) -> Vec<PageToken> {
        page_window(self.current, self.total)
    }
}
