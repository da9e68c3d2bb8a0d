//! Reading session: position, progress, and persistence

mod store;

pub use store::{MemoryStore, PositionStore};

use log::debug;

/// Navigation intent produced by a UI event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    First,
    Last,
}

impl NavCommand {
    /// Map a keyboard key name to a navigation intent.
    ///
    /// The horizontal arrows swap for right-to-left books: flipping forward
    /// through an Arabic novel is a left-arrow.
    pub fn from_key(key: &str, rtl: bool) -> Option<Self> {
        match key {
            "ArrowRight" => Some(if rtl { NavCommand::Prev } else { NavCommand::Next }),
            "ArrowLeft" => Some(if rtl { NavCommand::Next } else { NavCommand::Prev }),
            "PageDown" | " " => Some(NavCommand::Next),
            "PageUp" => Some(NavCommand::Prev),
            "Home" => Some(NavCommand::First),
            "End" => Some(NavCommand::Last),
            _ => None,
        }
    }
}

/// Mutable per-open-book state: current page index, progress, persistence.
///
/// A session opens in the ready state with the stored position restored when
/// it parses as an integer inside `[0, total_pages)`. Every navigation clamps
/// its target to the valid range and writes the result back through the
/// store, so `0 <= current < total_pages` holds at all times and the store
/// never sees an out-of-range value.
pub struct ReadingSession<S: PositionStore> {
    current: usize,
    total_pages: usize,
    storage_key: String,
    store: S,
}

impl<S: PositionStore> ReadingSession<S> {
    /// Open a session over `total_pages` pages, restoring any valid saved
    /// position under `storage_key`. A zero page count is treated as one
    /// page, so the invariant holds even for degenerate input.
    pub fn open(total_pages: usize, storage_key: impl Into<String>, store: S) -> Self {
        let storage_key = storage_key.into();
        let total_pages = total_pages.max(1);
        let current = restore_position(&store, &storage_key, total_pages);

        debug!(
            "session open key={:?} total={} restored={}",
            storage_key, total_pages, current
        );

        Self {
            current,
            total_pages,
            storage_key,
            store,
        }
    }

    /// Re-enter the ready state after re-pagination, possibly under a new
    /// key. The in-memory index is discarded and the stored position is
    /// re-validated against the new page count, which may have changed.
    pub fn rebind(&mut self, storage_key: impl Into<String>, total_pages: usize) {
        self.storage_key = storage_key.into();
        self.total_pages = total_pages.max(1);
        self.current = restore_position(&self.store, &self.storage_key, self.total_pages);

        debug!(
            "session rebind key={:?} total={} restored={}",
            self.storage_key, self.total_pages, self.current
        );
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Flip forward one page; no-op at the last page.
    pub fn next(&mut self) -> usize {
        self.jump(self.current as i64 + 1)
    }

    /// Flip back one page; no-op at the first page.
    pub fn prev(&mut self) -> usize {
        self.jump(self.current as i64 - 1)
    }

    /// Jump to `target`, clamped to `[0, total_pages - 1]`, and persist the
    /// landing index. Returns the index actually landed on.
    pub fn jump(&mut self, target: i64) -> usize {
        let max = (self.total_pages - 1) as i64;
        let landed = target.clamp(0, max) as usize;

        if landed != self.current {
            debug!(
                "session {:?}: page {} -> {}",
                self.storage_key, self.current, landed
            );
            self.current = landed;
        }
        self.store.set(&self.storage_key, &landed.to_string());

        self.current
    }

    /// Apply a navigation intent.
    pub fn apply(&mut self, command: NavCommand) -> usize {
        match command {
            NavCommand::Next => self.next(),
            NavCommand::Prev => self.prev(),
            NavCommand::First => self.jump(0),
            NavCommand::Last => self.jump(self.total_pages as i64 - 1),
        }
    }

    /// Progress through the book as a whole-number percentage: 0 at the
    /// title page, 100 at the last page, 0 for single-page documents.
    pub fn progress_percent(&self) -> u8 {
        if self.total_pages <= 1 {
            return 0;
        }
        let span = (self.total_pages - 1) as f64;
        ((self.current as f64 / span) * 100.0).round() as u8
    }
}

/// A stored value is honored only when it parses as an integer within range;
/// anything else reads as "no saved position".
fn restore_position<S: PositionStore>(store: &S, key: &str, total_pages: usize) -> usize {
    store
        .get(key)
        .and_then(|raw| raw.trim().parse::<usize>().ok())
        .filter(|&index| index < total_pages)
        .unwrap_or(0)
}
