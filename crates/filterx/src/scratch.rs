//! Per-thread scratch buffer with mark/reclaim lifetime bracketing.
//!
//! `message_value` objects (`object::message_value`) and the template
//! expression (`expr::template`) write their rendered text into this arena
//! rather than allocating a fresh `String` per field per record. A
//! [`ScratchGuard`] brackets one evaluation region: everything written after
//! `mark()` is released when the guard drops, so a borrow taken inside the
//! region can never outlive it (enforced dynamically via `Rc`-free borrow
//! checking — see `ScratchRef`).

use std::cell::RefCell;

thread_local! {
    static SCRATCH: RefCell<ScratchArena> = RefCell::new(ScratchArena::new());
}

/// Append-only byte/text arena, reset back to a mark on reclaim.
///
/// Modeled on a per-thread bump allocator (one arena per worker
/// thread, never shared across threads) but reset-based rather than
/// leak-based: FilterX evaluates millions of short-lived records per thread,
/// so marks are reclaimed every record instead of only at thread exit.
#[derive(Debug, Default)]
pub struct ScratchArena {
    buf: String,
}

impl ScratchArena {
    #[must_use]
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    fn mark(&self) -> usize {
        self.buf.len()
    }

    fn reclaim(&mut self, mark: usize) {
        self.buf.truncate(mark);
    }

    /// Writes `text` into the arena and returns the byte range it occupies.
    fn push(&mut self, text: &str) -> (usize, usize) {
        let start = self.buf.len();
        self.buf.push_str(text);
        (start, self.buf.len())
    }
}

/// RAII bracket for one scratch region on the current thread.
///
/// Dropping the guard reclaims every byte written since it was created,
/// including bytes written by nested guards that were already dropped.
pub struct ScratchGuard {
    mark: usize,
}

impl ScratchGuard {
    /// Opens a new scratch region on the current thread's arena.
    #[must_use]
    pub fn mark() -> Self {
        let mark = SCRATCH.with(|s| s.borrow().mark());
        Self { mark }
    }

    /// Writes `text` into the region and returns a handle that can be
    /// resolved back to `&str` only while this guard (or an ancestor) is
    /// alive.
    pub fn write(&self, text: &str) -> ScratchHandle {
        let (start, end) = SCRATCH.with(|s| s.borrow_mut().push(text));
        ScratchHandle { start, end }
    }
}

impl Drop for ScratchGuard {
    fn drop(&mut self) {
        SCRATCH.with(|s| s.borrow_mut().reclaim(self.mark));
    }
}

/// A byte range into the current thread's scratch arena.
///
/// Legal to resolve only until the enclosing [`ScratchGuard`] reclaims its
/// mark. Resolving after reclaim either returns stale/empty data or a
/// different record's text — callers must not hold a `ScratchHandle` past
/// the eval step that produced it; `clone()` any value that must outlive
/// the region, since storing it into a container must trigger a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScratchHandle {
    start: usize,
    end: usize,
}

impl ScratchHandle {
    /// Copies the referenced bytes out into an owned `String`.
    ///
    /// This is the only safe way to get data out of the scratch arena; there
    /// is deliberately no borrowed-`&str` accessor, since the arena is
    /// thread-local and reset outside of any lifetime Rust can track.
    #[must_use]
    pub fn to_owned_string(self) -> String {
        SCRATCH.with(|s| s.borrow().buf[self.start..self.end].to_string())
    }
}
