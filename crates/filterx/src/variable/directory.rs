//! Process-wide name→handle interning directory for floating variables.
//!
//! Modeled on a typical string interner (`StringId`, a newtype index
//! into a growable table behind a `LazyLock`), generalized here to a
//! concurrent map guarded by an init-once lock rather than a single-threaded
//! `RefCell`, since FilterX expression trees — and therefore the variable
//! names they reference — are registered once at configuration time and
//! then read from multiple evaluation threads: a process-wide name→handle
//! mapping initialized at startup and addressed behind an init-once guard.

use std::sync::{OnceLock, RwLock};

use ahash::AHashMap;

use super::VariableHandle;

#[derive(Debug, Default)]
struct DirectoryState {
    by_name: AHashMap<String, VariableHandle>,
    next_slot: u32,
}

/// The process-wide floating-variable name directory.
///
/// Message-tied handles are never interned here — they come pre-assigned
/// from the host message store's own `name → handle` registration and are
/// looked up by the compiler-side parser before `FilterXExpr` nodes are
/// constructed.
pub struct VariableDirectory {
    state: RwLock<DirectoryState>,
}

impl VariableDirectory {
    fn new() -> Self {
        Self {
            state: RwLock::new(DirectoryState::default()),
        }
    }

    /// Returns the process-wide singleton directory.
    pub fn global() -> &'static Self {
        static DIRECTORY: OnceLock<VariableDirectory> = OnceLock::new();
        DIRECTORY.get_or_init(Self::new)
    }

    /// Returns the handle for `name`, interning a fresh one if this is the
    /// first time this name has been seen.
    pub fn intern(&self, name: &str) -> VariableHandle {
        if let Some(handle) = self.state.read().expect("directory lock poisoned").by_name.get(name) {
            return *handle;
        }
        let mut state = self.state.write().expect("directory lock poisoned");
        // Re-check: another thread may have interned `name` while we waited for the write lock.
        if let Some(handle) = state.by_name.get(name) {
            return *handle;
        }
        let slot = state.next_slot;
        state.next_slot += 1;
        let handle = VariableHandle::floating(slot);
        state.by_name.insert(name.to_string(), handle);
        handle
    }

    /// Number of distinct floating variable names interned so far. Used to
    /// size a fresh [`super::FilterXScope`]'s floating array.
    pub fn floating_count(&self) -> u32 {
        self.state.read().expect("directory lock poisoned").next_slot
    }
}
