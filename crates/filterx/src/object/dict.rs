//! `FilterXDict`: an insertion-ordered string-keyed map.
//!
//! Storage shape: a `HashTable` of
//! indices for O(1) lookup, paired with a dense `Vec` of entries that
//! preserves declaration order for iteration and `repr`. FilterX dict
//! literals need exactly that ordering guarantee: the resulting
//! container has exactly N entries, keyed by their evaluated keys.

use std::cell::Cell;
use std::hash::{BuildHasher, Hash, Hasher};

use ahash::RandomState;
use hashbrown::HashTable;

use crate::reference::FilterXRef;

#[derive(Debug, Clone)]
struct DictEntry {
    key: String,
    value: FilterXRef,
}

#[derive(Debug, Clone)]
pub struct FilterXDict {
    indices: HashTable<usize>,
    entries: Vec<DictEntry>,
    hasher: RandomState,
    frozen: Cell<bool>,
}

impl Default for FilterXDict {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterXDict {
    #[must_use]
    pub fn new() -> Self {
        Self {
            indices: HashTable::new(),
            entries: Vec::new(),
            hasher: RandomState::new(),
            frozen: Cell::new(false),
        }
    }

    fn hash_key(&self, key: &str) -> u64 {
        let mut hasher = self.hasher.build_hasher();
        key.hash(&mut hasher);
        hasher.finish()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen.get()
    }

    pub fn freeze(&self) {
        self.frozen.set(true);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FilterXRef> {
        let hash = self.hash_key(key);
        self.indices
            .find(hash, |&idx| self.entries[idx].key == key)
            .map(|&idx| &self.entries[idx].value)
    }

    /// Inserts or replaces the value at `key`, preserving the original
    /// position on replace (insertion-order dict semantics: `d["a"] =
    /// 2` after `d["a"] = 1` does not move `"a"` to the end).
    pub fn set(&mut self, key: String, value: FilterXRef) {
        let hash = self.hash_key(&key);
        if let Some(&idx) = self.indices.find(hash, |&idx| self.entries[idx].key == key) {
            self.entries[idx].value = value;
            return;
        }
        let idx = self.entries.len();
        self.entries.push(DictEntry { key, value });
        self.indices.insert_unique(hash, idx, |&i| self.hash_key(&self.entries[i].key));
    }

    /// Removes `key` if present, keeping the remaining entries in order.
    pub fn unset(&mut self, key: &str) {
        let hash = self.hash_key(key);
        let Ok(entry) = self.indices.find_entry(hash, |&idx| self.entries[idx].key == key) else {
            return;
        };
        let (removed_idx, _) = entry.remove();
        self.entries.remove(removed_idx);
        // Every index after the removed one shifted left by one; rebuild the
        // table rather than patch each entry, dict unset is not a hot path.
        self.rebuild_indices();
    }

    fn rebuild_indices(&mut self) {
        self.indices.clear();
        for idx in 0..self.entries.len() {
            let hash = self.hash_key(&self.entries[idx].key);
            self.indices.insert_unique(hash, idx, |&i| self.hash_key(&self.entries[i].key));
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FilterXRef)> {
        self.entries.iter().map(|e| (e.key.as_str(), &e.value))
    }

    #[must_use]
    pub fn clone_deep(&self) -> Self {
        let mut out = Self::new();
        for entry in &self.entries {
            out.set(entry.key.clone(), FilterXRef::new(entry.value.get().clone_deep()));
        }
        out
    }

    #[must_use]
    pub fn repr(&self) -> String {
        let mut s = String::from("{");
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                s.push_str(", ");
            }
            s.push('"');
            s.push_str(&entry.key);
            s.push_str("\": ");
            s.push_str(&entry.value.get().repr());
        }
        s.push('}');
        s
    }
}

impl PartialEq for FilterXDict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| v.get() == ov.get()))
    }
}
