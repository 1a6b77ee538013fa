//! Copy-on-write shared handle over a [`FilterXValue`](crate::object::FilterXValue).
//!
//! `FilterXRef` is the one smart pointer every expression node actually
//! holds and passes around. Reads unwrap transparently (`Arc::deref`);
//! writes go through [`FilterXRef::make_mut`], which unshares the payload
//! with a deep clone exactly when more than one strong holder exists —
//! `Arc::make_mut` already implements precisely the copy-on-write contract
//! this type needs, so `FilterXRef` is a thin, documented wrapper around it
//! rather than a hand-rolled refcount.

use std::sync::Arc;

use crate::error::{FilterXError, RunResult};
use crate::object::FilterXValue;

/// A strong, shareable, copy-on-write reference to a [`FilterXValue`].
///
/// Reference counting is atomic (`Arc`) so that frozen/shared objects and
/// the expression tree that produced them may be handed across threads,
/// while a write still unshares with a deep clone unless the evaluation
/// context holding it is the sole live owner.
#[derive(Debug, Clone)]
pub struct FilterXRef {
    inner: Arc<FilterXValue>,
}

impl FilterXRef {
    #[must_use]
    pub fn new(value: FilterXValue) -> Self {
        Self { inner: Arc::new(value) }
    }

    /// Transparent read access. Always succeeds: shared readers never block
    /// or copy.
    #[must_use]
    pub fn get(&self) -> &FilterXValue {
        &self.inner
    }

    /// Number of strong holders of the underlying value. More than one
    /// triggers an unshare (deep clone) on the next write.
    #[must_use]
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    /// Mutable access, unsharing (deep-cloning) the payload first if it is
    /// held by more than one reference. Rejects the call outright if the
    /// object is frozen.
    pub fn make_mut(&mut self) -> RunResult<&mut FilterXValue> {
        if self.inner.is_frozen() {
            return Err(FilterXError::eval("cannot mutate a frozen object"));
        }
        Ok(Arc::make_mut(&mut self.inner))
    }

    /// True if this handle is the sole strong owner of its payload.
    #[must_use]
    pub fn is_uniquely_owned(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }
}

impl PartialEq for FilterXRef {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner.as_ref() == other.inner.as_ref()
    }
}
