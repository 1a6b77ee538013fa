//! The FilterX variable layer: named slots bound either to a message field
//! (lifetime = record) or to an evaluation-local scope (floating or
//! declared), addressed by compact integer handles.

pub mod directory;
pub mod scope;

pub use directory::VariableDirectory;
pub use scope::FilterXScope;

use crate::reference::FilterXRef;

const FLOATING_BIT: u32 = 1 << 31;

/// A compact integer handle to a variable.
///
/// MSB=1 marks a floating/local-scope variable, whose remaining 31 bits are
/// a slot index into a [`FilterXScope`]'s floating array. MSB=0 marks a
/// message-tied variable, whose remaining bits are the underlying field
/// identifier understood by `host::message_store` ("the top bit is
/// reserved by FilterX to mark floating variables").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VariableHandle(u32);

impl VariableHandle {
    #[must_use]
    pub fn message_tied(field_id: u32) -> Self {
        debug_assert!(field_id & FLOATING_BIT == 0, "field id must not set the floating bit");
        Self(field_id & !FLOATING_BIT)
    }

    #[must_use]
    pub fn floating(slot: u32) -> Self {
        Self(slot | FLOATING_BIT)
    }

    #[must_use]
    pub fn is_floating(self) -> bool {
        self.0 & FLOATING_BIT != 0
    }

    #[must_use]
    pub fn slot_index(self) -> u32 {
        self.0 & !FLOATING_BIT
    }

    #[must_use]
    pub fn field_id(self) -> u32 {
        self.0 & !FLOATING_BIT
    }

    #[must_use]
    pub fn raw(self) -> u32 {
        self.0
    }
}

/// Which evaluation scope a floating variable belongs to (message-tied
/// variables have no `VariableType` of their own — they're always resolved
/// through the message store).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableType {
    MessageTied,
    /// Cleared to unset at the start of every record.
    Floating,
    /// Persists across loop iterations within the declaring block; still
    /// cleared when a brand new evaluation context is created for the next
    /// record.
    DeclaredFloating,
}

/// A single variable slot.
///
/// A variable is considered live iff its value is non-null; we model that
/// as `value: Option<FilterXRef>` rather than carrying an explicit null
/// object sentinel.
#[derive(Debug, Clone)]
pub struct FilterXVariable {
    pub handle: VariableHandle,
    pub variable_type: VariableType,
    pub assigned: bool,
    pub generation: u16,
    value: Option<FilterXRef>,
}

impl FilterXVariable {
    #[must_use]
    pub fn new_unset(handle: VariableHandle, variable_type: VariableType) -> Self {
        Self {
            handle,
            variable_type,
            assigned: false,
            generation: 0,
            value: None,
        }
    }

    #[must_use]
    pub fn is_live(&self) -> bool {
        self.value.is_some()
    }

    #[must_use]
    pub fn get(&self) -> Option<&FilterXRef> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: FilterXRef) {
        self.value = Some(value);
        self.assigned = true;
    }

    /// Unsets the value but keeps the slot alive and bumps its generation,
    /// so stale holders of the old generation can detect staleness.
    pub fn unset(&mut self) {
        self.value = None;
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_handle_round_trips_slot_index() {
        let h = VariableHandle::floating(7);
        assert!(h.is_floating());
        assert_eq!(h.slot_index(), 7);
    }

    #[test]
    fn message_tied_handle_is_not_floating() {
        let h = VariableHandle::message_tied(42);
        assert!(!h.is_floating());
        assert_eq!(h.field_id(), 42);
    }

    #[test]
    fn unset_bumps_generation_and_clears_liveness() {
        let handle = VariableHandle::floating(0);
        let mut var = FilterXVariable::new_unset(handle, VariableType::Floating);
        var.set(FilterXRef::new(crate::object::FilterXValue::Int(1)));
        assert!(var.is_live());
        let gen_before = var.generation;
        var.unset();
        assert!(!var.is_live());
        assert_eq!(var.generation, gen_before.wrapping_add(1));
    }
}
