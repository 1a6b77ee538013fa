//! Per-context floating-variable table.
//!
//! Message-tied variables are not stored here at all — they're resolved
//! directly through `host::message_store` using the field id carried in
//! their handle. This table only holds the evaluation-local ("floating")
//! slots a script introduces with assignment (`x = 1`).

use super::{FilterXVariable, VariableDirectory, VariableHandle, VariableType};
use crate::error::{FilterXError, RunResult};
use crate::reference::FilterXRef;

pub struct FilterXScope {
    floating: Vec<FilterXVariable>,
}

impl FilterXScope {
    /// Builds a fresh scope sized to the directory's current floating
    /// variable count. Every slot starts unset: non-declared floatings
    /// are cleared each record.
    #[must_use]
    pub fn new(directory: &VariableDirectory) -> Self {
        let count = directory.floating_count();
        let floating = (0..count)
            .map(|slot| FilterXVariable::new_unset(VariableHandle::floating(slot), VariableType::Floating))
            .collect();
        Self { floating }
    }

    /// Declares slot `handle` as `DeclaredFloating`, so a subsequent
    /// [`Self::reset_iteration`] leaves it alone: a declared floating
    /// variable persists across iterations within its declaring block
    /// instead of being cleared at the top of each one.
    pub fn declare(&mut self, handle: VariableHandle) -> RunResult<()> {
        let slot = self.slot_mut(handle)?;
        slot.variable_type = VariableType::DeclaredFloating;
        Ok(())
    }

    fn slot_mut(&mut self, handle: VariableHandle) -> RunResult<&mut FilterXVariable> {
        self.floating
            .get_mut(handle.slot_index() as usize)
            .ok_or_else(|| FilterXError::eval("floating variable handle out of range"))
    }

    fn slot(&self, handle: VariableHandle) -> RunResult<&FilterXVariable> {
        self.floating
            .get(handle.slot_index() as usize)
            .ok_or_else(|| FilterXError::eval("floating variable handle out of range"))
    }

    pub fn get(&self, handle: VariableHandle) -> RunResult<Option<FilterXRef>> {
        Ok(self.slot(handle)?.get().cloned())
    }

    pub fn set(&mut self, handle: VariableHandle, value: FilterXRef) -> RunResult<()> {
        self.slot_mut(handle)?.set(value);
        Ok(())
    }

    pub fn unset(&mut self, handle: VariableHandle) -> RunResult<()> {
        self.slot_mut(handle)?.unset();
        Ok(())
    }

    /// Resets every non-declared floating slot back to unset, leaving
    /// `DeclaredFloating` slots untouched — used between iterations of a
    /// repeated sub-block within the same record.
    pub fn reset_iteration(&mut self) {
        for var in &mut self.floating {
            if var.variable_type == VariableType::Floating {
                var.unset();
            }
        }
    }
}
