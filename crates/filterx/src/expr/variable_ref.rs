//! Reads a floating or message-tied variable.
//!
//! Resolving a source-level name to a [`VariableHandle`] is the parser's
//! job (out of scope here; parsing text into a tree is left to a
//! separate front end); this
//! node is always constructed with its handle already known.

use super::FilterXExpr;
use crate::context::FilterXEvalContext;
use crate::error::{ErrorFrame, RunResult};
use crate::host::FilterXHost;
use crate::object::{FilterXValue, MessageValue};
use crate::reference::FilterXRef;
use crate::variable::VariableHandle;

#[derive(Debug, Clone)]
pub struct VariableRefExpr {
    handle: VariableHandle,
    name: String,
}

impl VariableRefExpr {
    #[must_use]
    pub fn new(handle: VariableHandle, name: impl Into<String>) -> Self {
        Self { handle, name: name.into() }
    }

    #[must_use]
    pub fn handle(&self) -> VariableHandle {
        self.handle
    }
}

impl FilterXExpr for VariableRefExpr {
    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        if self.handle.is_floating() {
            return match ctx.scope().get(self.handle) {
                Ok(value) => Ok(value.unwrap_or_else(|| FilterXRef::new(FilterXValue::Null))),
                Err(err) => {
                    ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
                    Err(err)
                }
            };
        }
        let Some(message) = ctx.primary_message() else {
            return Ok(FilterXRef::new(FilterXValue::Null));
        };
        let scratch = ctx.scratch_mark();
        match host.messages.read_field(message, self.handle.field_id(), &scratch) {
            Some(field) => Ok(FilterXRef::new(FilterXValue::Message(MessageValue::borrowed(field.handle, field.value_type)))),
            None => Ok(FilterXRef::new(FilterXValue::Null)),
        }
    }

    fn location(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::test_support::TestHost;
    use crate::host::LogMessageStore;
    use crate::object::LogMessageValueType;
    use crate::variable::VariableDirectory;

    #[test]
    fn unset_floating_variable_reads_as_null() {
        let dir = VariableDirectory::global();
        let handle = dir.intern("variable_ref_test_unset");
        let expr = VariableRefExpr::new(handle, "unset_var");
        let mut ctx = FilterXEvalContext::with_directory(vec![1], Default::default(), dir);
        let mut host = TestHost::new();
        let result = expr.eval(&mut ctx, &mut host.as_host()).unwrap();
        assert_eq!(result.get(), &FilterXValue::Null);
    }

    #[test]
    fn floating_variable_reads_assigned_value() {
        let dir = VariableDirectory::global();
        let handle = dir.intern("variable_ref_test_assigned");
        let expr = VariableRefExpr::new(handle, "x");
        let mut ctx = FilterXEvalContext::with_directory(vec![1], Default::default(), dir);
        ctx.scope_mut().set(handle, FilterXRef::new(FilterXValue::Int(7))).unwrap();
        let mut host = TestHost::new();
        let result = expr.eval(&mut ctx, &mut host.as_host()).unwrap();
        assert_eq!(result.get(), &FilterXValue::Int(7));
    }

    #[test]
    fn message_tied_variable_reads_through_host_store() {
        let mut host = TestHost::new();
        let field_id = host.messages.resolve_name("HOST");
        host.messages.write_field(1, field_id, LogMessageValueType::String, b"server-01");
        let handle = VariableHandle::message_tied(field_id);
        let expr = VariableRefExpr::new(handle, "HOST");
        let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
        let result = expr.eval(&mut ctx, &mut host.as_host()).unwrap();
        assert_eq!(result.get().repr(), "server-01");
    }
}
