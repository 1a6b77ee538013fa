//! Assignment to a floating or message-tied variable.

use super::FilterXExpr;
use crate::config::FilterXConfig;
use crate::context::FilterXEvalContext;
use crate::error::{ErrorFrame, RunResult};
use crate::host::FilterXHost;
use crate::reference::FilterXRef;
use crate::variable::VariableHandle;

#[derive(Debug)]
pub struct AssignExpr {
    handle: VariableHandle,
    value: Box<dyn FilterXExpr>,
}

impl AssignExpr {
    #[must_use]
    pub fn new(handle: VariableHandle, value: Box<dyn FilterXExpr>) -> Self {
        Self { handle, value }
    }
}

impl FilterXExpr for AssignExpr {
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        self.value.init(config)
    }

    fn optimize(&mut self) {
        self.value.optimize();
    }

    fn deinit(&mut self) {
        self.value.deinit();
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let value = self.value.eval_traced(ctx, host)?;
        if self.handle.is_floating() {
            if let Err(err) = ctx.scope_mut().set(self.handle, value.clone()) {
                ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
                return Err(err);
            }
        } else if let Some(message) = ctx.primary_message() {
            let (text, value_type) = value.get().marshal();
            host.messages.write_field(message, self.handle.field_id(), value_type, text.as_bytes());
        }
        Ok(value)
    }
}
