//! The `drop` and `done` control-flow statements:
//! cooperative cancellation signals a compound expression observes before
//! evaluating each subsequent child. Neither is an error — both report a
//! successful (truthy) evaluation up through the tree, matching the
//! testable property "evaluating yields true (not an error)".

use super::FilterXExpr;
use crate::context::{ControlModifier, FilterXEvalContext};
use crate::error::RunResult;
use crate::host::FilterXHost;
use crate::object::FilterXValue;
use crate::reference::FilterXRef;

#[derive(Debug, Clone, Copy, Default)]
pub struct DropExpr;

impl FilterXExpr for DropExpr {
    fn eval(&self, ctx: &mut FilterXEvalContext, _host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        ctx.set_control_modifier(ControlModifier::Drop);
        Ok(FilterXRef::new(FilterXValue::Bool(true)))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DoneExpr;

impl FilterXExpr for DoneExpr {
    fn eval(&self, ctx: &mut FilterXEvalContext, _host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        ctx.set_control_modifier(ControlModifier::Done);
        Ok(FilterXRef::new(FilterXValue::Bool(true)))
    }
}
