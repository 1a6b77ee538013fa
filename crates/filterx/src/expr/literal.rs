//! A constant value embedded directly in the expression tree.

use super::FilterXExpr;
use crate::context::FilterXEvalContext;
use crate::error::RunResult;
use crate::host::FilterXHost;
use crate::object::FilterXValue;
use crate::reference::FilterXRef;

#[derive(Debug, Clone)]
pub struct LiteralExpr {
    value: FilterXValue,
}

impl LiteralExpr {
    #[must_use]
    pub fn new(value: FilterXValue) -> Self {
        Self { value }
    }
}

impl FilterXExpr for LiteralExpr {
    fn eval(&self, _ctx: &mut FilterXEvalContext, _host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        Ok(FilterXRef::new(self.value.clone()))
    }

    fn as_literal_value(&self) -> Option<&FilterXValue> {
        Some(&self.value)
    }
}
