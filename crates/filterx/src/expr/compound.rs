//! A sequence of expressions evaluated with short-circuit AND semantics
//! the compound as a whole is the filter's pass/fail verdict
//! unless `ignore_falsy_result` opts a child out of that role, and
//! `return_value_of_last_expr` decides whether the compound yields its last
//! child's value (for an expression used as a value, e.g. the body of a
//! function) rather than a plain boolean (for a filter's top-level verdict).

use super::FilterXExpr;
use crate::config::FilterXConfig;
use crate::context::{ControlModifier, FilterXEvalContext};
use crate::error::{ErrorFrame, FilterXError, RunResult};
use crate::host::FilterXHost;
use crate::object::FilterXValue;
use crate::reference::FilterXRef;

#[derive(Debug)]
pub struct CompoundExpr {
    children: Vec<Box<dyn FilterXExpr>>,
    /// Per-child: if true, a falsy result does not stop evaluation of the
    /// remaining children (a statement like an assignment has no
    /// pass/fail meaning of its own).
    ignore_falsy_result: Vec<bool>,
    return_value_of_last_expr: bool,
}

impl CompoundExpr {
    #[must_use]
    pub fn new(children: Vec<Box<dyn FilterXExpr>>, ignore_falsy_result: Vec<bool>, return_value_of_last_expr: bool) -> Self {
        assert_eq!(children.len(), ignore_falsy_result.len(), "one ignore_falsy_result flag per child");
        Self {
            children,
            ignore_falsy_result,
            return_value_of_last_expr,
        }
    }

    /// Convenience constructor for a plain filter body: every child
    /// participates in the short-circuit, the compound's own result is
    /// always a boolean verdict.
    #[must_use]
    pub fn filter_body(children: Vec<Box<dyn FilterXExpr>>) -> Self {
        let flags = vec![false; children.len()];
        Self::new(children, flags, false)
    }
}

impl FilterXExpr for CompoundExpr {
    /// Initializes children in declaration order; on failure, already-
    /// initialized children are `deinit`-ed in reverse.
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        for (i, child) in self.children.iter_mut().enumerate() {
            if let Err(err) = child.init(config) {
                for child in self.children[..i].iter_mut().rev() {
                    child.deinit();
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn optimize(&mut self) {
        for child in &mut self.children {
            child.optimize();
        }
    }

    fn deinit(&mut self) {
        for child in self.children.iter_mut().rev() {
            child.deinit();
        }
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let mut last = FilterXRef::new(FilterXValue::Bool(true));
        for (i, child) in self.children.iter().enumerate() {
            // The modifier is checked *before* evaluating
            // each child, not after — a modifier already active when this
            // compound is entered (e.g. set by an enclosing block) must
            // skip every one of its children, not just the ones after the
            // first `eval` call.
            if ctx.control_modifier().is_active() {
                break;
            }

            last = child.eval_traced(ctx, host)?;

            let ignore_falsy = self.ignore_falsy_result.get(i).copied().unwrap_or(false);
            if !ignore_falsy && !last.get().truthy() {
                ctx.push_error(
                    ErrorFrame::new(self.location().map(String::from), "bailing out due to a falsy expr").with_offending(last.get().repr()),
                );
                return Err(FilterXError::eval("bailing out due to a falsy expr"));
            }
        }

        if ctx.control_modifier() == ControlModifier::Drop || ctx.control_modifier() == ControlModifier::Done {
            return Ok(FilterXRef::new(FilterXValue::Bool(true)));
        }

        if self.return_value_of_last_expr {
            Ok(last)
        } else {
            Ok(FilterXRef::new(FilterXValue::Bool(true)))
        }
    }
}
