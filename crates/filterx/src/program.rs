//! The host-facing entry point: binds the `init`/`optimize`/`eval`/`deinit`
//! lifecycle to one compiled expression tree, so a host never
//! has to drive those phases by hand.
//!
//! A [`FilterXProgram`] is built once per running configuration (`init` +
//! `optimize`), then `eval`'d once per record against a fresh
//! [`FilterXEvalContext`]; `deinit` runs automatically on `Drop`, matching
//! the property that running the pair N times does not leak.

use crate::config::FilterXConfig;
use crate::context::{ControlModifier, FilterXEvalContext};
use crate::error::RunResult;
use crate::expr::FilterXExpr;
use crate::host::FilterXHost;
use crate::reference::FilterXRef;

/// What a host observes after running one record through a program: the
/// resulting boolean/object and the control modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The filter's boolean pass/fail result.
    Passed(bool),
    /// A non-boolean value, for a tree built as a value expression
    /// (`return_value_of_last_expr = true`) rather than a filter.
    Value,
    /// `eval_control_modifier` was set to `DROP`: discard the record.
    Drop,
    /// `eval_control_modifier` was set to `DONE`: stop processing, keep the
    /// record as-is.
    Done,
}

/// A compiled, ready-to-evaluate expression tree, `init`-ed exactly once
/// and re-entered for every record ("expression trees are shared,
/// immutable after initialization, and re-entered per record").
pub struct FilterXProgram {
    root: Box<dyn FilterXExpr>,
    deinitialized: bool,
}

impl FilterXProgram {
    /// Runs `init` then `optimize` over the whole tree. On an `init`
    /// failure, the tree is left fully torn down (see `CompoundExpr::init`'s
    /// reverse-order unwind) and the error is returned to the caller
    /// without ever constructing a `FilterXProgram`.
    pub fn compile(mut root: Box<dyn FilterXExpr>, config: &mut FilterXConfig) -> RunResult<Self> {
        root.init(config)?;
        root.optimize();
        Ok(Self {
            root,
            deinitialized: false,
        })
    }

    /// Evaluates the program against one record's context, translating the
    /// raw `FilterXRef`/`ControlModifier` pair into a host-facing verdict.
    pub fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<Verdict> {
        let result = self.root.eval_traced(ctx, host)?;
        Ok(match ctx.control_modifier() {
            ControlModifier::Drop => Verdict::Drop,
            ControlModifier::Done => Verdict::Done,
            ControlModifier::None => match result.get() {
                crate::object::FilterXValue::Bool(b) => Verdict::Passed(*b),
                _ => Verdict::Value,
            },
        })
    }

    /// Evaluates the program and returns the raw produced value alongside
    /// its verdict classification, for callers that want the value itself
    /// (e.g. a value expression rather than a filter's verdict).
    pub fn eval_value(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<(FilterXRef, Verdict)> {
        let result = self.root.eval_traced(ctx, host)?;
        let verdict = match ctx.control_modifier() {
            ControlModifier::Drop => Verdict::Drop,
            ControlModifier::Done => Verdict::Done,
            ControlModifier::None => match result.get() {
                crate::object::FilterXValue::Bool(b) => Verdict::Passed(*b),
                _ => Verdict::Value,
            },
        };
        Ok((result, verdict))
    }

    /// Explicit teardown, for callers that want deinit to run at a known
    /// point rather than whenever the program happens to drop.
    pub fn deinit(mut self) {
        self.deinit_once();
    }

    fn deinit_once(&mut self) {
        if !self.deinitialized {
            self.root.deinit();
            self.deinitialized = true;
        }
    }
}

impl Drop for FilterXProgram {
    fn drop(&mut self) {
        self.deinit_once();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::compound::CompoundExpr;
    use crate::expr::literal::LiteralExpr;
    use crate::expr::test_support::TestHost;
    use crate::functions::regexp_search::RegexpSearchMode;
    use crate::functions::RegexpSearchExpr;
    use crate::object::FilterXValue;

    fn lit(v: FilterXValue) -> Box<dyn FilterXExpr> {
        Box::new(LiteralExpr::new(v))
    }

    #[test]
    fn compile_then_eval_round_trips_a_passing_filter() {
        let root = Box::new(CompoundExpr::filter_body(vec![lit(FilterXValue::Bool(true))]));
        let mut config = FilterXConfig::new();
        let program = FilterXProgram::compile(root, &mut config).unwrap();

        let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
        let mut host = TestHost::new();
        assert_eq!(program.eval(&mut ctx, &mut host.as_host()).unwrap(), Verdict::Passed(true));
    }

    #[test]
    fn compile_propagates_configuration_errors_from_nested_regexp_search() {
        let root = Box::new(CompoundExpr::filter_body(vec![Box::new(RegexpSearchExpr::new(
            lit(FilterXValue::string("x")),
            "(unclosed",
            false,
            RegexpSearchMode::Dict,
            false,
        ))]));
        let mut config = FilterXConfig::new();
        let err = FilterXProgram::compile(root, &mut config).unwrap_err();
        assert_eq!(err.kind().to_string(), "configuration");
    }

    #[test]
    fn drop_control_modifier_is_observed_as_a_verdict() {
        let root = Box::new(CompoundExpr::filter_body(vec![lit(FilterXValue::Bool(true))]));
        let mut config = FilterXConfig::new();
        let program = FilterXProgram::compile(root, &mut config).unwrap();

        let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
        ctx.set_control_modifier(ControlModifier::Drop);
        let mut host = TestHost::new();
        assert_eq!(program.eval(&mut ctx, &mut host.as_host()).unwrap(), Verdict::Drop);
    }

    #[test]
    fn program_can_be_run_across_many_records_without_reinitializing() {
        let root = Box::new(CompoundExpr::filter_body(vec![Box::new(RegexpSearchExpr::new(
            lit(FilterXValue::string("id=42")),
            r"\d+",
            false,
            RegexpSearchMode::List,
            false,
        ))]));
        let mut config = FilterXConfig::new();
        let program = FilterXProgram::compile(root, &mut config).unwrap();
        let mut host = TestHost::new();

        for record in 0..50u64 {
            let mut ctx = FilterXEvalContext::new(vec![record], Default::default());
            let verdict = program.eval(&mut ctx, &mut host.as_host()).unwrap();
            assert_eq!(verdict, Verdict::Passed(true));
        }
    }
}
