//! Binary operators: comparisons, short-circuit boolean logic, and
//! subscripting (`SubscriptKey`, `get_subscript`).

use std::cmp::Ordering;

use super::FilterXExpr;
use crate::config::FilterXConfig;
use crate::context::FilterXEvalContext;
use crate::error::{ErrorFrame, FilterXError, RunResult};
use crate::host::FilterXHost;
use crate::object::{FilterXValue, SubscriptKey};
use crate::reference::FilterXRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum BinOp {
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Subscript,
}

#[derive(Debug)]
pub struct BinOpExpr {
    op: BinOp,
    lhs: Box<dyn FilterXExpr>,
    rhs: Box<dyn FilterXExpr>,
}

impl BinOpExpr {
    #[must_use]
    pub fn new(op: BinOp, lhs: Box<dyn FilterXExpr>, rhs: Box<dyn FilterXExpr>) -> Self {
        Self { op, lhs, rhs }
    }

    fn compare(lhs: &FilterXValue, rhs: &FilterXValue) -> RunResult<Ordering> {
        match (lhs, rhs) {
            (FilterXValue::Int(a), FilterXValue::Int(b)) => Ok(a.cmp(b)),
            (FilterXValue::Double(a), FilterXValue::Double(b)) => {
                a.partial_cmp(b).ok_or_else(|| FilterXError::eval("cannot order NaN"))
            }
            (FilterXValue::Int(a), FilterXValue::Double(b)) => (*a as f64)
                .partial_cmp(b)
                .ok_or_else(|| FilterXError::eval("cannot order NaN")),
            (FilterXValue::Double(a), FilterXValue::Int(b)) => a
                .partial_cmp(&(*b as f64))
                .ok_or_else(|| FilterXError::eval("cannot order NaN")),
            (FilterXValue::String(a), FilterXValue::String(b)) => Ok(a.as_ref().cmp(b.as_ref())),
            _ => Err(FilterXError::eval("operands are not ordered-comparable")),
        }
    }
}

impl FilterXExpr for BinOpExpr {
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        self.lhs.init(config)?;
        if let Err(err) = self.rhs.init(config) {
            self.lhs.deinit();
            return Err(err);
        }
        Ok(())
    }

    fn optimize(&mut self) {
        self.lhs.optimize();
        self.rhs.optimize();
    }

    fn deinit(&mut self) {
        self.lhs.deinit();
        self.rhs.deinit();
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        match self.op {
            BinOp::And => {
                let lhs = self.lhs.eval_traced(ctx, host)?;
                if !lhs.get().truthy() {
                    return Ok(FilterXRef::new(FilterXValue::Bool(false)));
                }
                let rhs = self.rhs.eval_traced(ctx, host)?;
                Ok(FilterXRef::new(FilterXValue::Bool(rhs.get().truthy())))
            }
            BinOp::Or => {
                let lhs = self.lhs.eval_traced(ctx, host)?;
                if lhs.get().truthy() {
                    return Ok(FilterXRef::new(FilterXValue::Bool(true)));
                }
                let rhs = self.rhs.eval_traced(ctx, host)?;
                Ok(FilterXRef::new(FilterXValue::Bool(rhs.get().truthy())))
            }
            BinOp::Eq => {
                let lhs = self.lhs.eval_traced(ctx, host)?;
                let rhs = self.rhs.eval_traced(ctx, host)?;
                Ok(FilterXRef::new(FilterXValue::Bool(lhs.get() == rhs.get())))
            }
            BinOp::NotEq => {
                let lhs = self.lhs.eval_traced(ctx, host)?;
                let rhs = self.rhs.eval_traced(ctx, host)?;
                Ok(FilterXRef::new(FilterXValue::Bool(lhs.get() != rhs.get())))
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                let lhs = self.lhs.eval_traced(ctx, host)?;
                let rhs = self.rhs.eval_traced(ctx, host)?;
                let ordering = match Self::compare(lhs.get(), rhs.get()) {
                    Ok(ordering) => ordering,
                    Err(err) => {
                        ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
                        return Err(err);
                    }
                };
                let result = match self.op {
                    BinOp::Lt => ordering == Ordering::Less,
                    BinOp::Le => ordering != Ordering::Greater,
                    BinOp::Gt => ordering == Ordering::Greater,
                    BinOp::Ge => ordering != Ordering::Less,
                    _ => unreachable!(),
                };
                Ok(FilterXRef::new(FilterXValue::Bool(result)))
            }
            BinOp::Subscript => {
                let lhs = self.lhs.eval_traced(ctx, host)?;
                let rhs = self.rhs.eval_traced(ctx, host)?;
                let key = match rhs.get() {
                    FilterXValue::Int(i) => SubscriptKey::Index(*i),
                    FilterXValue::String(s) => SubscriptKey::Name(s.to_string()),
                    _ => {
                        let err = FilterXError::eval("subscript key must be an integer or a string");
                        ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
                        return Err(err);
                    }
                };
                match lhs.get().get_subscript(&key) {
                    Ok(Some(value)) => Ok(value),
                    Ok(None) => Ok(FilterXRef::new(FilterXValue::Null)),
                    Err(err) => {
                        ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
                        Err(err)
                    }
                }
            }
        }
    }
}
