//! Built-in FilterX function library.
//!
//! Each function is its own `FilterXExpr` node rather than one big dispatch
//! enum, the same shape the expression tree itself uses — a function-call
//! node is, after all, just another node that happens to evaluate its
//! children before doing type-specific work.

pub mod affix;
pub mod regexp_search;

pub use affix::{AffixExpr, AffixKind};
pub use regexp_search::{RegexpSearchExpr, RegexpSearchMode};
