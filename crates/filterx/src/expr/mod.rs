//! The FilterX expression tree: every node implements the same lifecycle
//! ("init, optimize, eval, deinit, free") as a trait object,
//! mirroring the pattern of boxed trait objects at points where a node
//! needs open-ended, daemon-defined behavior (`PrintWriter` in `io.rs`)
//! rather than one closed enum matched centrally — here every node shape
//! (literal, variable reference, binary operator, compound, generator,
//! template, function call) is itself a daemon-extensible concern, since a
//! real deployment registers its own function library at configuration time.

pub mod assign;
pub mod binop;
pub mod compound;
pub mod control;
pub mod generator;
pub mod literal;
pub mod template;
pub mod variable_ref;

use std::fmt;

use crate::config::FilterXConfig;
use crate::context::FilterXEvalContext;
use crate::error::RunResult;
use crate::host::FilterXHost;
use crate::object::FilterXValue;
use crate::reference::FilterXRef;

/// A node in the expression tree.
///
/// `init`/`deinit` bracket a tree's attachment to one `FilterXConfig` (e.g.
/// resolving a variable name to a handle, or compiling a regex literal
/// once); `optimize` runs after every node has been `init`ed and may fold
/// constant subtrees; `eval` runs once per record and must not allocate
/// anything longer-lived than the current scratch mark beyond what it
/// stores into a `FilterXRef`.
pub trait FilterXExpr: fmt::Debug {
    /// Resolves any configuration-time dependency (variable handles,
    /// compiled patterns, registered function lookups). Called exactly once
    /// per tree, bottom-up, before the tree is ever evaluated.
    fn init(&mut self, _config: &mut FilterXConfig) -> RunResult<()> {
        Ok(())
    }

    /// Performs tree rewrites that don't need a live `FilterXConfig` (for
    /// instance, `literal.rs`'s leaves are already maximally optimized and
    /// this is a no-op; `compound.rs` may inline a single-child compound).
    /// Default is a no-op, matching the many tree shapes with nothing to
    /// fold.
    fn optimize(&mut self) {}

    /// Evaluates this node against one record, returning the resulting
    /// object or a pushed error frame. A `Null` result is truthy-false but
    /// not itself an error.
    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef>;

    /// Releases any configuration-time resource `init` acquired. Default is
    /// a no-op; compiled-pattern-holding nodes override this.
    fn deinit(&mut self) {}

    /// Location text for error reporting (`ErrorFrame::location`).
    /// `None` for synthetic nodes introduced by `optimize`.
    fn location(&self) -> Option<&str> {
        None
    }

    /// `Some` when this node is already a compile-time literal (only
    /// `literal.rs` overrides this). Lets a literal generator's `foreach`
    /// helper (`generator.rs`) tell a caller which elements it can cache at
    /// `init` time without waiting for `eval`.
    fn as_literal_value(&self) -> Option<&FilterXValue> {
        None
    }

    /// Calls `eval`, first bumping the node's `eval_count` statistics
    /// counter and — when the context has tracing enabled — emitting a
    /// trace event carrying the node's debug display text and whether the
    /// result came back an error. Every recursive call a node makes into a
    /// child goes through this method rather than `eval` directly, so the
    /// counter and the trace event can never drift apart from each other.
    fn eval_traced(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        host.stats.increment("eval_count", 1);
        if ctx.trace_enabled() {
            tracing::trace!(location = self.location().unwrap_or("<anonymous>"), "filterx eval");
        }
        let result = self.eval(ctx, host);
        if ctx.trace_enabled() {
            match &result {
                Ok(value) => tracing::trace!(location = self.location().unwrap_or("<anonymous>"), result = %value.get().repr(), "filterx eval ok"),
                Err(err) => tracing::trace!(location = self.location().unwrap_or("<anonymous>"), error = %err, "filterx eval err"),
            }
        }
        result
    }
}
