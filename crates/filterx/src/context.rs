//! The per-record evaluation environment: message handles, variable scope,
//! cooperative cancellation, and the error stack.

use crate::error::ErrorFrame;
use crate::host::message_store::MessageHandle;
use crate::host::template_engine::TemplateOptions;
use crate::scratch::ScratchGuard;
use crate::variable::{FilterXScope, VariableDirectory};

/// Cooperative cancellation signal.
///
/// `Done` and `Drop` are not errors — they short-circuit a compound
/// expression's remaining children and are reported back to the host as a
/// successful (`true`) evaluation, matching the testable
/// property "evaluating yields true (not an error)".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlModifier {
    #[default]
    None,
    /// Drop the record entirely; no further children evaluate.
    Drop,
    /// Stop evaluating but keep the record.
    Done,
}

impl ControlModifier {
    #[must_use]
    pub fn is_active(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Created fresh per log record, single-threaded for its entire lifetime
/// Dropped (and with it, its scratch region) once the host
/// has observed the root compound expression's result.
pub struct FilterXEvalContext {
    messages: Vec<MessageHandle>,
    template_options: TemplateOptions,
    scope: FilterXScope,
    errors: Vec<ErrorFrame>,
    control_modifier: ControlModifier,
    /// Brackets the whole record's evaluation; dropped (and reclaimed) when
    /// the context itself is dropped.
    root_scratch: ScratchGuard,
    debug: bool,
    trace: bool,
}

impl FilterXEvalContext {
    #[must_use]
    pub fn new(messages: Vec<MessageHandle>, template_options: TemplateOptions) -> Self {
        Self::with_directory(messages, template_options, VariableDirectory::global())
    }

    #[must_use]
    pub fn with_directory(
        messages: Vec<MessageHandle>,
        template_options: TemplateOptions,
        directory: &VariableDirectory,
    ) -> Self {
        Self {
            messages,
            template_options,
            scope: FilterXScope::new(directory),
            errors: Vec::new(),
            control_modifier: ControlModifier::None,
            root_scratch: ScratchGuard::mark(),
            debug: false,
            trace: false,
        }
    }

    #[must_use]
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn messages(&self) -> &[MessageHandle] {
        &self.messages
    }

    #[must_use]
    pub fn primary_message(&self) -> Option<MessageHandle> {
        self.messages.first().copied()
    }

    #[must_use]
    pub fn template_options(&self) -> &TemplateOptions {
        &self.template_options
    }

    #[must_use]
    pub fn scope(&self) -> &FilterXScope {
        &self.scope
    }

    #[must_use]
    pub fn scope_mut(&mut self) -> &mut FilterXScope {
        &mut self.scope
    }

    #[must_use]
    pub fn control_modifier(&self) -> ControlModifier {
        self.control_modifier
    }

    pub fn set_control_modifier(&mut self, modifier: ControlModifier) {
        self.control_modifier = modifier;
    }

    #[must_use]
    pub fn debug_enabled(&self) -> bool {
        self.debug
    }

    #[must_use]
    pub fn trace_enabled(&self) -> bool {
        self.trace
    }

    /// Pushes an error frame: `eval` returns null on error and
    /// pushes a frame onto the context's error stack."
    pub fn push_error(&mut self, frame: ErrorFrame) {
        if self.trace || self.debug {
            tracing::debug!(message = %frame, "filterx eval error");
        }
        self.errors.push(frame);
    }

    #[must_use]
    pub fn errors(&self) -> &[ErrorFrame] {
        &self.errors
    }

    /// Opens a nested scratch region bracketing one sub-evaluation (e.g. one
    /// template render). The returned guard reclaims on drop.
    #[must_use]
    pub fn scratch_mark(&self) -> ScratchGuard {
        ScratchGuard::mark()
    }
}
