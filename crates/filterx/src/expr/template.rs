//! Wraps a daemon template string so it renders into a FilterX string value
//!

use super::FilterXExpr;
use crate::config::FilterXConfig;
use crate::context::FilterXEvalContext;
use crate::error::{ErrorFrame, FilterXError, RunResult};
use crate::host::FilterXHost;
use crate::object::{FilterXValue, MessageValue};
use crate::reference::FilterXRef;

#[derive(Debug, Clone)]
pub struct TemplateExpr {
    template: String,
}

impl TemplateExpr {
    #[must_use]
    pub fn new(template: impl Into<String>) -> Self {
        Self { template: template.into() }
    }
}

impl FilterXExpr for TemplateExpr {
    /// Registered in `FilterXConfig`'s function table the same as any other
    /// builtin (§4.11); `template` has no arguments to resolve against the
    /// config beyond that presence check.
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        config.functions_mut().require("template")
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let Some(message) = ctx.primary_message() else {
            let err = FilterXError::eval("template has no bound message to render against");
            ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
            return Err(err);
        };
        let options = ctx.template_options().clone();
        let scratch = ctx.scratch_mark();
        match host.templates.render(&self.template, message, &options, &scratch) {
            Some(handle) => Ok(FilterXRef::new(FilterXValue::Message(MessageValue::borrowed(
                handle,
                crate::object::LogMessageValueType::String,
            )))),
            None => {
                let err = FilterXError::eval(format!("template {:?} failed to render", self.template));
                ctx.push_error(ErrorFrame::new(self.location().map(String::from), err.message().to_string()));
                Err(err)
            }
        }
    }

    fn location(&self) -> Option<&str> {
        Some(&self.template)
    }
}
