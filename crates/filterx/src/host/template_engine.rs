//! The template rendering boundary: FilterX expressions can
//! embed a template string (`"$HOST said $MESSAGE"`) that the host's own
//! template engine expands against the bound message. FilterX treats the
//! rendered text as an opaque scratch-borrowed string.

use super::message_store::MessageHandle;
use crate::scratch::{ScratchGuard, ScratchHandle};

/// Per-evaluation knobs that shape how a template renders (time zone,
/// whether to fall back to a macro's name when it has no value, etc). Kept
/// deliberately small; a host with richer template options can carry its
/// own alongside this one and reach it out-of-band.
#[derive(Debug, Clone, Default)]
pub struct TemplateOptions {
    pub time_zone: Option<String>,
    pub on_error_keep_macro_name: bool,
}

/// The template-rendering surface FilterX calls into to expand a template
/// expression.
pub trait TemplateEngine {
    /// Renders `template` against `message`, writing the result into
    /// `scratch` and returning the handle to it. Returns `None` if the
    /// template string fails to compile or reference resolution fails hard
    /// enough that there's nothing sensible to render.
    fn render(&self, template: &str, message: MessageHandle, options: &TemplateOptions, scratch: &ScratchGuard) -> Option<ScratchHandle>;
}

/// A minimal template engine understanding only `$NAME` macro references
/// against an in-memory message store, for tests and for embedding FilterX
/// without a fuller template layer on hand.
#[derive(Debug, Default)]
pub struct SimpleTemplateEngine {
    values: ahash::AHashMap<(MessageHandle, String), String>,
}

impl SimpleTemplateEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, message: MessageHandle, macro_name: &str, value: impl Into<String>) {
        self.values.insert((message, macro_name.to_string()), value.into());
    }

    fn expand(&self, template: &str, message: MessageHandle, options: &TemplateOptions) -> String {
        let mut out = String::with_capacity(template.len());
        let mut chars = template.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            let start = i + 1;
            let end = template[start..]
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .map_or(template.len(), |rel| start + rel);
            let name = &template[start..end];
            if name.is_empty() {
                out.push('$');
                continue;
            }
            match self.values.get(&(message, name.to_string())) {
                Some(value) => out.push_str(value),
                None if options.on_error_keep_macro_name => {
                    out.push('$');
                    out.push_str(name);
                }
                None => {}
            }
            for _ in name.chars() {
                chars.next();
            }
        }
        out
    }
}

impl TemplateEngine for SimpleTemplateEngine {
    fn render(&self, template: &str, message: MessageHandle, options: &TemplateOptions, scratch: &ScratchGuard) -> Option<ScratchHandle> {
        let expanded = self.expand(template, message, options);
        Some(scratch.write(&expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_bound_macro_references() {
        let mut engine = SimpleTemplateEngine::new();
        engine.bind(1, "HOST", "server-01");
        let scratch = ScratchGuard::mark();
        let handle = engine.render("host=$HOST", 1, &TemplateOptions::default(), &scratch).unwrap();
        assert_eq!(handle.to_owned_string(), "host=server-01");
    }

    #[test]
    fn unbound_macro_renders_empty_by_default() {
        let engine = SimpleTemplateEngine::new();
        let scratch = ScratchGuard::mark();
        let handle = engine.render("x=$MISSING", 1, &TemplateOptions::default(), &scratch).unwrap();
        assert_eq!(handle.to_owned_string(), "x=");
    }

    #[test]
    fn unbound_macro_keeps_name_when_configured() {
        let engine = SimpleTemplateEngine::new();
        let options = TemplateOptions {
            on_error_keep_macro_name: true,
            ..Default::default()
        };
        let scratch = ScratchGuard::mark();
        let handle = engine.render("x=$MISSING", 1, &options, &scratch).unwrap();
        assert_eq!(handle.to_owned_string(), "x=$MISSING");
    }
}
