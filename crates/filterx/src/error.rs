//! Error taxonomy for FilterX evaluation and configuration.
//!
//! FilterX distinguishes three kinds of failure: an **evaluation**
//! error (bad operand, missing key, type mismatch) raised from `eval`, a
//! **resource** error (scratch allocation, regex compile) raised from either
//! `init` or `eval`, and a **configuration** error raised only from `init`,
//! never from `eval`. Cancellation (`DROP`/`DONE`) is not an error at all —
//! it is carried by [`crate::context::ControlModifier`], not by this type.

use std::fmt;

use strum::{Display as StrumDisplay, EnumString, IntoStaticStr};

/// Result alias used throughout the crate: `Ok` for a produced value,
/// `Err` for a failure that should be pushed onto the context's error stack.
pub type RunResult<T> = Result<T, FilterXError>;

/// Stable, parseable tag for a [`FilterXError`], independent of its message.
///
/// Kept separate from the error payload so logs and metrics can group by
/// kind without string-matching the human-readable message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumString, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Eval,
    Resource,
    Configuration,
}

/// A FilterX failure.
#[derive(Debug, Clone)]
pub enum FilterXError {
    /// Bad operand, missing key, type mismatch — raised from `eval`.
    Eval(String),
    /// Scratch allocation failure, regex engine failure at match time.
    Resource(String),
    /// Raised only from `init`: bad literal needle, pattern compile failure,
    /// unknown function name, duplicate registration.
    Configuration(String),
}

impl FilterXError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Eval(_) => ErrorKind::Eval,
            Self::Resource(_) => ErrorKind::Resource,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Eval(m) | Self::Resource(m) | Self::Configuration(m) => m,
        }
    }

    pub fn eval(msg: impl Into<String>) -> Self {
        Self::Eval(msg.into())
    }

    pub fn resource(msg: impl Into<String>) -> Self {
        Self::Resource(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }
}

impl fmt::Display for FilterXError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for FilterXError {}

/// One frame pushed onto [`crate::context::FilterXEvalContext`]'s error stack.
///
/// Carries the expression's source location, the error message, and
/// optionally a `repr`/`marshal` rendering of the offending object.
#[derive(Debug, Clone)]
pub struct ErrorFrame {
    pub location: Option<String>,
    pub message: String,
    pub offending_repr: Option<String>,
}

impl ErrorFrame {
    #[must_use]
    pub fn new(location: Option<String>, message: impl Into<String>) -> Self {
        Self {
            location,
            message: message.into(),
            offending_repr: None,
        }
    }

    #[must_use]
    pub fn with_offending(mut self, repr: impl Into<String>) -> Self {
        self.offending_repr = Some(repr.into());
        self
    }
}

impl fmt::Display for ErrorFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{loc}: {}", self.message)?,
            None => write!(f, "{}", self.message)?,
        }
        if let Some(repr) = &self.offending_repr {
            write!(f, " (offending value: {repr})")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kind_matches_variant() {
        assert_eq!(FilterXError::eval("bad operand").kind(), ErrorKind::Eval);
        assert_eq!(FilterXError::resource("oom").kind(), ErrorKind::Resource);
        assert_eq!(
            FilterXError::configuration("bad pattern").kind(),
            ErrorKind::Configuration
        );
    }

    #[test]
    fn error_frame_display_includes_location_and_repr() {
        let frame = ErrorFrame::new(Some("line 3".into()), "bailing out due to a falsy expr")
            .with_offending("false");
        let rendered = frame.to_string();
        assert!(rendered.contains("line 3"));
        assert!(rendered.contains("bailing out"));
        assert!(rendered.contains("false"));
    }
}
