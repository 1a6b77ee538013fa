//! `MessageValue`: a FilterX object that lazily borrows a raw message field
//! or a just-rendered template result.
//!
//! A `message_value` object produces its string payload by borrowing from
//! a scratch buffer valid for the current evaluation only; it is never
//! stored into a persistent container without a `clone`.
//! `Borrowed` is exactly that scratch-lifetime payload; `Owned` is what a
//! `clone_deep` (or a value read straight out of the message store, which
//! already owns its bytes) produces.

use std::sync::Arc;

use super::LogMessageValueType;
use super::FilterXValue;
use crate::scratch::ScratchHandle;

#[derive(Debug, Clone)]
enum MessageData {
    Borrowed(ScratchHandle),
    Owned(Arc<[u8]>),
}

/// A message-store field value, not yet decoded into a first-class
/// `FilterXValue`. Kept distinct from `FilterXValue::String`/`Int`/etc. so
/// that reading a field the expression never inspects costs nothing beyond
/// the lookup — decoding happens only when a capability method is called.
#[derive(Debug, Clone)]
pub struct MessageValue {
    data: MessageData,
    value_type: LogMessageValueType,
}

impl MessageValue {
    #[must_use]
    pub fn borrowed(handle: ScratchHandle, value_type: LogMessageValueType) -> Self {
        Self {
            data: MessageData::Borrowed(handle),
            value_type,
        }
    }

    #[must_use]
    pub fn owned(bytes: impl Into<Arc<[u8]>>, value_type: LogMessageValueType) -> Self {
        Self {
            data: MessageData::Owned(bytes.into()),
            value_type,
        }
    }

    #[must_use]
    pub fn value_type(&self) -> LogMessageValueType {
        self.value_type
    }

    fn as_string(&self) -> String {
        match &self.data {
            MessageData::Borrowed(h) => h.to_owned_string(),
            MessageData::Owned(bytes) => String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    #[must_use]
    pub fn truthy(&self) -> bool {
        match self.value_type {
            LogMessageValueType::Null => false,
            LogMessageValueType::Boolean => self.as_string() == "true",
            LogMessageValueType::Integer => self.as_string().parse::<i64>().is_ok_and(|n| n != 0),
            LogMessageValueType::Double => self.as_string().parse::<f64>().is_ok_and(|d| d != 0.0),
            _ => !self.as_string().is_empty(),
        }
    }

    #[must_use]
    pub fn repr(&self) -> String {
        self.as_string()
    }

    #[must_use]
    pub fn marshal(&self) -> (String, LogMessageValueType) {
        (self.as_string(), self.value_type)
    }

    /// Materializes the scratch-borrowed bytes into an owned
    /// `FilterXValue`, per the type tag carried alongside them. This is the
    /// "copy on store into a container" step requires.
    #[must_use]
    pub fn clone_owned_value(&self) -> FilterXValue {
        let text = self.as_string();
        match self.value_type {
            LogMessageValueType::Null => FilterXValue::Null,
            LogMessageValueType::Boolean => FilterXValue::Bool(text == "true"),
            LogMessageValueType::Integer => text.parse::<i64>().map_or(FilterXValue::string(text), FilterXValue::Int),
            LogMessageValueType::Double => text.parse::<f64>().map_or(FilterXValue::string(text), FilterXValue::Double),
            LogMessageValueType::Bytes => FilterXValue::Bytes(text.into_bytes().into()),
            _ => FilterXValue::string(text),
        }
    }
}

impl PartialEq for MessageValue {
    fn eq(&self, other: &Self) -> bool {
        self.value_type == other.value_type && self.as_string() == other.as_string()
    }
}
