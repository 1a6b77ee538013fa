//! The FilterX object system: the polymorphic value universe every
//! expression node reads from and writes into.
//!
//! `FilterXValue` is a tagged enum rather than a descriptor table of
//! optional function pointers — Rust's `match` exhaustiveness gives every
//! variant a checked dispatch point for each capability without an
//! indirection layer, the way a Python interpreter's `Value`/`Object` enums
//! dispatch its object protocol.
//! Small values are inline; `Dict`/`List`/`String`/`Bytes` share their
//! payload through [`crate::reference::FilterXRef`] for O(1) cloning.

pub mod dict;
pub mod list;
pub mod message_value;

use std::fmt::Write as _;
use std::sync::Arc;

pub use dict::FilterXDict;
pub use list::FilterXList;
pub use message_value::MessageValue;

use crate::error::{FilterXError, RunResult};
use crate::reference::FilterXRef;

/// Typed tag attached to a value when it is marshalled back out to the log
/// message store: typed text rendering with a `LogMessageValueType` tag
/// for the message-store interface to round-trip through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum LogMessageValueType {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Bytes,
    Json,
    List,
    Dict,
}

/// Key used by `get_subscript`/`set_subscript`/`unset_key`.
///
/// Dicts are keyed by string; lists are keyed by integer index. Evaluating
/// a key expression to one of these two shapes is the caller's job
/// (`expr::binop`'s subscript operator does this); the object layer only
/// needs to know which kind of container it's indexing into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptKey {
    Index(i64),
    Name(String),
}

/// The universal FilterX value.
#[derive(Debug, Clone)]
pub enum FilterXValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(Arc<str>),
    Bytes(Arc<[u8]>),
    Dict(FilterXDict),
    List(FilterXList),
    /// A value that lazily borrows a raw message field or a just-rendered
    /// template result.
    Message(MessageValue),
}

impl PartialEq for FilterXValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Bytes(a), Self::Bytes(b)) => a == b,
            (Self::Dict(a), Self::Dict(b)) => a == b,
            (Self::List(a), Self::List(b)) => a == b,
            (Self::Message(a), Self::Message(b)) => a == b,
            _ => false,
        }
    }
}

impl FilterXValue {
    #[must_use]
    pub fn string(s: impl Into<Arc<str>>) -> Self {
        Self::String(s.into())
    }

    /// True iff this is a container (`Dict`/`List`) currently marked frozen.
    /// Frozen objects reject every mutating capability call; primitives and
    /// message-borrowed values have no mutable state to freeze, so they
    /// report `false`.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        match self {
            Self::Dict(d) => d.is_frozen(),
            Self::List(l) => l.is_frozen(),
            _ => false,
        }
    }

    /// Truthiness capability. Mirrors a typical interpreter `Value::is_truthy`:
    /// zero/empty/null values are falsy, everything else is truthy.
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Double(d) => *d != 0.0,
            Self::String(s) => !s.is_empty(),
            Self::Bytes(b) => !b.is_empty(),
            Self::Dict(d) => !d.is_empty(),
            Self::List(l) => !l.is_empty(),
            Self::Message(m) => m.truthy(),
        }
    }

    /// String-rendering capability used throughout the function library
    /// (`startswith`/`endswith`/`includes` render their haystack/needles via
    /// `repr`).
    #[must_use]
    pub fn repr(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Double(d) => {
                let mut s = String::new();
                let _ = write!(s, "{d}");
                s
            }
            Self::String(s) => s.to_string(),
            Self::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            Self::Dict(d) => d.repr(),
            Self::List(l) => l.repr(),
            Self::Message(m) => m.repr(),
        }
    }

    /// Typed marshal capability: text plus the type tag the message store
    /// understands (`set_value(handle, bytes, type)`).
    #[must_use]
    pub fn marshal(&self) -> (String, LogMessageValueType) {
        match self {
            Self::Null => (String::new(), LogMessageValueType::Null),
            Self::Bool(b) => (b.to_string(), LogMessageValueType::Boolean),
            Self::Int(n) => (n.to_string(), LogMessageValueType::Integer),
            Self::Double(d) => (self.repr_f64(*d), LogMessageValueType::Double),
            Self::String(s) => (s.to_string(), LogMessageValueType::String),
            Self::Bytes(b) => (String::from_utf8_lossy(b).into_owned(), LogMessageValueType::Bytes),
            Self::Dict(d) => (d.repr(), LogMessageValueType::Dict),
            Self::List(l) => (l.repr(), LogMessageValueType::List),
            Self::Message(m) => m.marshal(),
        }
    }

    fn repr_f64(&self, d: f64) -> String {
        let mut s = String::new();
        let _ = write!(s, "{d}");
        s
    }

    /// Deep-clone capability. Containers copy every entry (cloning each
    /// child with `clone_deep` in turn); scratch-borrowed `Message` values
    /// copy their bytes out of the scratch arena, since storing such an
    /// object into a container must trigger a copy.
    #[must_use]
    pub fn clone_deep(&self) -> Self {
        match self {
            Self::Dict(d) => Self::Dict(d.clone_deep()),
            Self::List(l) => Self::List(l.clone_deep()),
            Self::Message(m) => m.clone_owned_value(),
            other => other.clone(),
        }
    }

    /// Length capability (`Dict`/`List`/`String`/`Bytes`); `None` for types
    /// with no meaningful length.
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::String(s) => Some(s.len()),
            Self::Bytes(b) => Some(b.len()),
            Self::Dict(d) => Some(d.len()),
            Self::List(l) => Some(l.len()),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Subscript read capability (`Dict`/`List`).
    pub fn get_subscript(&self, key: &SubscriptKey) -> RunResult<Option<FilterXRef>> {
        match (self, key) {
            (Self::Dict(d), SubscriptKey::Name(name)) => Ok(d.get(name).cloned()),
            (Self::List(l), SubscriptKey::Index(idx)) => Ok(l.get(*idx).cloned()),
            (Self::Dict(_), SubscriptKey::Index(_)) => Err(FilterXError::eval("dict subscript requires a name key")),
            (Self::List(_), SubscriptKey::Name(_)) => Err(FilterXError::eval("list subscript requires an index key")),
            _ => Err(FilterXError::eval("subscript capability not supported by this type")),
        }
    }

    /// Subscript write capability. The callee may perform a
    /// copy-on-write substitution on the container itself (not on `self` —
    /// mutation always goes through `FilterXRef::make_mut` one level up);
    /// this method requires `&mut self` precisely for that reason.
    pub fn set_subscript(&mut self, key: &SubscriptKey, value: FilterXRef) -> RunResult<()> {
        match (self, key) {
            (Self::Dict(d), SubscriptKey::Name(name)) => {
                d.set(name.clone(), value);
                Ok(())
            }
            (Self::List(l), SubscriptKey::Index(idx)) => l.set(*idx, value),
            _ => Err(FilterXError::eval("set_subscript capability not supported by this type/key combination")),
        }
    }

    pub fn unset_key(&mut self, key: &SubscriptKey) -> RunResult<()> {
        match (self, key) {
            (Self::Dict(d), SubscriptKey::Name(name)) => {
                d.unset(name);
                Ok(())
            }
            (Self::List(l), SubscriptKey::Index(idx)) => l.unset(*idx),
            _ => Err(FilterXError::eval("unset_key capability not supported by this type")),
        }
    }

    /// Append capability (`List` only).
    pub fn append(&mut self, value: FilterXRef) -> RunResult<()> {
        match self {
            Self::List(l) => {
                l.append(value);
                Ok(())
            }
            _ => Err(FilterXError::eval("append capability not supported by this type")),
        }
    }
}
