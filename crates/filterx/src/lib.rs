#![doc = include_str!("../../../README.md")]

pub mod config;
pub mod context;
pub mod error;
pub mod expr;
pub mod functions;
pub mod host;
pub mod object;
pub mod program;
pub mod reference;
pub mod scratch;
pub mod variable;

pub use config::FilterXConfig;
pub use context::{ControlModifier, FilterXEvalContext};
pub use error::{ErrorFrame, ErrorKind, FilterXError, RunResult};
pub use expr::FilterXExpr;
pub use host::FilterXHost;
pub use object::{FilterXValue, LogMessageValueType, SubscriptKey};
pub use program::{FilterXProgram, Verdict};
pub use reference::FilterXRef;
pub use variable::{FilterXVariable, VariableHandle, VariableType};
