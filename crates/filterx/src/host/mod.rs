//! The boundary between FilterX and the surrounding daemon.
//!
//! Every external system FilterX touches — the message store, the template
//! engine, the regex engine, the output transport and the statistics
//! registry — is named here as a trait, with a small in-memory default
//! implementation good enough for tests and for embedding FilterX in a
//! process that has nothing fancier on hand.

pub mod message_store;
pub mod regex_engine;
pub mod stats;
pub mod template_engine;
pub mod transport;

pub use message_store::LogMessageStore;
pub use regex_engine::RegexEngine;
pub use stats::StatsRegistry;
pub use template_engine::TemplateEngine;
pub use transport::Transport;

/// The bundle of host services an expression tree needs while evaluating
/// Threaded through `FilterXExpr::eval` alongside the per-record
/// `FilterXEvalContext` rather than folded into it, since these services are
/// shared across every record in a run while the context is rebuilt fresh
/// per record.
pub struct FilterXHost<'a> {
    pub messages: &'a mut dyn LogMessageStore,
    pub templates: &'a dyn TemplateEngine,
    pub regex: &'a dyn RegexEngine,
    pub stats: &'a dyn StatsRegistry,
}
