//! The pattern-matching boundary. A real deployment binds against PCRE2;
//! since there's no pure-Rust PCRE2 binding available, this trait is backed
//! by the `regex` crate instead — a real dependency rather than a
//! fabricated FFI stub, with the difference (no backreferences, no
//! lookaround) called out in DESIGN.md.

use ahash::AHashMap;
use regex::Regex;

use crate::error::{FilterXError, RunResult};

/// One successful match: the full match, every capture group by its
/// 1-based position (list mode indexes into this), and separately every
/// named group's text keyed by name (dict mode renames a named group's
/// numbered slot to its name and drops the numeric key).
#[derive(Debug, Clone, Default)]
pub struct MatchResult {
    pub full: String,
    pub numbered: Vec<Option<String>>,
    pub named: AHashMap<String, String>,
}

/// The regex surface `regexp_search` is built on.
pub trait RegexEngine {
    /// Compiles `pattern`, applying case-insensitivity if requested. Called
    /// once at expression init time, never per record.
    fn compile(&self, pattern: &str, ignorecase: bool) -> RunResult<Box<dyn CompiledPattern>>;
}

/// A pattern compiled once and reused across every record it's applied to.
pub trait CompiledPattern: Send + Sync {
    fn search(&self, haystack: &str) -> Option<MatchResult>;
}

/// Backs [`RegexEngine`] with the `regex` crate.
#[derive(Debug, Default)]
pub struct StdRegexEngine;

impl RegexEngine for StdRegexEngine {
    fn compile(&self, pattern: &str, ignorecase: bool) -> RunResult<Box<dyn CompiledPattern>> {
        let source = if ignorecase { format!("(?i){pattern}") } else { pattern.to_string() };
        let re = Regex::new(&source).map_err(|e| FilterXError::configuration(format!("invalid regular expression {pattern:?}: {e}")))?;
        Ok(Box::new(CompiledStdRegex { re }))
    }
}

struct CompiledStdRegex {
    re: Regex,
}

impl CompiledPattern for CompiledStdRegex {
    fn search(&self, haystack: &str) -> Option<MatchResult> {
        let captures = self.re.captures(haystack)?;
        let full = captures.get(0)?.as_str().to_string();
        let mut numbered = Vec::new();
        let mut named = AHashMap::new();
        for (i, name) in self.re.capture_names().enumerate() {
            if i == 0 {
                continue;
            }
            let text = captures.get(i).map(|m| m.as_str().to_string());
            if let (Some(name), Some(text)) = (name, &text) {
                named.insert(name.to_string(), text.clone());
            }
            numbered.push(text);
        }
        Some(MatchResult { full, numbered, named })
    }
}
