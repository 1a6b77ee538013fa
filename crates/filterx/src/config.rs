//! Configuration-time state shared by every node's `init` call: the function
//! registry a parser's function-call nodes check their names against, and
//! the regex engine `regexp_search` compiles its literal pattern against
//! before the tree is ever evaluated.

use std::sync::Arc;

use ahash::AHashSet;

use crate::error::{FilterXError, RunResult};
use crate::host::regex_engine::{RegexEngine, StdRegexEngine};
use crate::variable::VariableDirectory;

/// Names of the built-in functions this build of FilterX ships, registered
/// once at startup. A function-call node's `init` looks its name up here so
/// that a typo in a filter expression is caught at configuration time
/// rather than failing silently at eval time ("a missing function
/// name is a configuration error").
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    known: AHashSet<&'static str>,
}

impl FunctionRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut known = AHashSet::default();
        for name in ["startswith", "endswith", "includes", "regexp_search", "template"] {
            known.insert(name);
        }
        Self { known }
    }

    /// Registers an additional function name, for a host embedding FilterX
    /// with its own function library alongside the built-ins.
    pub fn register(&mut self, name: &'static str) {
        self.known.insert(name);
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    pub fn require(&self, name: &str) -> RunResult<()> {
        if self.contains(name) {
            Ok(())
        } else {
            Err(FilterXError::configuration(format!("unknown function {name:?}")))
        }
    }
}

/// Owns everything an expression tree's `init` pass needs: the function
/// name registry, a handle to the process-wide variable directory, and the
/// regex engine used to compile `regexp_search` patterns at configuration
/// time ("`pattern` must be a compile-time literal; compilation
/// failure is a configuration error"). One `FilterXConfig` is shared by
/// every tree compiled for the same running configuration.
pub struct FilterXConfig {
    functions: FunctionRegistry,
    directory: &'static VariableDirectory,
    regex: Arc<dyn RegexEngine>,
}

impl FilterXConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::with_regex_engine(Arc::new(StdRegexEngine))
    }

    /// Builds a config backed by a caller-supplied regex engine, for hosts
    /// that bind `regexp_search` to something other than the `regex`-crate
    /// default (e.g. a real PCRE2 binding).
    #[must_use]
    pub fn with_regex_engine(regex: Arc<dyn RegexEngine>) -> Self {
        Self {
            functions: FunctionRegistry::new(),
            directory: VariableDirectory::global(),
            regex,
        }
    }

    #[must_use]
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    #[must_use]
    pub fn functions_mut(&mut self) -> &mut FunctionRegistry {
        &mut self.functions
    }

    #[must_use]
    pub fn directory(&self) -> &'static VariableDirectory {
        self.directory
    }

    #[must_use]
    pub fn regex(&self) -> &dyn RegexEngine {
        self.regex.as_ref()
    }
}

impl Default for FilterXConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_functions_are_preregistered() {
        let config = FilterXConfig::new();
        for name in ["startswith", "endswith", "includes", "regexp_search", "template"] {
            assert!(config.functions().require(name).is_ok(), "{name} should be preregistered");
        }
    }

    #[test]
    fn unknown_function_is_a_configuration_error() {
        let config = FilterXConfig::new();
        let err = config.functions().require("not_a_real_function").unwrap_err();
        assert_eq!(err.kind().to_string(), "configuration");
    }
}
