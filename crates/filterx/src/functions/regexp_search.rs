//! `regexp_search(haystack, pattern, list_mode?, keep_zero?)` — the
//! generator-function: runs one compiled pattern
//! against a string and materializes every capture group into either a
//! list (by position) or a dict (by name, with any named group's numbered
//! slot renamed to its name and the numeric key dropped).

use std::fmt;

use crate::config::FilterXConfig;
use crate::context::FilterXEvalContext;
use crate::expr::generator::dict_from_pairs;
use crate::expr::FilterXExpr;
use crate::error::RunResult;
use crate::host::regex_engine::CompiledPattern;
use crate::host::FilterXHost;
use crate::object::{FilterXList, FilterXValue};
use crate::reference::FilterXRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegexpSearchMode {
    List,
    Dict,
}

pub struct RegexpSearchExpr {
    haystack: Box<dyn FilterXExpr>,
    pattern: String,
    ignorecase: bool,
    mode: RegexpSearchMode,
    /// Whether capture group 0 (the full match) is included alongside the
    /// numbered/named groups (the `keep_zero` flag).
    keep_zero: bool,
    /// Compiled once in `init`: the pattern must be a compile-time literal,
    /// and compilation failure is a configuration error, not an eval error.
    /// `None` only before `init` or after `deinit`.
    compiled: Option<Box<dyn CompiledPattern>>,
}

impl fmt::Debug for RegexpSearchExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegexpSearchExpr")
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .field("ignorecase", &self.ignorecase)
            .field("keep_zero", &self.keep_zero)
            .finish()
    }
}

impl RegexpSearchExpr {
    #[must_use]
    pub fn new(haystack: Box<dyn FilterXExpr>, pattern: impl Into<String>, ignorecase: bool, mode: RegexpSearchMode, keep_zero: bool) -> Self {
        Self {
            haystack,
            pattern: pattern.into(),
            ignorecase,
            mode,
            keep_zero,
            compiled: None,
        }
    }
}

impl FilterXExpr for RegexpSearchExpr {
    /// Compiles `pattern` against `config`'s regex engine once, at
    /// configuration time, so a malformed pattern is reported as a
    /// `FilterXError::Configuration` from `init` and never reaches `eval`
    ///
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        config.functions_mut().require("regexp_search")?;
        self.haystack.init(config)?;
        self.compiled = Some(config.regex().compile(&self.pattern, self.ignorecase)?);
        Ok(())
    }

    fn optimize(&mut self) {
        self.haystack.optimize();
    }

    fn deinit(&mut self) {
        self.haystack.deinit();
        self.compiled = None;
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let haystack = self.haystack.eval_traced(ctx, host)?.get().repr();

        let pattern = self
            .compiled
            .as_ref()
            .expect("regexp_search must be init'd (compiling its pattern) before eval, per the FilterXExpr lifecycle contract");

        let Some(matched) = pattern.search(&haystack) else {
            return Ok(FilterXRef::new(FilterXValue::Bool(false)));
        };

        let value = match self.mode {
            RegexpSearchMode::List => {
                let mut list = FilterXList::new();
                if self.keep_zero && !matched.numbered.is_empty() {
                    list.append(FilterXRef::new(FilterXValue::string(matched.full.clone())));
                }
                for group in &matched.numbered {
                    let value = group.as_ref().map_or(FilterXValue::Null, |text| FilterXValue::string(text.clone()));
                    list.append(FilterXRef::new(value));
                }
                FilterXValue::List(list)
            }
            RegexpSearchMode::Dict => {
                let mut pairs = Vec::new();
                if self.keep_zero && !matched.numbered.is_empty() {
                    pairs.push(("0".to_string(), FilterXValue::string(matched.full.clone())));
                }
                for (i, group) in matched.numbered.iter().enumerate() {
                    let Some(text) = group else { continue };
                    let is_named = matched.named.values().any(|v| v == text);
                    if !is_named {
                        pairs.push(((i + 1).to_string(), FilterXValue::string(text.clone())));
                    }
                }
                for (name, text) in &matched.named {
                    pairs.push((name.clone(), FilterXValue::string(text.clone())));
                }
                FilterXValue::Dict(dict_from_pairs(pairs))
            }
        };
        Ok(FilterXRef::new(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::literal::LiteralExpr;
    use crate::expr::test_support::TestHost;

    fn haystack(text: &str) -> Box<dyn FilterXExpr> {
        Box::new(LiteralExpr::new(FilterXValue::string(text)))
    }

    fn eval_initialized(mut expr: RegexpSearchExpr) -> FilterXRef {
        let mut config = FilterXConfig::new();
        expr.init(&mut config).unwrap();
        let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
        let mut host = TestHost::new();
        expr.eval(&mut ctx, &mut host.as_host()).unwrap()
    }

    #[test]
    fn dict_mode_renames_named_group_to_its_name() {
        let expr = RegexpSearchExpr::new(haystack("foo123bar"), r"(?<n>\d+)", false, RegexpSearchMode::Dict, false);
        let result = eval_initialized(expr);
        let FilterXValue::Dict(dict) = result.get() else { panic!("expected a dict") };
        assert_eq!(dict.get("n").unwrap().get().repr(), "123");
        assert!(dict.get("1").is_none());
    }

    #[test]
    fn list_mode_indexes_groups_positionally() {
        let expr = RegexpSearchExpr::new(haystack("2026-07-28"), r"(\d+)-(\d+)-(\d+)", false, RegexpSearchMode::List, false);
        let result = eval_initialized(expr);
        let FilterXValue::List(list) = result.get() else { panic!("expected a list") };
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0).unwrap().get().repr(), "2026");
    }

    #[test]
    fn no_match_returns_false() {
        let expr = RegexpSearchExpr::new(haystack("no digits here"), r"\d+", false, RegexpSearchMode::Dict, false);
        let result = eval_initialized(expr);
        assert_eq!(result.get(), &FilterXValue::Bool(false));
    }

    #[test]
    fn keep_zero_includes_the_full_match() {
        let expr = RegexpSearchExpr::new(haystack("foo123bar"), r"(?<n>\d+)", false, RegexpSearchMode::Dict, true);
        let result = eval_initialized(expr);
        let FilterXValue::Dict(dict) = result.get() else { panic!("expected a dict") };
        assert_eq!(dict.get("0").unwrap().get().repr(), "123");
    }

    #[test]
    fn keep_zero_with_no_capture_groups_elides_group_zero_in_dict_mode() {
        let expr = RegexpSearchExpr::new(haystack("id=42"), r"\d+", false, RegexpSearchMode::Dict, true);
        let result = eval_initialized(expr);
        let FilterXValue::Dict(dict) = result.get() else { panic!("expected a dict") };
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn keep_zero_with_no_capture_groups_elides_group_zero_in_list_mode() {
        let expr = RegexpSearchExpr::new(haystack("id=42"), r"\d+", false, RegexpSearchMode::List, true);
        let result = eval_initialized(expr);
        let FilterXValue::List(list) = result.get() else { panic!("expected a list") };
        assert_eq!(list.len(), 0);
    }

    #[test]
    fn malformed_pattern_fails_at_init_not_eval() {
        let mut expr = RegexpSearchExpr::new(haystack("x"), "(unclosed", false, RegexpSearchMode::Dict, false);
        let mut config = FilterXConfig::new();
        let err = expr.init(&mut config).unwrap_err();
        assert_eq!(err.kind().to_string(), "configuration");
    }

    #[test]
    fn deinit_drops_the_compiled_pattern() {
        let mut expr = RegexpSearchExpr::new(haystack("foo123bar"), r"\d+", false, RegexpSearchMode::List, false);
        let mut config = FilterXConfig::new();
        expr.init(&mut config).unwrap();
        assert!(expr.compiled.is_some());
        expr.deinit();
        assert!(expr.compiled.is_none());
    }
}
