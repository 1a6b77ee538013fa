//! `startswith`/`endswith`/`includes`.
//!
//! Resolved Open Question (a): an empty needle is always a match,
//! regardless of `ignorecase` or which affix kind is asked for — matching
//! the general rule that the empty string is a substring/prefix/suffix of
//! every string.
//!
//! Open Question (c), documented rather than fixed: `ignorecase` folds with
//! `str::to_lowercase` (Unicode simple case folding) and then compares
//! byte-wise. This is only correct when both sides fold to the same code
//! points under that algorithm — it does not implement full Unicode
//! case-insensitive matching (e.g. Turkish dotless-i, German ß full folding)
//! and never will without a dedicated case-folding crate out of proportion
//! to what this function set needs.

use crate::config::FilterXConfig;
use crate::expr::generator::ListGeneratorExpr;
use crate::expr::FilterXExpr;
use crate::context::FilterXEvalContext;
use crate::error::RunResult;
use crate::host::FilterXHost;
use crate::object::FilterXValue;
use crate::reference::FilterXRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum AffixKind {
    Startswith,
    Endswith,
    Includes,
}

/// Either a single needle or a list of needles; each one may be a literal
/// known at configuration time or an expression evaluated fresh per record.
/// A literal needle is case-folded once in `init` rather than on every
/// record. A `List` needle reuses the same `{...}`/`[...]` literal-generator
/// machinery every other list literal goes through, so its `init`/`optimize`/
/// `deinit` and its `literal_list_generator_foreach` introspection (see
/// `expr::generator`) are not reimplemented here.
#[derive(Debug)]
pub enum Needle {
    Literal(String),
    Dynamic(Box<dyn FilterXExpr>),
    List(ListGeneratorExpr),
}

impl Needle {
    fn is_fully_literal(&self) -> bool {
        match self {
            Self::Literal(_) => true,
            Self::Dynamic(_) => false,
            Self::List(generator) => {
                let mut all_literal = true;
                generator.literal_list_generator_foreach(|_, value| all_literal &= value.is_some());
                all_literal
            }
        }
    }

    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        match self {
            Self::Literal(_) => Ok(()),
            Self::Dynamic(expr) => expr.init(config),
            Self::List(generator) => generator.init(config),
        }
    }

    fn optimize(&mut self) {
        match self {
            Self::Literal(_) => {}
            Self::Dynamic(expr) => expr.optimize(),
            Self::List(generator) => generator.optimize(),
        }
    }

    fn deinit(&mut self) {
        match self {
            Self::Literal(_) => {}
            Self::Dynamic(expr) => expr.deinit(),
            Self::List(generator) => generator.deinit(),
        }
    }

    /// Every string this needle (or, for a list, each of its elements)
    /// renders to when every leaf is a compile-time literal; pre-folded the
    /// same way `eval` would fold it. Only called once `is_fully_literal`
    /// has confirmed there is nothing left to evaluate per record.
    fn literal_strings(&self, fold: impl Fn(&str) -> String + Copy) -> Vec<String> {
        match self {
            Self::Literal(text) => vec![fold(text)],
            Self::Dynamic(_) => Vec::new(),
            Self::List(generator) => {
                let mut out = Vec::new();
                generator.literal_list_generator_foreach(|_, value| {
                    if let Some(value) = value {
                        out.push(fold(&value.repr()));
                    }
                });
                out
            }
        }
    }

    /// Evaluates every needle string fresh, for a needle tree that has at
    /// least one non-literal leaf and so could not be cached at `init` time.
    fn eval_strings(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>, fold: impl Fn(&str) -> String + Copy) -> RunResult<Vec<String>> {
        match self {
            Self::Literal(text) => Ok(vec![fold(text)]),
            Self::Dynamic(expr) => Ok(vec![fold(&expr.eval_traced(ctx, host)?.get().repr())]),
            Self::List(generator) => {
                let list = generator.eval_traced(ctx, host)?;
                let FilterXValue::List(list) = list.get() else {
                    unreachable!("ListGeneratorExpr::eval always produces a FilterXValue::List")
                };
                Ok(list.iter().map(|entry| fold(&entry.get().repr())).collect())
            }
        }
    }
}

#[derive(Debug)]
pub struct AffixExpr {
    kind: AffixKind,
    haystack: Box<dyn FilterXExpr>,
    needle: Needle,
    ignorecase: bool,
    /// Populated in `init` only when every needle leaf is a literal; `None`
    /// means at least one leaf must be (re)evaluated per record.
    cached_needles: Option<Vec<String>>,
}

impl AffixExpr {
    #[must_use]
    pub fn new(kind: AffixKind, haystack: Box<dyn FilterXExpr>, needle: Needle, ignorecase: bool) -> Self {
        Self {
            kind,
            haystack,
            needle,
            ignorecase,
            cached_needles: None,
        }
    }

    fn fold(&self, text: &str) -> String {
        if self.ignorecase {
            text.to_lowercase()
        } else {
            text.to_string()
        }
    }

    fn matches(&self, haystack: &str, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        match self.kind {
            AffixKind::Startswith => haystack.starts_with(needle),
            AffixKind::Endswith => haystack.ends_with(needle),
            AffixKind::Includes => haystack.contains(needle),
        }
    }
}

impl FilterXExpr for AffixExpr {
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        config.functions_mut().require(&self.kind.to_string())?;
        self.haystack.init(config)?;
        self.needle.init(config)?;
        if self.needle.is_fully_literal() {
            let ignorecase = self.ignorecase;
            let fold = move |s: &str| if ignorecase { s.to_lowercase() } else { s.to_string() };
            self.cached_needles = Some(self.needle.literal_strings(fold));
        }
        Ok(())
    }

    fn optimize(&mut self) {
        self.haystack.optimize();
        self.needle.optimize();
    }

    fn deinit(&mut self) {
        self.haystack.deinit();
        self.needle.deinit();
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let haystack = self.fold(&self.haystack.eval_traced(ctx, host)?.get().repr());
        let needles = match &self.cached_needles {
            Some(cached) => cached.clone(),
            None => self.needle.eval_strings(ctx, host, |s| self.fold(s))?,
        };
        let matched = needles.iter().any(|needle| self.matches(&haystack, needle));
        Ok(FilterXRef::new(FilterXValue::Bool(matched)))
    }
}
