//! Literal container generators: `{ "a": 1, "b": expr }` and `[1, 2, expr]`
//! Each element is evaluated and deep-cloned into the new
//! container, since storing a scratch-borrowed `message_value` into a
//! container requires materializing it.

use super::FilterXExpr;
use crate::config::FilterXConfig;
use crate::context::FilterXEvalContext;
use crate::error::RunResult;
use crate::host::FilterXHost;
use crate::object::{FilterXDict, FilterXList, FilterXValue};
use crate::reference::FilterXRef;

#[derive(Debug)]
pub struct ListGeneratorExpr {
    elements: Vec<Box<dyn FilterXExpr>>,
}

impl ListGeneratorExpr {
    #[must_use]
    pub fn new(elements: Vec<Box<dyn FilterXExpr>>) -> Self {
        Self { elements }
    }
}

impl FilterXExpr for ListGeneratorExpr {
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        for (i, element) in self.elements.iter_mut().enumerate() {
            if let Err(err) = element.init(config) {
                for element in self.elements[..i].iter_mut().rev() {
                    element.deinit();
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn optimize(&mut self) {
        for element in &mut self.elements {
            element.optimize();
        }
    }

    fn deinit(&mut self) {
        for element in self.elements.iter_mut().rev() {
            element.deinit();
        }
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let mut list = FilterXList::new();
        for element in &self.elements {
            let value = element.eval_traced(ctx, host)?;
            list.append(FilterXRef::new(value.get().clone_deep()));
        }
        Ok(FilterXRef::new(FilterXValue::List(list)))
    }
}

impl ListGeneratorExpr {
    /// Calls `f` once per element, in declaration order, with `Some(value)`
    /// when that element is already a compile-time literal and `None` when
    /// it must be (re)evaluated per record. A caller like an affix
    /// function's `init` uses this to pre-fold and cache literal needle
    /// strings without driving `eval`.
    pub fn literal_list_generator_foreach(&self, mut f: impl FnMut(usize, Option<&FilterXValue>)) {
        for (i, element) in self.elements.iter().enumerate() {
            f(i, element.as_literal_value());
        }
    }
}

#[derive(Debug)]
pub struct DictGeneratorExpr {
    entries: Vec<(String, Box<dyn FilterXExpr>)>,
}

impl DictGeneratorExpr {
    #[must_use]
    pub fn new(entries: Vec<(String, Box<dyn FilterXExpr>)>) -> Self {
        Self { entries }
    }
}

impl FilterXExpr for DictGeneratorExpr {
    fn init(&mut self, config: &mut FilterXConfig) -> RunResult<()> {
        for (i, (_, value_expr)) in self.entries.iter_mut().enumerate() {
            if let Err(err) = value_expr.init(config) {
                for (_, value_expr) in self.entries[..i].iter_mut().rev() {
                    value_expr.deinit();
                }
                return Err(err);
            }
        }
        Ok(())
    }

    fn optimize(&mut self) {
        for (_, value_expr) in &mut self.entries {
            value_expr.optimize();
        }
    }

    fn deinit(&mut self) {
        for (_, value_expr) in self.entries.iter_mut().rev() {
            value_expr.deinit();
        }
    }

    fn eval(&self, ctx: &mut FilterXEvalContext, host: &mut FilterXHost<'_>) -> RunResult<FilterXRef> {
        let mut dict = FilterXDict::new();
        for (key, value_expr) in &self.entries {
            let value = value_expr.eval_traced(ctx, host)?;
            dict.set(key.clone(), FilterXRef::new(value.get().clone_deep()));
        }
        Ok(FilterXRef::new(FilterXValue::Dict(dict)))
    }
}

impl DictGeneratorExpr {
    /// Calls `f` once per entry, in declaration order, with `Some(value)`
    /// when that entry's value is already a compile-time literal and `None`
    /// otherwise. Same purpose as `ListGeneratorExpr::literal_list_generator_foreach`.
    pub fn literal_dict_generator_foreach(&self, mut f: impl FnMut(&str, Option<&FilterXValue>)) {
        for (key, value_expr) in &self.entries {
            f(key, value_expr.as_literal_value());
        }
    }
}

/// Builds an insertion-ordered dict from `(key, value)` pairs, last write
/// wins on a duplicate key. Shared by generator-functions (`regexp_search`
/// in dict mode) that need to materialize a result set the same way a
/// literal dict generator would.
#[must_use]
pub fn dict_from_pairs(pairs: impl IntoIterator<Item = (String, FilterXValue)>) -> FilterXDict {
    let mut dict = FilterXDict::new();
    for (key, value) in pairs {
        dict.set(key, FilterXRef::new(value));
    }
    dict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::literal::LiteralExpr;
    use crate::expr::test_support::TestHost;

    fn lit(v: FilterXValue) -> Box<dyn FilterXExpr> {
        Box::new(LiteralExpr::new(v))
    }

    #[test]
    fn list_generator_preserves_order() {
        let expr = ListGeneratorExpr::new(vec![lit(FilterXValue::Int(1)), lit(FilterXValue::Int(2)), lit(FilterXValue::Int(3))]);
        let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
        let mut host = TestHost::new();
        let result = expr.eval(&mut ctx, &mut host.as_host()).unwrap();
        assert_eq!(result.get().len(), Some(3));
    }

    #[test]
    fn dict_generator_builds_named_entries() {
        let expr = DictGeneratorExpr::new(vec![("name".to_string(), lit(FilterXValue::string("alice")))]);
        let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
        let mut host = TestHost::new();
        let result = expr.eval(&mut ctx, &mut host.as_host()).unwrap();
        let FilterXValue::Dict(dict) = result.get() else { panic!("expected a dict") };
        assert_eq!(dict.get("name").unwrap().get().repr(), "alice");
    }

    #[test]
    fn dict_from_pairs_last_write_wins_on_duplicate_key() {
        let dict = dict_from_pairs([("n".to_string(), FilterXValue::Int(1)), ("n".to_string(), FilterXValue::Int(2))]);
        assert_eq!(dict.get("n").unwrap().get(), &FilterXValue::Int(2));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn literal_list_generator_foreach_reports_which_elements_are_literal() {
        let expr = ListGeneratorExpr::new(vec![
            lit(FilterXValue::string("a")),
            Box::new(crate::expr::variable_ref::VariableRefExpr::new(
                crate::variable::VariableDirectory::global().intern("generator_test_dynamic"),
                "x",
            )),
        ]);
        let mut seen = Vec::new();
        expr.literal_list_generator_foreach(|i, value| seen.push((i, value.is_some())));
        assert_eq!(seen, vec![(0, true), (1, false)]);
    }

    #[test]
    fn literal_dict_generator_foreach_reports_which_entries_are_literal() {
        let expr = DictGeneratorExpr::new(vec![("name".to_string(), lit(FilterXValue::string("alice")))]);
        let mut seen = Vec::new();
        expr.literal_dict_generator_foreach(|key, value| seen.push((key.to_string(), value.is_some())));
        assert_eq!(seen, vec![("name".to_string(), true)]);
    }

    #[test]
    fn list_generator_init_reaches_every_element() {
        use crate::config::FilterXConfig;
        use crate::functions::regexp_search::RegexpSearchMode;
        use crate::functions::RegexpSearchExpr;

        let bad_pattern = Box::new(RegexpSearchExpr::new(lit(FilterXValue::string("x")), "(unclosed", false, RegexpSearchMode::Dict, false));
        let mut expr = ListGeneratorExpr::new(vec![lit(FilterXValue::Int(1)), bad_pattern]);
        let mut config = FilterXConfig::new();
        let err = expr.init(&mut config).unwrap_err();
        assert_eq!(err.kind().to_string(), "configuration");
    }
}
