//! End-to-end scenarios for `startswith`/`endswith`/`includes`, compiled
//! and evaluated the way a host embedding FilterX actually would: through
//! `FilterXConfig::init` and a `FilterXProgram`, not by calling `eval`
//! directly on a bare node.

use filterx::expr::generator::ListGeneratorExpr;
use filterx::expr::literal::LiteralExpr;
use filterx::expr::FilterXExpr;
use filterx::functions::affix::Needle;
use filterx::functions::{AffixExpr, AffixKind};
use filterx::host::message_store::InMemoryMessageStore;
use filterx::host::regex_engine::StdRegexEngine;
use filterx::host::stats::InMemoryStatsRegistry;
use filterx::host::template_engine::SimpleTemplateEngine;
use filterx::{FilterXConfig, FilterXEvalContext, FilterXHost, FilterXProgram, FilterXValue, Verdict};

fn lit(v: FilterXValue) -> Box<dyn FilterXExpr> {
    Box::new(LiteralExpr::new(v))
}

fn run(expr: Box<dyn FilterXExpr>) -> Verdict {
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(expr, &mut config).unwrap();

    let mut messages = InMemoryMessageStore::new();
    let templates = SimpleTemplateEngine::new();
    let regex = StdRegexEngine;
    let stats = InMemoryStatsRegistry::new(&["eval_count"]);
    let mut host = FilterXHost {
        messages: &mut messages,
        templates: &templates,
        regex: &regex,
        stats: &stats,
    };

    let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
    program.eval(&mut ctx, &mut host).unwrap()
}

#[test]
fn startswith_matches_a_literal_prefix() {
    let expr = Box::new(AffixExpr::new(
        AffixKind::Startswith,
        lit(FilterXValue::string("2026-07-28 log line")),
        Needle::Literal("2026-07-28".to_string()),
        false,
    ));
    assert_eq!(run(expr), Verdict::Passed(true));
}

#[test]
fn endswith_is_case_sensitive_unless_ignorecase_is_set() {
    let expr = Box::new(AffixExpr::new(
        AffixKind::Endswith,
        lit(FilterXValue::string("request.LOG")),
        Needle::Literal(".log".to_string()),
        false,
    ));
    assert_eq!(run(expr), Verdict::Passed(false));

    let expr = Box::new(AffixExpr::new(
        AffixKind::Endswith,
        lit(FilterXValue::string("request.LOG")),
        Needle::Literal(".log".to_string()),
        true,
    ));
    assert_eq!(run(expr), Verdict::Passed(true));
}

#[test]
fn includes_finds_a_dynamic_needle_evaluated_per_record() {
    let needle = Box::new(LiteralExpr::new(FilterXValue::string("ERROR")));
    let expr = Box::new(AffixExpr::new(
        AffixKind::Includes,
        lit(FilterXValue::string("2026-07-28T00:00:00 ERROR something broke")),
        Needle::Dynamic(needle),
        false,
    ));
    assert_eq!(run(expr), Verdict::Passed(true));
}

#[test]
fn an_empty_needle_always_matches_regardless_of_kind() {
    for kind in [AffixKind::Startswith, AffixKind::Endswith, AffixKind::Includes] {
        let expr = Box::new(AffixExpr::new(kind, lit(FilterXValue::string("anything at all")), Needle::Literal(String::new()), false));
        assert_eq!(run(expr), Verdict::Passed(true));
    }
}

#[test]
fn endswith_matches_any_element_of_a_list_needle() {
    let needles = ListGeneratorExpr::new(vec![lit(FilterXValue::string(".zip")), lit(FilterXValue::string(".gz"))]);
    let expr = Box::new(AffixExpr::new(AffixKind::Endswith, lit(FilterXValue::string("file.tar.gz")), Needle::List(needles), false));
    assert_eq!(run(expr), Verdict::Passed(true));

    let needles = ListGeneratorExpr::new(vec![lit(FilterXValue::string(".zip"))]);
    let expr = Box::new(AffixExpr::new(AffixKind::Endswith, lit(FilterXValue::string("file.tar.gz")), Needle::List(needles), false));
    assert_eq!(run(expr), Verdict::Passed(false));
}

#[test]
fn an_unknown_function_name_would_be_caught_at_configuration_time() {
    // AffixExpr::init checks its own kind's name against the function
    // registry; every built-in kind is preregistered by FilterXConfig::new.
    let mut config = FilterXConfig::new();
    assert!(config.functions().require("startswith").is_ok());
    assert!(config.functions().require("endswith").is_ok());
    assert!(config.functions().require("includes").is_ok());
}
