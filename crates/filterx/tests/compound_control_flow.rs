//! End-to-end scenarios for a compiled compound expression: short-circuit
//! AND semantics, ignored-falsy statements, and the `drop`/`done` control
//! statements reaching all the way from a real evaluation into a host's
//! observed verdict.

use filterx::expr::assign::AssignExpr;
use filterx::expr::compound::CompoundExpr;
use filterx::expr::control::{DoneExpr, DropExpr};
use filterx::expr::literal::LiteralExpr;
use filterx::expr::FilterXExpr;
use filterx::host::message_store::InMemoryMessageStore;
use filterx::host::regex_engine::StdRegexEngine;
use filterx::host::stats::InMemoryStatsRegistry;
use filterx::host::template_engine::SimpleTemplateEngine;
use filterx::variable::VariableDirectory;
use filterx::{FilterXConfig, FilterXEvalContext, FilterXHost, FilterXProgram, FilterXValue, Verdict};

fn lit(v: FilterXValue) -> Box<dyn FilterXExpr> {
    Box::new(LiteralExpr::new(v))
}

struct Harness {
    messages: InMemoryMessageStore,
    templates: SimpleTemplateEngine,
    regex: StdRegexEngine,
    stats: InMemoryStatsRegistry,
}

impl Harness {
    fn new() -> Self {
        Self {
            messages: InMemoryMessageStore::new(),
            templates: SimpleTemplateEngine::new(),
            regex: StdRegexEngine,
            stats: InMemoryStatsRegistry::new(&["eval_count"]),
        }
    }

    fn host(&mut self) -> FilterXHost<'_> {
        FilterXHost {
            messages: &mut self.messages,
            templates: &self.templates,
            regex: &self.regex,
            stats: &self.stats,
        }
    }
}

#[test]
fn a_compound_filter_body_passes_only_when_every_statement_is_truthy() {
    let root = Box::new(CompoundExpr::filter_body(vec![
        lit(FilterXValue::Bool(true)),
        lit(FilterXValue::Int(1)),
        lit(FilterXValue::string("non-empty")),
    ]));
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(root, &mut config).unwrap();

    let mut harness = Harness::new();
    let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
    assert_eq!(program.eval(&mut ctx, &mut harness.host()).unwrap(), Verdict::Passed(true));
}

#[test]
fn the_first_falsy_statement_fails_the_whole_filter() {
    let root = Box::new(CompoundExpr::filter_body(vec![
        lit(FilterXValue::Bool(true)),
        lit(FilterXValue::Int(0)),
        lit(FilterXValue::Bool(true)),
    ]));
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(root, &mut config).unwrap();

    let mut harness = Harness::new();
    let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
    assert_eq!(program.eval(&mut ctx, &mut harness.host()).unwrap(), Verdict::Passed(false));
}

#[test]
fn an_assignment_statement_does_not_participate_in_the_pass_fail_verdict() {
    let dir = VariableDirectory::global();
    let handle = dir.intern("compound_it_test_ignored_assignment");
    let root = Box::new(CompoundExpr::new(
        vec![Box::new(AssignExpr::new(handle, lit(FilterXValue::Int(0)))), lit(FilterXValue::Bool(true))],
        vec![true, false],
        false,
    ));
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(root, &mut config).unwrap();

    let mut harness = Harness::new();
    let mut ctx = FilterXEvalContext::with_directory(vec![1], Default::default(), dir);
    assert_eq!(program.eval(&mut ctx, &mut harness.host()).unwrap(), Verdict::Passed(true));
}

#[test]
fn drop_discards_the_record_without_touching_later_statements() {
    let dir = VariableDirectory::global();
    let handle = dir.intern("compound_it_test_drop_skips_assignment");
    let root = Box::new(CompoundExpr::filter_body(vec![
        Box::new(DropExpr),
        Box::new(AssignExpr::new(handle, lit(FilterXValue::Int(1)))),
    ]));
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(root, &mut config).unwrap();

    let mut harness = Harness::new();
    let mut ctx = FilterXEvalContext::with_directory(vec![1], Default::default(), dir);
    assert_eq!(program.eval(&mut ctx, &mut harness.host()).unwrap(), Verdict::Drop);
    assert!(ctx.scope().get(handle).unwrap().is_none());
}

#[test]
fn done_stops_processing_but_is_reported_as_done_not_drop() {
    let root = Box::new(CompoundExpr::filter_body(vec![Box::new(DoneExpr), lit(FilterXValue::Bool(false))]));
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(root, &mut config).unwrap();

    let mut harness = Harness::new();
    let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
    assert_eq!(program.eval(&mut ctx, &mut harness.host()).unwrap(), Verdict::Done);
}

#[test]
fn a_nested_compound_used_as_a_value_returns_its_last_expression() {
    let inner = Box::new(CompoundExpr::new(vec![lit(FilterXValue::Int(1)), lit(FilterXValue::Int(42))], vec![true, true], true));
    let mut config = FilterXConfig::new();
    let program = FilterXProgram::compile(inner, &mut config).unwrap();

    let mut harness = Harness::new();
    let mut ctx = FilterXEvalContext::new(vec![1], Default::default());
    let (value, verdict) = program.eval_value(&mut ctx, &mut harness.host()).unwrap();
    assert_eq!(value.get(), &FilterXValue::Int(42));
    assert_eq!(verdict, Verdict::Value);
}
