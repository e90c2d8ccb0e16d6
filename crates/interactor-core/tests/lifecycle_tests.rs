use std::fmt;

use interactor_core::{interactor, Context, ContextError, Declare, Failure, FieldRegistry, Interactor, InteractorError,
                      RunEventKind, RuntimeConfig, Runner, StepResult, StepStatus};
use serde_json::json;

interactor! {
    struct AlwaysFails {
        receive { reason }
    }
    execute(ctx) {
        let reason = ctx.get("reason")?;
        ctx.fail(json!({ "error": reason }))
    }
}

interactor! {
    struct Counts {
        hold { count: 0 }
    }
    execute(ctx) {
        let count: u64 = ctx.get_as("count")?;
        ctx.set("count", count + 1)?;
        Ok(())
    }
}

#[derive(Debug)]
struct Boom;

impl fmt::Display for Boom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("boom")
    }
}

impl std::error::Error for Boom {}

interactor! {
    struct Explodes {}
    execute(_ctx) {
        Err(InteractorError::unhandled(Boom))
    }
}

/// Falla sin pasar por `Context::fail`: el runner debe marcar el contexto.
#[derive(Default)]
struct RaisesFailure;

impl Declare for RaisesFailure {
    fn declare(fields: &mut FieldRegistry) {
        fields.hold("touched");
    }
}

impl Interactor for RaisesFailure {
    fn name() -> &'static str {
        "raises_failure"
    }

    fn execute(&mut self, ctx: &mut Context) -> StepResult {
        ctx.set("touched", true)?;
        Err(Failure::new(ctx).with_error("raised directly").into())
    }
}

#[test]
fn fail_flips_flag_once_but_signals_every_time() {
    let mut ctx = Context::new();
    assert!(ctx.success());

    let first: StepResult = ctx.fail("first");
    let failure = first.unwrap_err().into_failure().expect("failure");
    assert!(failure.refers_to(&ctx));
    assert!(ctx.failure());

    let second: StepResult = ctx.fail(json!(null));
    assert!(second.unwrap_err().is_failure());
    assert!(ctx.failure());
    // sin atributos nuevos el error anterior se conserva
    assert_eq!(ctx.error(), Some(&json!("first")));
}

#[test]
fn call_recovers_business_failure() {
    let ctx = AlwaysFails::call(json!({ "reason": "nope" })).expect("call never raises business failure");
    assert!(ctx.failure());
    assert_eq!(ctx.error(), Some(&json!("nope")));
    assert_eq!(ctx.event_variants(), vec!["S", "X", "R"]);
}

#[test]
fn call_strict_propagates_business_failure_with_context() {
    let err = AlwaysFails::call_strict(json!({ "reason": "nope" })).unwrap_err();
    assert!(err.is_failure());
    let failure = err.into_failure().expect("failure");
    assert_eq!(failure.step(), Some("AlwaysFails"));
    assert_eq!(failure.to_string(), "step `AlwaysFails` failed: nope");

    let ctx = failure.into_context().expect("context attached");
    assert!(ctx.failure());
    assert_eq!(ctx.event_variants(), vec!["S", "X"]);
}

#[test]
fn construction_errors_surface_from_both_entry_points() {
    for result in [AlwaysFails::call(json!({})), AlwaysFails::call_strict(json!({}))] {
        let err = result.unwrap_err();
        assert!(matches!(err, InteractorError::Context(ContextError::MissingFields { .. })));
    }
}

#[test]
fn unhandled_errors_propagate_and_leave_flag_untouched() {
    let mut ctx = Explodes::build(json!({})).unwrap();
    let err = Runner::<Explodes>::new(&mut ctx).unwrap().run().unwrap_err();
    assert!(matches!(err, InteractorError::Unhandled(_)));
    assert_eq!(err.to_string(), "boom");
    assert!(ctx.success());
    assert!(matches!(&ctx.events()[1].kind, RunEventKind::StepErrored { message, .. } if message == "boom"));

    assert!(Explodes::call(json!({})).is_err());
}

#[test]
fn runner_marks_context_for_failures_raised_directly() {
    let mut ctx = RaisesFailure::build(json!({})).unwrap();
    let status = Runner::<RaisesFailure>::new(&mut ctx).unwrap().run().unwrap();
    assert_eq!(status, StepStatus::Failed);
    assert!(ctx.failure());
    assert_eq!(ctx.error(), Some(&json!("raised directly")));
    assert_eq!(ctx.get("touched").unwrap(), json!(true));
    assert!(matches!(&ctx.events()[0].kind, RunEventKind::StepStarted { step } if step == "raises_failure"));
}

#[test]
fn run_strict_returns_the_failure() {
    let mut ctx = RaisesFailure::build(json!({})).unwrap();
    let err = Runner::<RaisesFailure>::new(&mut ctx).unwrap().run_strict().unwrap_err();
    assert!(err.is_failure());
    assert!(ctx.failure());
}

#[test]
fn runner_starts_pending_and_ends_succeeded() {
    let mut ctx = Counts::build(json!({})).unwrap();
    let runner = Runner::<Counts>::new(&mut ctx).unwrap();
    assert_eq!(runner.status(), StepStatus::Pending);
    assert_eq!(runner.run().unwrap(), StepStatus::Succeeded);
    assert_eq!(ctx.get("count").unwrap(), json!(1));
}

#[test]
fn journal_follows_config() {
    let quiet = RuntimeConfig { journal: false };
    let mut ctx = Counts::shape().build_with_config(json!({}), quiet).unwrap();
    Runner::<Counts>::new(&mut ctx).unwrap().run().unwrap();
    assert!(ctx.events().is_empty());
    assert_eq!(ctx.get("count").unwrap(), json!(1));
}

#[test]
fn succeeded_event_names_the_step() {
    let ctx = Counts::call(json!({})).unwrap();
    match &ctx.events()[1].kind {
        RunEventKind::StepSucceeded { step } => assert_eq!(step, "Counts"),
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn to_h_includes_failure_metadata() {
    let mut ctx = AlwaysFails::call(json!({ "reason": "nope", "ignored": 1 })).unwrap();
    let map = ctx.to_h().unwrap();
    assert_eq!(map.get("reason"), Some(&json!("nope")));
    assert_eq!(map.get("success"), Some(&json!(false)));
    assert_eq!(map.get("error"), Some(&json!("nope")));
    assert_eq!(map.get("error_cause"), Some(&json!([])));
    assert!(!map.contains_key("ignored"));
}
