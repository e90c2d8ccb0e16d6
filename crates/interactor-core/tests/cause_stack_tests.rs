use interactor_core::{interactor, organizer, Cause, Interactor};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("socket closed")]
struct SocketClosed;

#[derive(Debug, Error)]
#[error("lookup failed")]
struct LookupFailed {
    #[source]
    source: SocketClosed,
}

fn lookup() -> Result<String, LookupFailed> {
    Err(LookupFailed { source: SocketClosed })
}

interactor! {
    struct FetchProfile {
        receive { user_id }
        hold { profile }
    }
    execute(ctx) {
        match lookup() {
            Ok(profile) => {
                ctx.set("profile", profile)?;
                Ok(())
            }
            Err(err) => ctx.fail_with_cause(&err, json!({ "error": "profile unavailable" })),
        }
    }
}

interactor! {
    struct Greet {
        hold { greeted: false }
    }
    execute(ctx) {
        ctx.set("greeted", true)?;
        Ok(())
    }
}

organizer! {
    struct Onboard {
        organize [FetchProfile, Greet]
    }
}

#[test]
fn cause_stack_holds_failure_and_both_underlying_errors() {
    let err = FetchProfile::call_strict(json!({ "user_id": 7 })).unwrap_err();
    let failure = err.into_failure().expect("business failure");

    let stack = failure.cause_stack();
    assert_eq!(stack.len(), 3);
    assert_eq!(stack[0].kind, Cause::FAILURE_KIND);
    assert_eq!(stack[1], Cause::new("LookupFailed", "lookup failed"));
    assert_eq!(stack[2], Cause::new("SocketClosed", "socket closed"));
}

#[test]
fn causes_are_visible_from_the_organizer_context() {
    let mut ctx = Onboard::call(json!({ "user_id": 7 })).unwrap();
    assert!(ctx.failure());
    assert_eq!(ctx.get("greeted").unwrap(), json!(false));

    let messages: Vec<&str> = ctx.error_cause().iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["lookup failed", "socket closed"]);

    let map = ctx.to_h().unwrap();
    assert_eq!(map["error"], json!("profile unavailable"));
    assert_eq!(map["error_cause"][1], json!({ "kind": "SocketClosed", "message": "socket closed" }));
}

#[test]
fn cause_defaults_error_to_its_message() {
    let mut ctx = interactor_core::Context::new();
    let result: interactor_core::StepResult = ctx.fail_with_cause(&SocketClosed, json!(null));
    assert!(result.is_err());
    assert_eq!(ctx.error(), Some(&json!("socket closed")));
}
