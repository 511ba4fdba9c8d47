//! Failures: handler errors, store errors, aborted cascades.

use std::error::Error;

use cqrs_bus::{
    BusError, CommandBus, CommandList, Dispatch, FnHandler, HandlerError, IgnoreFailures,
    InMemoryStore,
};
use serde_json::{json, Value};

use crate::support::{
    Balance, Deposit, FailingStore, Journal, JournalStore, Notify, RecordingObserver, Step,
    StoreUnavailable, Withdraw,
};

// ============================================================================
// Handler failures are wrapped and observed exactly once
// ============================================================================

#[test]
fn handler_failure_is_wrapped_in_dispatch_error() {
    let mut bus = CommandBus::new(InMemoryStore::new())
        .with_observer(RecordingObserver::default())
        .handler_for::<Withdraw, _>(
            FnHandler::new(|w: &Withdraw, _: &mut CommandList| {
                Err(HandlerError::Rejected(format!(
                    "insufficient funds in {}",
                    w.account
                )))
            })
            .with_name("withdraw"),
        );

    let err = bus
        .dispatch(&Withdraw {
            account: "a1".into(),
            amount: 500,
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "Command 'Withdraw' cannot be handled.");
    match &err {
        BusError::Dispatch {
            request_type,
            source,
        } => {
            assert_eq!(request_type, "Withdraw");
            assert!(matches!(source, HandlerError::Rejected(msg) if msg == "insufficient funds in a1"));
        }
        other => panic!("Expected Dispatch, got: {:?}", other),
    }
    assert_eq!(
        err.source().map(|e| e.to_string()),
        Some("rejected: insufficient funds in a1".to_string())
    );

    assert_eq!(
        bus.observer().failures,
        vec![(
            "withdraw".to_string(),
            "Withdraw".to_string(),
            "rejected: insufficient funds in a1".to_string()
        )]
    );
    assert!(bus.store().is_empty());
}

#[test]
fn query_failure_uses_the_same_wrapping() {
    let mut bus = CommandBus::new(InMemoryStore::new())
        .with_observer(RecordingObserver::default())
        .handler_for::<Balance, _>(FnHandler::new(|b: &Balance, _: &mut CommandList| {
            Err(HandlerError::NotFound(b.account.clone()))
        }));

    let err = bus
        .query(&Balance {
            account: "ghost".into(),
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "Command 'Balance' cannot be handled.");
    assert!(matches!(err.handler_error(), Some(HandlerError::NotFound(id)) if id == "ghost"));
    assert_eq!(bus.observer().failures.len(), 1);
}

#[test]
fn handler_bound_to_another_type_fails_with_unexpected_request() {
    let mut bus = CommandBus::new(InMemoryStore::new()).with_observer(IgnoreFailures).handler(
        "Deposit",
        FnHandler::new(|_: &Withdraw, _: &mut CommandList| Ok(Value::Null)),
    );

    let err = bus
        .dispatch(&Deposit {
            account: "a1".into(),
            amount: 1,
        })
        .unwrap_err();

    match err.handler_error() {
        Some(HandlerError::UnexpectedRequest { expected, actual }) => {
            assert_eq!(*expected, "Withdraw");
            assert_eq!(*actual, "Deposit");
        }
        other => panic!("Expected UnexpectedRequest, got: {:?}", other),
    }
}

#[test]
fn failed_handler_follow_ups_are_dropped() {
    let journal = Journal::new();
    let notify_journal = journal.clone();

    let mut bus = CommandBus::new(JournalStore::new(&journal))
        .with_observer(IgnoreFailures)
        .handler_for::<Deposit, _>(FnHandler::new(|d: &Deposit, next: &mut CommandList| {
            next.push(Notify {
                account: d.account.clone(),
            });
            if d.amount == 0 {
                return Err(HandlerError::Rejected("empty deposit".into()));
            }
            Ok(json!(d.amount))
        }))
        .handler_for::<Notify, _>(FnHandler::new(move |n: &Notify, _: &mut CommandList| {
            notify_journal.record(format!("notify:{}", n.account));
            Ok(Value::Null)
        }));

    assert!(bus
        .dispatch(&Deposit {
            account: "a1".into(),
            amount: 0,
        })
        .is_err());
    assert!(journal.entries().is_empty());

    // The follow-up from the failed call must not resurface on the next one.
    bus.dispatch(&Deposit {
        account: "a2".into(),
        amount: 5,
    })
    .unwrap();
    assert_eq!(journal.entries(), vec!["save:5", "notify:a2", "save:null"]);
}

// ============================================================================
// Store failures propagate untouched
// ============================================================================

#[test]
fn store_failure_propagates_unwrapped_and_stops_cascade() {
    let journal = Journal::new();
    let notify_journal = journal.clone();

    let mut bus = CommandBus::new(FailingStore)
        .handler_for::<Deposit, _>(FnHandler::new(|d: &Deposit, next: &mut CommandList| {
            next.push(Notify {
                account: d.account.clone(),
            });
            Ok(json!(d.amount))
        }))
        .handler_for::<Notify, _>(FnHandler::new(move |_: &Notify, _: &mut CommandList| {
            notify_journal.record("notify");
            Ok(Value::Null)
        }));

    let err = bus
        .dispatch(&Deposit {
            account: "a1".into(),
            amount: 5,
        })
        .unwrap_err();

    assert_eq!(err.to_string(), "store unavailable");
    assert_eq!(err.downcast_store_error::<StoreUnavailable>(), Some(&StoreUnavailable));
    assert!(journal.entries().is_empty());
}

#[test]
fn store_is_not_called_for_queries() {
    let mut bus = CommandBus::new(FailingStore).handler_for::<Balance, _>(FnHandler::new(
        |_: &Balance, _: &mut CommandList| Ok(json!(1)),
    ));

    assert_eq!(
        bus.query(&Balance {
            account: "a1".into()
        })
        .unwrap(),
        json!(1)
    );
}

// ============================================================================
// A failing follow-up aborts its remaining siblings
// ============================================================================

#[test]
fn failure_mid_cascade_aborts_remaining_siblings() {
    let journal = Journal::new();
    let step_journal = journal.clone();

    let mut bus = CommandBus::new(InMemoryStore::new())
        .with_observer(RecordingObserver::default())
        .handler_for::<Step, _>(FnHandler::new(move |step: &Step, next: &mut CommandList| {
            step_journal.record(step.label.clone());
            if step.label == "bad" {
                return Err(HandlerError::Rejected("bad step".into()));
            }
            for child in &step.children {
                next.push(Step::leaf(child));
            }
            Ok(json!(step.label))
        }));

    let err = bus
        .dispatch(&Step::with_children("root", &["first", "bad", "last"]))
        .unwrap_err();

    assert_eq!(err.to_string(), "Command 'step' cannot be handled.");
    assert_eq!(journal.entries(), vec!["root", "first", "bad"]);
    assert_eq!(bus.store().results(), &[json!("root"), json!("first")]);
    assert_eq!(bus.observer().failures.len(), 1);
}
