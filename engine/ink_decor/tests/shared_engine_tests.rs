#![allow(clippy::unwrap_used, clippy::expect_used)]
//! A shared engine serializes updates coming from several threads.

use std::thread;

use ink_decor::{Engine, SharedEngine};

#[test]
fn concurrent_updates_leave_a_consistent_state() {
    let shared = SharedEngine::new(Engine::new());
    let texts: Vec<String> = (0..4)
        .map(|worker| format!("# Worker {worker}\n\n- [ ] item\n\n```rust\nfn f() {{}}\n```"))
        .collect();

    thread::scope(|scope| {
        for text in &texts {
            let shared = &shared;
            scope.spawn(move || {
                for round in 0..10 {
                    let edited = format!("{text}\n\nround {round}");
                    shared.update(&edited).unwrap();
                    let labels = shared.line_decorations(1).unwrap();
                    assert_eq!(labels.get(0), Some("heading heading-1"));
                }
            });
        }
    });

    let state = shared.snapshot();
    assert_eq!(state.validate(), Ok(()));
    let last_line = shared.with_state(|state| state.line(state.line_count()).map(str::to_owned));
    assert_eq!(last_line.as_deref(), Some("round 9"));

    let engine = shared.into_inner();
    let scratch = engine.decorate_from_scratch(&state.text()).unwrap();
    assert!(state.same_decorations(&scratch));
}

#[test]
fn acknowledging_through_the_lock() {
    let shared: SharedEngine = Engine::new().into();
    shared.update("a\n\nb").unwrap();
    assert!(!shared.is_fully_decorated());
    shared.line_decorations(1);
    shared.line_decorations(3);
    assert!(shared.is_fully_decorated());
}
