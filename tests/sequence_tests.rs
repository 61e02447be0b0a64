//! End-to-end scenarios against the in-memory document.

use segue::animation::{then, AnimationError, Animator, TransitionStep, COMPLETION_EVENTS};
use segue::builder::{opacity_steps, AnimatorBuilder, SequenceBuilder};
use segue::config::AnimatorConfig;
use segue::core::{size_fill, CompletionCause, StyleChangeSet, StyleProperty};
use segue::display;
use segue::host::{ElementId, Host, MemoryDocument};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn noisy_document() -> MemoryDocument {
    MemoryDocument::new().with_completion_events(COMPLETION_EVENTS)
}

#[test]
fn two_step_sequence_scenario() {
    let doc = noisy_document();
    let el = doc.create_element("div");
    let el2 = doc.create_element("div");
    let animator = Animator::new(doc.clone());
    let calls = Rc::new(RefCell::new(Vec::new()));
    let finished = Rc::new(Cell::new(0));

    let sink = Rc::clone(&calls);
    let count = Rc::clone(&finished);
    SequenceBuilder::new()
        .step(el, StyleChangeSet::new().with(StyleProperty::Opacity, "0"), 100)
        .step(el2, StyleChangeSet::new().with(StyleProperty::Left, "50px"), 300)
        .on_step(move |_: &ElementId, index, total| sink.borrow_mut().push((index, total)))
        .on_complete(move || count.set(count.get() + 1))
        .run(&animator)
        .unwrap();
    doc.run_until_idle();

    assert_eq!(*calls.borrow(), vec![(0, 2), (1, 2)]);
    assert_eq!(finished.get(), 1);
    assert_eq!(doc.style(&el2, StyleProperty::Transition), "");
    assert_eq!(doc.style(&el, StyleProperty::Transition), "all 100ms");
    assert_eq!(doc.listener_count(el), 0);
    assert_eq!(doc.listener_count(el2), 0);
}

#[test]
fn same_element_steps_wait_for_their_own_completion() {
    let doc = noisy_document();
    let el = doc.create_element("div");
    let animator = Animator::new(doc.clone());
    let completions = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&completions);
    let clock = doc.clone();
    SequenceBuilder::new()
        .step(el, StyleChangeSet::new().with(StyleProperty::Left, "10px"), 100)
        .step(el, StyleChangeSet::new().with(StyleProperty::Left, "20px"), 300)
        .on_step(move |_: &ElementId, index, _| sink.borrow_mut().push((index, clock.now_ms())))
        .run(&animator)
        .unwrap();

    assert_eq!(doc.run_until_idle(), 400);
    assert_eq!(*completions.borrow(), vec![(0, 100), (1, 400)]);
    assert_eq!(doc.style(&el, StyleProperty::Left), "20px");
    assert_eq!(doc.listener_count(el), 0);
}

#[test]
fn fade_in_scenario() {
    let doc = noisy_document();
    let el = doc.create_element("div");
    let animator = Animator::new(doc.clone());
    let count = Rc::new(Cell::new(0));
    let c = Rc::clone(&count);

    animator
        .fade_in(&el, 200, then(move |_: &ElementId| c.set(c.get() + 1)))
        .unwrap();
    doc.run_until_idle();

    assert_eq!(count.get(), 1);
    assert_eq!(doc.style(&el, StyleProperty::Opacity), "1");
    assert_eq!(doc.style(&el, StyleProperty::Transition), "");
}

#[test]
fn fade_out_then_back_in_from_callback() {
    let doc = MemoryDocument::new();
    let el = doc.create_element("div");
    let animator = Animator::new(doc.clone());
    let again = animator.clone();

    animator
        .fade_out(
            &el,
            100,
            then(move |el: &ElementId| again.fade_in(el, 100, None).unwrap()),
        )
        .unwrap();

    assert_eq!(doc.run_until_idle(), 200);
    assert_eq!(doc.style(&el, StyleProperty::Opacity), "1");
}

#[test]
fn fade_back_in_ignores_leftover_vendor_events() {
    let doc = noisy_document();
    let el = doc.create_element("div");
    let animator = Animator::new(doc.clone());
    let again = animator.clone();
    let clock = doc.clone();
    let faded_in_at = Rc::new(Cell::new(None));
    let at = Rc::clone(&faded_in_at);

    animator
        .fade_out(
            &el,
            100,
            then(move |el: &ElementId| {
                let clock = clock.clone();
                let at = Rc::clone(&at);
                again
                    .fade_in(el, 100, then(move |_: &ElementId| at.set(Some(clock.now_ms()))))
                    .unwrap()
            }),
        )
        .unwrap();

    assert_eq!(doc.run_until_idle(), 200);
    assert_eq!(faded_in_at.get(), Some(200));
    assert_eq!(doc.style(&el, StyleProperty::Transition), "");
}

#[test]
fn stalled_sequence_recovers_with_configured_timeout() {
    let doc = MemoryDocument::new();
    let el = doc.create_element("div");
    doc.set_style(&el, StyleProperty::Opacity, "0");
    let config =
        AnimatorConfig::from_json(r#"{"stall_timeout": {"safety_factor": 1.0, "min_ms": 0}}"#)
            .unwrap();
    let animator = AnimatorBuilder::new().config(config).build(doc.clone()).unwrap();

    let handle = animator
        .sequence(opacity_steps([el, el], "0", 120), None, None)
        .unwrap();
    let elapsed = doc.run_until_idle();

    assert_eq!(elapsed, 240);
    assert!(handle.is_done());
    let history = handle.history();
    assert_eq!(history.timed_out(), 2);
    assert!(history.steps().iter().all(|s| s.cause == CompletionCause::TimedOut));
}

#[test]
fn rejected_inputs_write_nothing() {
    let doc = MemoryDocument::new();
    let el = doc.create_element("div");
    let animator = Animator::new(doc.clone());

    assert_eq!(
        animator.sequence(Vec::new(), None, None).unwrap_err(),
        AnimationError::EmptySequence
    );

    let steps = vec![TransitionStep::new(
        el,
        StyleChangeSet::new()
            .with(StyleProperty::Transition, "none")
            .with(StyleProperty::Left, "1px"),
        50,
    )];
    assert!(matches!(
        animator.sequence(steps, None, None),
        Err(AnimationError::InvalidSteps(_))
    ));
    assert_eq!(doc.style(&el, StyleProperty::Left), "");
}

#[test]
fn cover_image_is_sized_then_revealed() {
    let doc = MemoryDocument::new();
    let img = doc.create_element("img");
    let animator = Animator::new(doc.clone());
    display::hide(&doc, &img);

    let rect = size_fill(100.0, 50.0, 200.0, 200.0);
    animator.apply(&img, &rect.to_changes());
    display::show(&doc, &img);

    assert_eq!(doc.style(&img, StyleProperty::Width), "400px");
    assert_eq!(doc.style(&img, StyleProperty::Left), "-100px");
    assert_eq!(doc.style(&img, StyleProperty::Display), "block");
}
