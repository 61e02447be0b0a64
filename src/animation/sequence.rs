//! Ordered multi-step transitions.
//!
//! A sequence keeps its steps in a queue. The head step runs as a single
//! transition; when its completion is confirmed the head is removed, the
//! step callback runs and the next head starts. Steps are started from a
//! drain loop rather than from inside the previous step's completion, so a
//! host that completes synchronously cannot grow the call stack.

use super::watcher::Completion;
use super::{AnimationError, Animator, StepViolation};
use crate::core::{
    CompletionCause, SequenceHistory, SequenceState, StepRecord, StyleChangeSet, StyleProperty,
};
use crate::host::Host;
use chrono::Utc;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

/// Runs once after the last step of a sequence completes.
pub type SequenceCallback = Box<dyn FnOnce()>;

/// Runs after each step with `(element, step_index, total_steps)`.
pub type StepCallback<E> = Box<dyn FnMut(&E, usize, usize)>;

/// Wrap a closure as an optional end-of-sequence callback.
pub fn on_finish<F>(f: F) -> Option<SequenceCallback>
where
    F: FnOnce() + 'static,
{
    Some(Box::new(f))
}

/// Wrap a closure as an optional per-step callback.
///
/// ```rust
/// use segue::animation::on_step;
/// use segue::host::ElementId;
///
/// let callback = on_step(|el: &ElementId, index, total| {
///     println!("{el:?}: step {} of {total}", index + 1);
/// });
/// assert!(callback.is_some());
/// ```
pub fn on_step<E, F>(f: F) -> Option<StepCallback<E>>
where
    F: FnMut(&E, usize, usize) + 'static,
{
    Some(Box::new(f))
}

/// One transition of a sequence: an element, its target styles and the
/// duration.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionStep<E> {
    element: E,
    changes: StyleChangeSet,
    duration_ms: u64,
}

impl<E> TransitionStep<E> {
    pub fn new(element: E, changes: StyleChangeSet, duration_ms: u64) -> Self {
        Self {
            element,
            changes,
            duration_ms,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn changes(&self) -> &StyleChangeSet {
        &self.changes
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }
}

/// Check every step up front, reporting all violations together.
///
/// A step must change at least one property and must not set the
/// transition declaration itself.
pub fn validate_steps<E>(steps: &[TransitionStep<E>]) -> Result<(), AnimationError> {
    let mut checks: Vec<Validation<(), NonEmptyVec<StepViolation>>> = Vec::new();

    for (index, step) in steps.iter().enumerate() {
        let check = if step.changes.is_empty() {
            Validation::fail(StepViolation::EmptyChangeSet { index })
        } else {
            Validation::success(())
        };
        checks.push(check);

        let check = if step.changes.contains(StyleProperty::Transition) {
            Validation::fail(StepViolation::ReservedProperty { index })
        } else {
            Validation::success(())
        };
        checks.push(check);
    }

    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => Err(AnimationError::InvalidSteps(
            errors.iter().cloned().collect(),
        )),
    }
}

#[derive(Debug)]
struct Progress {
    id: Uuid,
    state: SequenceState,
    history: SequenceHistory,
    failure: Option<AnimationError>,
}

/// Observer for a running sequence.
///
/// Cloning yields another view of the same run.
#[derive(Clone, Debug)]
pub struct SequenceHandle {
    progress: Rc<RefCell<Progress>>,
}

impl SequenceHandle {
    /// Identifier of this run, unique per call.
    pub fn id(&self) -> Uuid {
        self.progress.borrow().id
    }

    pub fn state(&self) -> SequenceState {
        self.progress.borrow().state
    }

    pub fn is_done(&self) -> bool {
        self.state().is_final()
    }

    /// Steps completed so far.
    pub fn history(&self) -> SequenceHistory {
        self.progress.borrow().history.clone()
    }

    /// Why the sequence stopped early, if it did.
    ///
    /// A step can fail to start when another watcher is still pending on its
    /// element. The sequence halts there and the end-of-sequence callback
    /// never runs.
    pub fn failure(&self) -> Option<AnimationError> {
        self.progress.borrow().failure.clone()
    }
}

struct Driver<H: Host> {
    animator: Animator<H>,
    queue: VecDeque<(usize, TransitionStep<H::Element>)>,
    total: usize,
    on_step: Option<StepCallback<H::Element>>,
    on_done: Option<SequenceCallback>,
    /// The head step may be started.
    ready: bool,
    draining: bool,
    progress: Rc<RefCell<Progress>>,
}

type Shared<H> = Rc<RefCell<Driver<H>>>;

impl<H: Host> Animator<H> {
    /// Run `steps` one after another.
    ///
    /// After each step completes, `on_step` receives the step's element, its
    /// zero-based index and the number of steps. After the last step,
    /// `on_complete` runs once. Only the last step clears its transition
    /// declaration; earlier steps leave it for the next step to replace.
    ///
    /// Steps are validated before anything is written. The first step is
    /// started before this returns.
    pub fn sequence(
        &self,
        steps: Vec<TransitionStep<H::Element>>,
        on_complete: Option<SequenceCallback>,
        on_step: Option<StepCallback<H::Element>>,
    ) -> Result<SequenceHandle, AnimationError> {
        let Some(first) = steps.first() else {
            return Err(AnimationError::EmptySequence);
        };
        validate_steps(&steps)?;
        self.ensure_idle(first.element())?;

        let total = steps.len();
        let progress = Rc::new(RefCell::new(Progress {
            id: Uuid::new_v4(),
            state: SequenceState::start(total),
            history: SequenceHistory::new(),
            failure: None,
        }));
        let handle = SequenceHandle {
            progress: Rc::clone(&progress),
        };
        log::debug!("sequence {} starting with {total} steps", handle.id());

        let driver: Shared<H> = Rc::new(RefCell::new(Driver {
            animator: self.clone(),
            queue: steps.into_iter().enumerate().collect(),
            total,
            on_step,
            on_done: on_complete,
            ready: true,
            draining: false,
            progress,
        }));
        drain(&driver);
        Ok(handle)
    }
}

/// Start queued steps while the head is ready. Re-entrant calls return
/// immediately and leave the work to the outer loop.
fn drain<H: Host>(driver: &Shared<H>) {
    {
        let mut d = driver.borrow_mut();
        if d.draining {
            return;
        }
        d.draining = true;
    }

    loop {
        let next = {
            let mut d = driver.borrow_mut();
            if !d.ready {
                break;
            }
            d.ready = false;
            let head = d
                .queue
                .front()
                .map(|(index, step)| (*index, step.clone(), d.total, d.animator.clone()));
            head
        };
        let Some((index, step, total, animator)) = next else {
            break;
        };

        let completion: Completion<H::Element> = {
            let driver = Rc::clone(driver);
            Box::new(move |element, cause| step_completed(&driver, element, cause))
        };
        let strip = index + 1 == total;
        if let Err(err) = animator.run_transition(
            step.element(),
            step.changes(),
            step.duration_ms(),
            Some(completion),
            strip,
        ) {
            let d = driver.borrow();
            let mut progress = d.progress.borrow_mut();
            log::warn!("sequence {} halted at step {index}: {err}", progress.id);
            progress.failure = Some(err);
            break;
        }
    }

    driver.borrow_mut().draining = false;
}

fn step_completed<H: Host>(driver: &Shared<H>, element: &H::Element, cause: CompletionCause) {
    let (index, total, finished) = {
        let mut d = driver.borrow_mut();
        let Some((index, step)) = d.queue.pop_front() else {
            return;
        };
        let total = d.total;
        let mut progress = d.progress.borrow_mut();
        progress.state = progress.state.advance();
        progress.history = progress.history.record(StepRecord {
            index,
            total,
            duration_ms: step.duration_ms(),
            cause,
            completed_at: Utc::now(),
        });
        log::debug!("sequence {} step {index}/{total} complete", progress.id);
        let finished = progress.state.is_final();
        (index, total, finished)
    };

    let callback = driver.borrow_mut().on_step.take();
    if let Some(mut callback) = callback {
        callback(element, index, total);
        driver.borrow_mut().on_step = Some(callback);
    }

    if finished {
        let on_done = driver.borrow_mut().on_done.take();
        if let Some(on_done) = on_done {
            on_done();
        }
    } else {
        driver.borrow_mut().ready = true;
        drain(driver);
    }
}
