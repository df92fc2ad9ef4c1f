//! Self-rescheduling spring animation
//!
//! An [`Oscillator`] wraps a [`SpringState`] and drives it from a
//! [`FrameScheduler`]: every frame it integrates one step, hands the sample to
//! the caller, and asks for the next frame until the spring settles.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use sprung_animation::{ManualFrameClock, Oscillator, OscillatorConfig};
//!
//! let clock = Rc::new(ManualFrameClock::new());
//! let oscillator = Oscillator::new(
//!     clock.clone(),
//!     |sample| println!("x={} v={}", sample.position, sample.velocity),
//!     0.0,
//!     50.0,
//!     OscillatorConfig::default(),
//! )
//! .unwrap();
//!
//! let completion = oscillator.completion();
//! let mut now = 0.0;
//! while clock.has_pending_frames() {
//!     clock.advance(now);
//!     now += 16.0;
//! }
//! assert_eq!(completion.value(), Some(50.0));
//! ```
//!
//! # Cancellation
//!
//! [`pause`](Oscillator::pause) only clears the running flag. A frame that was
//! already requested still fires; it then does nothing and requests no
//! further frame.
//!
//! # Non-convergence
//!
//! With both stiffness and damping at zero the spring coasts at constant
//! velocity and never settles. Nothing corrects this; the animation keeps
//! requesting frames until it is paused or dropped.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::completion::{Completion, Resolver};
use crate::config::OscillatorConfig;
use crate::error::Result;
use crate::frame::FrameScheduler;
use crate::spring::{Sample, SpringState, Step};

type SampleCallback = Box<dyn FnMut(Sample)>;

struct Inner {
    state: RefCell<SpringState>,
    running: Cell<bool>,
    frame_pending: Cell<bool>,
    on_sample: RefCell<SampleCallback>,
    completion: Completion,
    resolver: Resolver,
    scheduler: Rc<dyn FrameScheduler>,
}

/// A spring animation in flight
///
/// Handles are cheap to clone and all refer to the same animation. Frames
/// requested on its behalf hold only a weak reference, so dropping every
/// handle stops the animation.
#[derive(Clone)]
pub struct Oscillator {
    inner: Rc<Inner>,
}

impl Oscillator {
    /// Create an oscillator moving from `start` to `target` and request its
    /// first frame.
    ///
    /// Fails without scheduling anything if the configuration is invalid.
    pub fn new<F>(
        scheduler: Rc<dyn FrameScheduler>,
        on_sample: F,
        start: f64,
        target: f64,
        config: OscillatorConfig,
    ) -> Result<Self>
    where
        F: FnMut(Sample) + 'static,
    {
        let state = SpringState::new(start, target, config)?;
        let (completion, resolver) = Completion::new();

        let oscillator = Self {
            inner: Rc::new(Inner {
                state: RefCell::new(state),
                running: Cell::new(false),
                frame_pending: Cell::new(false),
                on_sample: RefCell::new(Box::new(on_sample)),
                completion,
                resolver,
                scheduler,
            }),
        };

        tracing::debug!(
            "oscillator {} -> {} (k={}, d={}, m={})",
            start,
            target,
            config.stiffness,
            config.damping,
            config.mass
        );
        oscillator.start();
        Ok(oscillator)
    }

    /// Future resolving with the target position once the spring settles
    pub fn completion(&self) -> Completion {
        self.inner.completion.clone()
    }

    /// Enable ticking and request a frame if none is outstanding.
    ///
    /// Calling this while already running changes nothing. A settled
    /// oscillator stays settled.
    pub fn start(&self) {
        if self.inner.state.borrow().is_settled() {
            tracing::debug!("start ignored: oscillator already settled");
            return;
        }

        self.inner.running.set(true);
        if !self.inner.frame_pending.get() {
            request_frame(&self.inner);
        }
    }

    /// Stop advancing. An already requested frame becomes a no-op.
    pub fn pause(&self) {
        if self.inner.running.replace(false) {
            tracing::debug!("oscillator paused at {}", self.position());
        }
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }

    pub fn is_settled(&self) -> bool {
        self.inner.state.borrow().is_settled()
    }

    pub fn position(&self) -> f64 {
        self.inner.state.borrow().position()
    }

    pub fn velocity(&self) -> f64 {
        self.inner.state.borrow().velocity()
    }

    pub fn initial_position(&self) -> f64 {
        self.inner.state.borrow().initial_position()
    }

    pub fn target(&self) -> f64 {
        self.inner.state.borrow().target()
    }

    /// Net force from the most recent frame
    pub fn total_force(&self) -> Option<f64> {
        self.inner.state.borrow().total_force()
    }

    pub fn config(&self) -> OscillatorConfig {
        *self.inner.state.borrow().config()
    }

    /// Current position and velocity
    pub fn sample(&self) -> Sample {
        self.inner.state.borrow().sample()
    }
}

impl std::fmt::Debug for Oscillator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Oscillator")
            .field("state", &*self.inner.state.borrow())
            .field("running", &self.inner.running.get())
            .field("frame_pending", &self.inner.frame_pending.get())
            .finish()
    }
}

fn request_frame(inner: &Rc<Inner>) {
    inner.frame_pending.set(true);
    let weak: Weak<Inner> = Rc::downgrade(inner);
    inner.scheduler.request_frame(Box::new(move |now_ms| {
        if let Some(inner) = weak.upgrade() {
            tick(&inner, now_ms);
        }
    }));
}

fn tick(inner: &Rc<Inner>, now_ms: f64) {
    inner.frame_pending.set(false);
    if !inner.running.get() {
        tracing::trace!("frame at {}ms skipped: oscillator paused", now_ms);
        return;
    }

    let step = inner.state.borrow_mut().step(now_ms);
    let Some(step) = step else {
        inner.running.set(false);
        return;
    };

    // No state borrow is held here, so the callback may pause or restart.
    (inner.on_sample.borrow_mut())(step.sample());

    match step {
        Step::Settled { settled, .. } => {
            (inner.on_sample.borrow_mut())(settled);
            inner.running.set(false);
            tracing::debug!("oscillator settled at {}", settled.position);
            inner.resolver.resolve(settled.position);
        }
        Step::Moving(_) => {
            if inner.running.get() && !inner.frame_pending.get() {
                request_frame(inner);
            }
        }
    }
}
