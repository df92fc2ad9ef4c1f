//! Single-resolution completion future

use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

#[derive(Default)]
struct Slot {
    value: Option<f64>,
    wakers: Vec<Waker>,
}

/// Resolves with the final settled position of an oscillator
///
/// Cloning yields another handle to the same result. Never fails; an
/// oscillator that does not settle simply never resolves it.
#[derive(Clone, Default)]
pub struct Completion {
    slot: Rc<RefCell<Slot>>,
}

impl Completion {
    pub(crate) fn new() -> (Self, Resolver) {
        let completion = Self::default();
        let resolver = Resolver {
            slot: completion.slot.clone(),
        };
        (completion, resolver)
    }

    /// The resolved value, if any
    pub fn value(&self) -> Option<f64> {
        self.slot.borrow().value
    }

    pub fn is_resolved(&self) -> bool {
        self.slot.borrow().value.is_some()
    }
}

impl Future for Completion {
    type Output = f64;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<f64> {
        let mut slot = self.slot.borrow_mut();
        match slot.value {
            Some(value) => Poll::Ready(value),
            None => {
                if !slot.wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    slot.wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}

impl std::fmt::Debug for Completion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion")
            .field("value", &self.value())
            .finish()
    }
}

/// Write side of a [`Completion`]
pub(crate) struct Resolver {
    slot: Rc<RefCell<Slot>>,
}

impl Resolver {
    /// Resolve once. Later calls are ignored and return false.
    pub(crate) fn resolve(&self, value: f64) -> bool {
        let wakers = {
            let mut slot = self.slot.borrow_mut();
            if let Some(existing) = slot.value {
                tracing::warn!(
                    "completion already resolved with {}, ignoring {}",
                    existing,
                    value
                );
                return false;
            }
            slot.value = Some(value);
            std::mem::take(&mut slot.wakers)
        };

        for waker in wakers {
            waker.wake();
        }
        true
    }
}
