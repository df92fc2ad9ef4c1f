//! Sprung Animation Core
//!
//! A one-dimensional damped spring, stepped once per display frame.
//!
//! # Features
//!
//! - **Spring Physics**: Hooke's law plus linear damping, Euler-integrated per frame
//! - **Frame Driven**: Animations request one frame at a time from a [`FrameScheduler`]
//! - **Settlement**: Two consecutive sub-threshold force readings end the run,
//!   snapping exactly onto the target
//! - **Completion Future**: Await the settled position or poll it

pub mod completion;
pub mod config;
pub mod error;
pub mod frame;
pub mod oscillator;
pub mod spring;

pub use completion::Completion;
pub use config::OscillatorConfig;
pub use error::{OscillatorError, Result};
pub use frame::{FrameCallback, FrameScheduler, ManualFrameClock};
pub use oscillator::Oscillator;
pub use spring::{Sample, SpringState, Step};
