//! Damped spring integrator
//!
//! Hooke's law plus linear damping, integrated one display frame at a time:
//!
//! ```text
//! fs = -k * (x - xf)
//! fd = -d * v
//! a  = (fs + fd) / m
//! v += a * t
//! x += v * t
//! ```
//!
//! `t` is the time since the first frame of the run, rounded to four
//! significant digits. The simulation is sensitive to the size of `t`, so
//! the rounding changes the trajectory and must be kept.
//!
//! The run settles once the net force stays below `precision` on two
//! consecutive frames. A single small reading is not enough: a fast spring
//! passes through near-zero net force mid-swing while still far from rest.
//! Two readings is a debounce heuristic, not a stability criterion.

use crate::config::OscillatorConfig;
use crate::error::{OscillatorError, Result};

/// Significant digits kept in the per-frame time step
const ELAPSED_SIGNIFICANT_DIGITS: i32 = 4;

/// One position/velocity reading delivered to the sample callback
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    pub position: f64,
    pub velocity: f64,
}

/// Result of integrating one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    /// The spring is still moving
    Moving(Sample),
    /// The spring came to rest on this frame.
    ///
    /// `sample` is the integrated reading; `settled` is the same reading with
    /// the position snapped exactly onto the target.
    Settled { sample: Sample, settled: Sample },
}

impl Step {
    /// The integrated (unsnapped) reading for this frame
    pub fn sample(&self) -> Sample {
        match self {
            Step::Moving(sample) => *sample,
            Step::Settled { sample, .. } => *sample,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Step::Settled { .. })
    }
}

/// Physical state of a single one-dimensional spring
#[derive(Clone, Debug)]
pub struct SpringState {
    config: OscillatorConfig,
    position: f64,
    initial_position: f64,
    target: f64,
    velocity: f64,
    /// Net force from the previous frame, `None` before the first frame
    total_force: Option<f64>,
    /// Seconds, captured on the first frame
    start_time: Option<f64>,
    settled: bool,
}

impl SpringState {
    /// Create a spring at `start` heading for `target`
    pub fn new(start: f64, target: f64, config: OscillatorConfig) -> Result<Self> {
        if !start.is_finite() {
            return Err(OscillatorError::NonFinite {
                field: "start position",
                value: start,
            });
        }
        if !target.is_finite() {
            return Err(OscillatorError::NonFinite {
                field: "target position",
                value: target,
            });
        }
        config.validate()?;

        Ok(Self {
            config,
            position: start,
            initial_position: start,
            target,
            velocity: config.velocity,
            total_force: None,
            start_time: None,
            settled: false,
        })
    }

    pub fn config(&self) -> &OscillatorConfig {
        &self.config
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Where the run started; never changes
    pub fn initial_position(&self) -> f64 {
        self.initial_position
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    /// Net force computed on the last frame
    pub fn total_force(&self) -> Option<f64> {
        self.total_force
    }

    /// Time of the first frame in seconds, once it has happened
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Current reading without advancing
    pub fn sample(&self) -> Sample {
        Sample {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Integrate one frame at host timestamp `now_ms` (milliseconds).
    ///
    /// Returns `None` once the spring has settled.
    pub fn step(&mut self, now_ms: f64) -> Option<Step> {
        if self.settled {
            return None;
        }

        let now = now_ms / 1000.0;
        let start_time = *self.start_time.get_or_insert(now);
        let t = round_significant(now - start_time, ELAPSED_SIGNIFICANT_DIGITS);

        let dx = self.position - self.target;
        let fs = -self.config.stiffness * dx;
        let fd = -self.config.damping * self.velocity;

        let precision = self.config.precision;
        let was_small = self.total_force.is_some_and(|f| f.abs() < precision);

        let ft = fs + fd;
        self.total_force = Some(ft);

        let a = ft / self.config.mass;
        self.velocity += a * t;
        self.position += self.velocity * t;

        let sample = self.sample();
        tracing::trace!(
            "spring step t={} x={} v={} ft={}",
            t,
            sample.position,
            sample.velocity,
            ft
        );

        // With no forces at all the net force is always zero and carries no
        // information about rest.
        let is_small = ft.abs() < precision && !self.config.is_degenerate();

        if was_small && is_small {
            self.settled = true;
            return Some(Step::Settled {
                sample,
                settled: Sample {
                    position: self.target,
                    velocity: self.velocity,
                },
            });
        }

        Some(Step::Moving(sample))
    }
}

/// Round `value` to `digits` significant decimal digits
pub(crate) fn round_significant(value: f64, digits: i32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let scale = 10f64.powi(digits - 1 - magnitude);
    (value * scale).round() / scale
}
