//! Frame driver
//!
//! Plays the role of the display: delivers frames to a [`ManualFrameClock`]
//! until nothing asks for another one.

use sprung_animation::ManualFrameClock;
use std::time::Duration;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Frame pacing
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FramePacing {
    pub fps: u32,
    pub max_frames: u64,
    /// Sleep between frames and stamp them with wall-clock time
    pub realtime: bool,
}

impl FramePacing {
    /// Milliseconds between frames
    pub fn interval_ms(&self) -> f64 {
        1000.0 / self.fps.max(1) as f64
    }
}

/// Deliver frames until the clock has nothing pending or the frame limit is
/// hit. Returns the number of frames delivered.
pub async fn drive(clock: &ManualFrameClock, pacing: FramePacing) -> u64 {
    let step_ms = pacing.interval_ms();
    let mut ticker = pacing.realtime.then(|| {
        let mut ticker = time::interval(Duration::from_secs_f64(step_ms / 1000.0));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker
    });
    let started = Instant::now();

    let mut frames = 0;
    while clock.has_pending_frames() && frames < pacing.max_frames {
        let now_ms = match ticker.as_mut() {
            Some(ticker) => {
                ticker.tick().await;
                started.elapsed().as_secs_f64() * 1000.0
            }
            None => frames as f64 * step_ms,
        };
        clock.advance(now_ms);
        frames += 1;
    }

    tracing::debug!("delivered {} frames", frames);
    frames
}

#[cfg(test)]
mod tests {
    use super::*;
    use sprung_animation::{Oscillator, OscillatorConfig};
    use std::rc::Rc;

    fn simulated(max_frames: u64) -> FramePacing {
        FramePacing {
            fps: 60,
            max_frames,
            realtime: false,
        }
    }

    #[test]
    fn test_interval() {
        assert_eq!(simulated(1).interval_ms(), 1000.0 / 60.0);
        let zero = FramePacing {
            fps: 0,
            ..simulated(1)
        };
        assert_eq!(zero.interval_ms(), 1000.0);
    }

    #[tokio::test]
    async fn test_drives_oscillator_to_rest() {
        let clock = Rc::new(ManualFrameClock::new());
        let oscillator =
            Oscillator::new(clock.clone(), |_| {}, 0.0, 200.0, OscillatorConfig::default())
                .unwrap();

        let frames = drive(&clock, simulated(10_000)).await;

        assert!(frames < 10_000);
        assert_eq!(oscillator.completion().await, 200.0);
    }

    #[tokio::test]
    async fn test_stops_at_frame_limit() {
        let clock = Rc::new(ManualFrameClock::new());
        let oscillator =
            Oscillator::new(clock.clone(), |_| {}, 0.0, 1.0, OscillatorConfig::new(0.0, 0.0))
                .unwrap();

        let frames = drive(&clock, simulated(50)).await;

        assert_eq!(frames, 50);
        assert!(oscillator.is_running());
        assert!(!oscillator.completion().is_resolved());
    }
}
