//! Wall-clock timing for the simulator.
//!
//! These use `std::time` which is not available in `no_std` environments, so
//! they live here rather than in the common crate.

use std::time::{Duration, Instant};

use klk_common::animation::TRANSITION_PERIOD_MS;

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Length of one star transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(TRANSITION_PERIOD_MS as u64);

/// One playback of the star transition, measured against the wall clock.
#[derive(Clone, Copy, Debug)]
pub struct Playback {
    started: Instant,
}

impl Playback {
    pub fn start() -> Self { Self::started_at(Instant::now()) }

    pub const fn started_at(started: Instant) -> Self { Self { started } }

    /// Progress in `0.0..=1.0` at `now`.
    pub fn progress_at(
        &self,
        now: Instant,
    ) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        (elapsed.as_secs_f32() / TRANSITION_DURATION.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished_at(
        &self,
        now: Instant,
    ) -> bool {
        now.saturating_duration_since(self.started) >= TRANSITION_DURATION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_linear_and_clamped() {
        let t0 = Instant::now();
        let playback = Playback::started_at(t0);
        assert_eq!(playback.progress_at(t0), 0.0);
        let quarter = playback.progress_at(t0 + Duration::from_millis(400));
        assert!((quarter - 0.25).abs() < 1e-4, "400 ms is a quarter of the run");
        assert_eq!(playback.progress_at(t0 + Duration::from_secs(5)), 1.0);
    }

    #[test]
    fn test_finished_after_full_duration() {
        let t0 = Instant::now();
        let playback = Playback::started_at(t0);
        assert!(!playback.is_finished_at(t0 + Duration::from_millis(1599)));
        assert!(playback.is_finished_at(t0 + TRANSITION_DURATION));
    }
}
