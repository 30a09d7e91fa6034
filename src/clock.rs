//! Fixed-step frame clock
//!
//! Converts variable frame deltas from the platform into a whole number of
//! simulation ticks. Leftover time carries over to the next frame.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
    last_time: Option<f64>,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame delta in seconds; returns how many ticks to run.
    ///
    /// Long frames (tab switches, breakpoints) are clamped and capped at
    /// `MAX_SUBSTEPS` so the game never tries to catch up all at once.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = frame_dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Feed an absolute timestamp in milliseconds (requestAnimationFrame
    /// style). The first frame runs a single tick.
    pub fn advance_to(&mut self, time_ms: f64) -> u32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time_ms);
        self.advance(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_nominal_frame() {
        let mut clock = FixedStep::new();
        let total: u32 = (0..60).map(|_| clock.advance(SIM_DT + 1e-6)).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn test_fast_frames_accumulate() {
        // 120 Hz display: every other frame runs a tick
        let mut clock = FixedStep::new();
        let total: u32 = (0..120).map(|_| clock.advance(1.0 / 120.0 + 1e-6)).sum();
        assert!((59..=60).contains(&total));
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut clock = FixedStep::new();
        // Clamped to MAX_FRAME_DT (about six ticks), then capped
        assert_eq!(clock.advance(5.0), MAX_SUBSTEPS);
        // The backlog beyond one tick is dropped
        assert_eq!(clock.advance(0.0), 1);
        assert_eq!(clock.advance(0.0), 0);
    }

    #[test]
    fn test_frame_below_cap_keeps_remainder() {
        let mut clock = FixedStep::new();
        // Three and a half ticks: three now, the half carries over
        assert_eq!(clock.advance(SIM_DT * 3.5), 3);
        assert_eq!(clock.advance(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_negative_delta_runs_nothing() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance(-1.0), 0);
    }

    #[test]
    fn test_first_timestamp_runs_one_tick() {
        let mut clock = FixedStep::new();
        assert_eq!(clock.advance_to(1234.0), 1);
        assert_eq!(clock.advance_to(1234.0), 0);
    }
}
