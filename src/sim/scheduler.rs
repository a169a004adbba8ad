//! Fixed-interval update scheduling
//!
//! Decouples automaton evolution from display refresh. The scheduler
//! accumulates frame deltas and fires at most one step per frame once the
//! accumulator reaches the update interval.

/// Accumulator-based step scheduler.
///
/// The accumulator resets to zero when a step fires, not to the remainder:
/// time beyond one interval is discarded rather than carried forward, so a
/// display slower than the interval runs exactly one step per frame and never
/// drains a backlog. This throttle is intentional; do not convert it into a
/// catch-up loop.
pub struct UpdateScheduler {
    interval: f32,
    accumulator: f32,
}

impl UpdateScheduler {
    /// Creates a scheduler that fires once per `interval` seconds of
    /// accumulated frame time.
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Adds `delta` seconds of elapsed time; invokes `step` exactly once if
    /// the accumulator has reached the interval, then resets it to zero.
    pub fn on_frame(&mut self, delta: f32, step: impl FnOnce()) {
        self.accumulator += delta;

        if self.accumulator >= self.interval {
            step();
            self.accumulator = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_steps(scheduler: &mut UpdateScheduler, deltas: &[f32]) -> u32 {
        let mut steps = 0;
        for &delta in deltas {
            scheduler.on_frame(delta, || steps += 1);
        }
        steps
    }

    #[test]
    fn sub_interval_frames_never_step() {
        let mut scheduler = UpdateScheduler::new(0.016);
        assert_eq!(count_steps(&mut scheduler, &[0.005, 0.005, 0.005]), 0);
    }

    #[test]
    fn crossing_the_interval_steps_exactly_once() {
        let mut scheduler = UpdateScheduler::new(0.016);
        assert_eq!(count_steps(&mut scheduler, &[0.005, 0.005, 0.007]), 1);
    }

    #[test]
    fn reaching_the_interval_exactly_steps() {
        let mut scheduler = UpdateScheduler::new(0.016);
        assert_eq!(count_steps(&mut scheduler, &[0.016]), 1);
    }

    #[test]
    fn accumulator_resets_to_zero_not_remainder() {
        let mut scheduler = UpdateScheduler::new(0.016);
        // One huge frame collapses all pending intervals into a single step,
        // and the surplus does not shorten the next cycle.
        assert_eq!(count_steps(&mut scheduler, &[0.100]), 1);
        assert_eq!(count_steps(&mut scheduler, &[0.010]), 0);
        assert_eq!(count_steps(&mut scheduler, &[0.006]), 1);
    }

    #[test]
    fn steady_cadence_steps_every_interval() {
        let mut scheduler = UpdateScheduler::new(0.016);
        let frames = [0.016; 10];
        assert_eq!(count_steps(&mut scheduler, &frames), 10);
    }
}
