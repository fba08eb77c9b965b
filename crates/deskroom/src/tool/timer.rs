use std::time::Instant;

/// Measures the time between consecutive frames.
pub struct FrameTimer {
    last_frame: Option<Instant>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self { last_frame: None }
    }

    /// Seconds elapsed since the previous tick. The first tick returns zero.
    pub fn tick(&mut self, now: Instant) -> f32 {
        let delta_time = self
            .last_frame
            .map_or(0.0, |last_frame| now.saturating_duration_since(last_frame).as_secs_f32());
        self.last_frame = Some(now);
        delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_tick_is_zero() {
        let mut timer = FrameTimer::new();
        assert_eq!(timer.tick(Instant::now()), 0.0);
    }

    #[test]
    fn ticks_measure_elapsed_time() {
        let mut timer = FrameTimer::new();
        let start = Instant::now();
        timer.tick(start);
        let dt = timer.tick(start + Duration::from_millis(250));
        assert!((dt - 0.25).abs() < 1e-6);
    }

    #[test]
    fn time_going_backwards_is_zero() {
        let mut timer = FrameTimer::new();
        let start = Instant::now() + Duration::from_secs(1);
        timer.tick(start);
        assert_eq!(timer.tick(start - Duration::from_millis(10)), 0.0);
    }
}
