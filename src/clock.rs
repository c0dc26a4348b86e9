//! Time source for the `time` shader uniform.

use std::time::{Duration, Instant};

/// Measures the time elapsed since the first frame asked for it.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    start: Option<Instant>,
}

impl FrameClock {
    /// A clock that starts on its first reading.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed since the first call, which itself returns `0.0`.
    pub fn elapsed_secs(&mut self) -> f32 {
        self.elapsed_at(Instant::now()).as_secs_f32()
    }

    fn elapsed_at(&mut self, now: Instant) -> Duration {
        let start = *self.start.get_or_insert(now);
        now.saturating_duration_since(start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_reading() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now();

        assert_eq!(clock.elapsed_at(t0), Duration::ZERO);
        assert_eq!(
            clock.elapsed_at(t0 + Duration::from_millis(1500)),
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn never_goes_backwards() {
        let mut clock = FrameClock::new();
        let t0 = Instant::now() + Duration::from_secs(1);
        clock.elapsed_at(t0);

        assert_eq!(clock.elapsed_at(t0 - Duration::from_millis(10)), Duration::ZERO);
    }
}
