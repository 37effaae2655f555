use std::time::Duration;

/// A fixed number of forced redraws spaced by a constant interval. The first
/// redraw fires one interval after the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Jitter {
    remaining: usize,
    interval: Duration,
    elapsed: Duration,
}

impl Jitter {
    pub fn new(iterations: usize, interval: Duration) -> Self {
        Self {
            remaining: iterations,
            interval,
            elapsed: Duration::ZERO,
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Advances the timer and returns how many redraws came due.
    pub fn advance(&mut self, dt: Duration) -> usize {
        if self.is_finished() {
            return 0;
        }
        if self.interval.is_zero() {
            return std::mem::take(&mut self.remaining);
        }

        self.elapsed += dt;
        let mut due = 0;
        while self.remaining > 0 && self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            self.remaining -= 1;
            due += 1;
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_interval() {
        let mut jitter = Jitter::new(3, Duration::from_millis(250));
        assert_eq!(jitter.advance(Duration::from_millis(100)), 0);
        assert_eq!(jitter.advance(Duration::from_millis(200)), 1);
        assert_eq!(jitter.advance(Duration::from_millis(500)), 2);
        assert!(jitter.is_finished());
        assert_eq!(jitter.advance(Duration::from_secs(5)), 0);
    }

    #[test]
    fn zero_interval_fires_everything_at_once() {
        let mut jitter = Jitter::new(4, Duration::ZERO);
        assert_eq!(jitter.advance(Duration::ZERO), 4);
        assert!(jitter.is_finished());
    }
}
