// SPDX-License-Identifier: MPL-2.0
//! Time-based value animations for the swipe control.
//!
//! Both types are passive: they never schedule anything. Callers sample them
//! with the timestamp of the event being processed, which keeps every
//! animation deterministic under test.

use std::time::{Duration, Instant};

/// A one-shot transition from one value to another over a fixed duration.
#[derive(Debug, Clone, Copy)]
pub struct Timed {
    from: f32,
    to: f32,
    start: Instant,
    duration: Duration,
}

impl Timed {
    /// Starts a transition at `start` that reaches `to` after `duration`.
    #[must_use]
    pub fn new(from: f32, to: f32, start: Instant, duration: Duration) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    /// Samples the animated value at `now`, eased with a cubic in-out curve.
    #[must_use]
    pub fn value(&self, now: Instant) -> f32 {
        let progress = self.progress(now);
        self.from + (self.to - self.from) * ease_in_out(progress)
    }

    /// Returns the target value of the transition.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.to
    }

    /// Whether the transition has run its full duration at `now`.
    #[must_use]
    pub fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }
}

/// A repeating there-and-back sweep between 0 and `amplitude`.
///
/// Used for the idle hint arrow: one full out-and-back cycle per `period`.
#[derive(Debug, Clone, Copy)]
pub struct Oscillation {
    start: Instant,
    period: Duration,
    amplitude: f32,
}

impl Oscillation {
    #[must_use]
    pub fn new(start: Instant, period: Duration, amplitude: f32) -> Self {
        Self {
            start,
            period,
            amplitude,
        }
    }

    /// Samples the oscillation at `now`.
    ///
    /// The wave is triangular: it rises linearly to `amplitude` over the
    /// first half of the period and returns to 0 over the second half.
    #[must_use]
    pub fn value(&self, now: Instant) -> f32 {
        if self.period.is_zero() {
            return 0.0;
        }
        let period = self.period.as_secs_f32();
        let phase = now.saturating_duration_since(self.start).as_secs_f32() % period;
        let half = period / 2.0;
        if phase < half {
            self.amplitude * (phase / half)
        } else {
            self.amplitude * (1.0 - (phase - half) / half)
        }
    }
}

/// Cubic ease-in-out over `t` in `[0, 1]`.
fn ease_in_out(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timed_starts_at_from_and_ends_at_to() {
        let t0 = Instant::now();
        let anim = Timed::new(100.0, 0.0, t0, ms(200));

        assert!((anim.value(t0) - 100.0).abs() < f32::EPSILON);
        assert!((anim.value(t0 + ms(200)) - 0.0).abs() < f32::EPSILON);
        assert!((anim.value(t0 + ms(500)) - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn timed_midpoint_is_halfway_for_symmetric_easing() {
        let t0 = Instant::now();
        let anim = Timed::new(0.0, 400.0, t0, ms(200));

        // Cubic in-out is symmetric around t = 0.5.
        assert!((anim.value(t0 + ms(100)) - 200.0).abs() < 0.01);
    }

    #[test]
    fn timed_finishes_exactly_at_duration() {
        let t0 = Instant::now();
        let anim = Timed::new(0.0, 1.0, t0, ms(200));

        assert!(!anim.is_finished(t0 + ms(199)));
        assert!(anim.is_finished(t0 + ms(200)));
    }

    #[test]
    fn timed_zero_duration_is_immediately_done() {
        let t0 = Instant::now();
        let anim = Timed::new(3.0, 7.0, t0, ms(0));

        assert!(anim.is_finished(t0));
        assert!((anim.value(t0) - 7.0).abs() < f32::EPSILON);
    }

    #[test]
    fn oscillation_peaks_at_half_period() {
        let t0 = Instant::now();
        let wave = Oscillation::new(t0, ms(1000), 10.0);

        assert!((wave.value(t0) - 0.0).abs() < f32::EPSILON);
        assert!((wave.value(t0 + ms(500)) - 10.0).abs() < 0.01);
        assert!((wave.value(t0 + ms(1000)) - 0.0).abs() < 0.01);
    }

    #[test]
    fn oscillation_repeats_across_periods() {
        let t0 = Instant::now();
        let wave = Oscillation::new(t0, ms(1000), 10.0);

        let first = wave.value(t0 + ms(250));
        let later = wave.value(t0 + ms(3250));
        assert!((first - later).abs() < 0.01);
    }
}
