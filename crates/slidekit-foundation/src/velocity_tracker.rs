//! Velocity tracking for drag release.
//!
//! Impulse strategy, as in Jetpack Compose's `VelocityTracker1D`: the
//! velocity is derived from the kinetic energy the recent motion imparted,
//! which is less noisy than a plain last-two-points slope.

use smallvec::SmallVec;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute.
const HORIZON_MS: i64 = 100;

/// A gap longer than this between consecutive samples means the pointer
/// stopped; older samples are ignored.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Tracks one axis of absolute positions over time.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    history: [Option<Sample>; HISTORY_SIZE],
    head: usize,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `position` observed at `time_ms`.
    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.head = (self.head + 1) % HISTORY_SIZE;
        self.history[self.head] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second, or 0.0 with fewer than two usable
    /// samples.
    pub fn velocity(&self) -> f32 {
        let samples = self.recent_samples();
        if samples.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&samples) * 1000.0
    }

    /// Like [`velocity`](Self::velocity), clamped to `±max_velocity`.
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Samples newest first, cut at the horizon or at the first stop.
    fn recent_samples(&self) -> SmallVec<[Sample; HISTORY_SIZE]> {
        let mut samples = SmallVec::new();
        let Some(newest) = self.history[self.head] else {
            return samples;
        };

        let mut newer = newest;
        let mut index = self.head;
        while let Some(sample) = self.history[index] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (newer.time_ms - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            samples.push(sample);
            if samples.len() == HISTORY_SIZE {
                break;
            }
            newer = sample;
            index = (index + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }
        samples
    }
}

/// Units per millisecond from samples ordered newest first.
fn impulse_velocity(samples: &[Sample]) -> f32 {
    let mut work = 0.0f32;
    // Oldest pair first.
    for (step, pair) in samples.windows(2).rev().enumerate() {
        let (newer, older) = (pair[0], pair[1]);
        let dt = (newer.time_ms - older.time_ms) as f32;
        if dt == 0.0 {
            continue;
        }
        let v_curr = (newer.position - older.position) / dt;
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if step == 0 {
            work *= 0.5;
        }
    }
    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_sample_report_zero() {
        let mut tracker = VelocityTracker1D::new();
        assert_eq!(tracker.velocity(), 0.0);
        tracker.add_position(0, 100.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn two_samples_give_their_slope() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(10, -20.0);
        assert!((tracker.velocity() + 2_000.0).abs() < 1.0);
    }

    #[test]
    fn constant_velocity_is_recovered() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..6 {
            tracker.add_position(step * 10, step as f32 * 100.0);
        }
        let velocity = tracker.velocity();
        assert!(
            (velocity - 10_000.0).abs() < 1_000.0,
            "expected ~10000, got {velocity}"
        );
    }

    #[test]
    fn slow_drag_stays_slow() {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..=10 {
            tracker.add_position(step * 20, -(step as f32));
        }
        let velocity = tracker.velocity();
        assert!((velocity + 50.0).abs() < 10.0, "expected ~-50, got {velocity}");
    }

    #[test]
    fn pause_before_release_zeroes_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(10, -30.0);
        tracker.add_position(20, -50.0);
        tracker.add_position(20 + ASSUME_STOPPED_MS + 1, -50.0);
        assert_eq!(tracker.velocity(), 0.0);
    }

    #[test]
    fn samples_beyond_horizon_are_ignored() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_position(0, 5_000.0);
        for step in 0..5 {
            tracker.add_position(150 + step * 10, step as f32 * 10.0);
        }
        let velocity = tracker.velocity();
        assert!((velocity - 1_000.0).abs() < 100.0, "got {velocity}");
    }

    #[test]
    fn velocity_is_capped_both_ways() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_position(0, 0.0);
        tracker.add_position(1, 10_000.0);
        assert_eq!(tracker.velocity_capped(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_position(0, 10_000.0);
        tracker.add_position(1, 0.0);
        assert_eq!(tracker.velocity_capped(8_000.0), -8_000.0);
        assert_eq!(tracker.velocity_capped(f32::NAN), 0.0);
    }
}
