//! Velocity tracking for release-time flick detection.
//!
//! Impulse-strategy 1-D tracker: velocity is derived from the kinetic energy
//! imparted by the recent pointer samples, which is robust against the jitter
//! a plain two-sample difference would amplify.

use swipedeck_graphics::Point;

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within the last 100ms contribute to the velocity.
const HORIZON_MS: i64 = 100;

/// If no movement for this duration, assume the pointer has stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Default)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// 1-D impulse-strategy velocity tracker over absolute positions.
#[derive(Clone)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Records the pointer position along this axis at the given time.
    pub fn add_sample(&mut self, time_ms: i64, position: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, position });
    }

    /// Velocity in units/second. Zero without at least two recent samples.
    pub fn calculate_velocity(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut sample_count = 0;

        let newest = match self.samples[self.index] {
            Some(sample) => sample,
            None => return 0.0,
        };

        let mut current_index = self.index;
        while let Some(sample) = self.samples[current_index] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            if age > HORIZON_MS as f32 {
                break;
            }
            // A long still gap means the pointer rested before this sample;
            // older history is no longer predictive.
            if sample_count > 0 {
                let gap = age + times[sample_count - 1];
                if gap > ASSUME_STOPPED_MS as f32 {
                    break;
                }
            }

            positions[sample_count] = sample.position;
            times[sample_count] = -age;

            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };

            sample_count += 1;
            if sample_count >= HISTORY_SIZE {
                break;
            }
        }

        if sample_count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions, &times, sample_count) * 1000.0
    }

    /// Velocity in units/second, clamped to `max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }

        let velocity = self.calculate_velocity();
        if velocity == 0.0 || velocity.is_nan() {
            return 0.0;
        }

        velocity.clamp(-max_velocity, max_velocity)
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// Impulse velocity: accumulate the work each inter-sample movement does on a
/// unit mass, then convert the kinetic energy back to a signed speed.
fn impulse_velocity(positions: &[f32; HISTORY_SIZE], times: &[f32; HISTORY_SIZE], sample_count: usize) -> f32 {
    if sample_count < 2 {
        return 0.0;
    }

    let mut work = 0.0f32;
    let start = sample_count - 1;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let delta = positions[i] - positions[i - 1];
        let v_curr = delta / (current_time - next_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1, sign-preserving.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}

/// Paired trackers for a 2-D drag.
#[derive(Clone, Default)]
pub struct VelocityTracker2D {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker2D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&mut self, time_ms: i64, position: Point) {
        self.x.add_sample(time_ms, position.x);
        self.y.add_sample(time_ms, position.y);
    }

    /// Per-axis velocities in units/second, each clamped to `max_velocity`.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> Point {
        Point::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}
