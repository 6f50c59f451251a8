use serde::{Deserialize, Serialize};

use crate::animation::values::Interpolatable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationMode {
    #[default]
    Linear,
    Step,
    CubicSpline,
}

/// The two keys surrounding a sample time and the blend weight between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyframeBracket {
    pub lower: usize,
    pub upper: usize,
    /// `(t - t_lower) / (t_upper - t_lower)`, clamped to `[0, 1]`
    pub weight: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyframeTrack<T: Interpolatable> {
    /// Ascending key times in seconds.
    pub times: Vec<f32>,
    /// One value per key; for CubicSpline, `[in_tangent, value, out_tangent]`
    /// per key (length `times.len() * 3`).
    pub values: Vec<T>,
    #[serde(default)]
    pub interpolation: InterpolationMode,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    #[must_use]
    pub fn new(times: Vec<f32>, values: Vec<T>, interpolation: InterpolationMode) -> Self {
        Self {
            times,
            values,
            interpolation,
        }
    }

    #[must_use]
    pub fn linear(times: Vec<f32>, values: Vec<T>) -> Self {
        Self::new(times, values, InterpolationMode::Linear)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Length of one playback cycle: the last key time.
    #[must_use]
    pub fn cycle_length(&self) -> f64 {
        self.times.last().copied().map_or(0.0, f64::from)
    }

    /// Wraps `elapsed` into `[0, cycle_length)` with a floor modulo.
    ///
    /// A track with a zero-length cycle always samples at time zero.
    #[must_use]
    pub fn reduce_time(&self, elapsed: f64) -> f64 {
        let cycle = self.cycle_length();
        if cycle <= 0.0 {
            return 0.0;
        }
        elapsed - (elapsed / cycle).floor() * cycle
    }

    /// Finds the keys around `time`.
    ///
    /// Binary search for the first key time not less than `time`; the lower
    /// key is the one before it (never below 0) and the upper key follows the
    /// lower one (never past the last key). Coincident keys give weight 0.
    /// Returns None for an empty track.
    #[must_use]
    pub fn bracket(&self, time: f64) -> Option<KeyframeBracket> {
        let last = self.times.len().checked_sub(1)?;

        let found = self.times.partition_point(|&t| f64::from(t) < time);
        let lower = found.saturating_sub(1).min(last);
        let upper = (lower + 1).min(last);

        let t0 = f64::from(self.times[lower]);
        let t1 = f64::from(self.times[upper]);
        let dt = t1 - t0;
        let weight = if dt > 0.0 {
            ((time - t0) / dt).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Some(KeyframeBracket {
            lower,
            upper,
            weight: weight as f32,
        })
    }

    /// Number of stored values this track needs for its key count.
    fn required_values(&self) -> usize {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.times.len() * 3,
            _ => self.times.len(),
        }
    }

    /// Helper method: unified value accessor.
    /// For Linear/Step, the index is used directly.
    /// For CubicSpline, the value is at index * 3 + 1.
    fn get_value_at(&self, index: usize) -> T {
        match self.interpolation {
            InterpolationMode::CubicSpline => self.values[index * 3 + 1],
            _ => self.values[index],
        }
    }

    /// Samples the track at `time` (already reduced into the cycle).
    ///
    /// Returns None for an empty track or one with fewer values than keys.
    #[must_use]
    pub fn sample(&self, time: f64) -> Option<T> {
        if self.values.len() < self.required_values() {
            return None;
        }
        let KeyframeBracket { lower, upper, weight } = self.bracket(time)?;

        if lower == upper {
            return Some(self.get_value_at(lower));
        }

        Some(match self.interpolation {
            InterpolationMode::Step => {
                // A sample exactly on the upper key belongs to that key
                if weight >= 1.0 {
                    self.get_value_at(upper)
                } else {
                    self.get_value_at(lower)
                }
            }
            InterpolationMode::Linear => {
                T::interpolate_linear(self.get_value_at(lower), self.get_value_at(upper), weight)
            }
            InterpolationMode::CubicSpline => {
                let dt = self.times[upper] - self.times[lower];
                let i_prev = lower * 3;
                let i_next = upper * 3;

                let v0 = self.values[i_prev + 1];
                let out_tangent0 = self.values[i_prev + 2];
                let in_tangent1 = self.values[i_next];
                let v1 = self.values[i_next + 1];

                T::interpolate_cubic(v0, out_tangent0, in_tangent1, v1, weight, dt)
            }
        })
    }
}
