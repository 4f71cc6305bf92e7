//! Elevation along a route, sampled at equal spacing

use velo_common::{Error, Result};
use velo_geometry::math::interpolate;
use velo_geometry::Sampled;

use crate::route::Route;

/// Elevation samples covering `[0, length]` with cached summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationProfile {
    samples: Sampled,
    min_elevation: f64,
    max_elevation: f64,
    total_ascent: f64,
    total_descent: f64,
}

impl ElevationProfile {
    pub fn new(length: f64, samples: Vec<f32>) -> Result<Self> {
        if !(length > 0.0) || samples.len() < 2 {
            return Err(Error::invalid_argument(format!(
                "elevation profile needs a positive length and at least 2 samples, got {length} m and {}",
                samples.len()
            )));
        }

        let mut min_elevation = f64::INFINITY;
        let mut max_elevation = f64::NEG_INFINITY;
        let mut total_ascent = 0.0;
        let mut total_descent = 0.0;
        for (i, &sample) in samples.iter().enumerate() {
            let sample = f64::from(sample);
            min_elevation = min_elevation.min(sample);
            max_elevation = max_elevation.max(sample);
            if i > 0 {
                let delta = sample - f64::from(samples[i - 1]);
                if delta > 0.0 {
                    total_ascent += delta;
                } else {
                    total_descent -= delta;
                }
            }
        }

        Ok(Self {
            samples: Sampled::new(samples, length)?,
            min_elevation,
            max_elevation,
            total_ascent,
            total_descent,
        })
    }

    pub fn length(&self) -> f64 {
        self.samples.x_max()
    }

    pub fn samples(&self) -> &[f32] {
        self.samples.samples()
    }

    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    pub fn max_elevation(&self) -> f64 {
        self.max_elevation
    }

    pub fn total_ascent(&self) -> f64 {
        self.total_ascent
    }

    pub fn total_descent(&self) -> f64 {
        self.total_descent
    }

    /// Linear interpolation between samples; clamps outside `[0, length]`.
    pub fn elevation_at(&self, position: f64) -> f64 {
        self.samples.at(position)
    }
}

/// Upper bound on the samples of a profile built by [`elevation_profile`].
pub const MAX_PROFILE_SAMPLES: usize = 1 << 24;

/// Samples `route` every `max_step_length` meters at most, both ends included.
///
/// Positions without a known elevation are filled in: leading and trailing
/// gaps copy the nearest known sample, inner gaps are interpolated, and a
/// route with no known elevation at all is flat at 0.
pub fn elevation_profile(route: &Route, max_step_length: f64) -> Result<ElevationProfile> {
    if !(max_step_length > 0.0) {
        return Err(Error::invalid_argument(format!(
            "profile step must be positive, got {max_step_length}"
        )));
    }
    let length = route.length();
    let steps = (length / max_step_length).ceil();
    if !(steps < MAX_PROFILE_SAMPLES as f64) {
        return Err(Error::invalid_argument(format!(
            "profile step {max_step_length} is too small for a {length} m route"
        )));
    }
    let count = steps as usize + 1;
    let spacing = length / (count - 1).max(1) as f64;

    let mut samples: Vec<f32> = (0..count)
        .map(|i| route.elevation_at(i as f64 * spacing) as f32)
        .collect();
    fill_gaps(&mut samples);

    ElevationProfile::new(length, samples)
}

fn fill_gaps(samples: &mut [f32]) {
    let Some(first) = samples.iter().position(|s| !s.is_nan()) else {
        samples.fill(0.0);
        return;
    };
    let last = samples.iter().rposition(|s| !s.is_nan()).unwrap_or(first);

    let (first_known, last_known) = (samples[first], samples[last]);
    samples[..first].fill(first_known);
    samples[last + 1..].fill(last_known);

    let mut known = first;
    for i in first + 1..=last {
        if samples[i].is_nan() {
            continue;
        }
        if i > known + 1 {
            let (y0, y1) = (f64::from(samples[known]), f64::from(samples[i]));
            let span = (i - known) as f64;
            for j in known + 1..i {
                samples[j] = interpolate(y0, y1, (j - known) as f64 / span) as f32;
            }
        }
        known = i;
    }
}
