//! Real functions of one variable used for elevation profiles

use std::sync::Arc;
use velo_common::{Error, Result};

use crate::math::{clamp, interpolate};

/// Piecewise-linear function through samples spaced evenly over `[0, x_max]`.
///
/// Outside that range the first or last sample is returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Sampled {
    samples: Arc<[f32]>,
    x_max: f64,
}

impl Sampled {
    pub fn new(samples: impl Into<Arc<[f32]>>, x_max: f64) -> Result<Self> {
        let samples = samples.into();
        if samples.len() < 2 {
            return Err(Error::invalid_argument(format!(
                "sampled function needs at least 2 samples, got {}",
                samples.len()
            )));
        }
        if !(x_max > 0.0) {
            return Err(Error::invalid_argument(format!(
                "sampled function needs a positive extent, got {x_max}"
            )));
        }
        Ok(Self { samples, x_max })
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    pub fn at(&self, x: f64) -> f64 {
        let last = self.samples.len() - 1;
        if x <= 0.0 {
            return f64::from(self.samples[0]);
        }
        if x >= self.x_max {
            return f64::from(self.samples[last]);
        }
        let scaled = x * last as f64 / self.x_max;
        let i = (scaled.floor() as usize).min(last - 1);
        let frac = clamp(0.0, scaled - i as f64, 1.0);
        interpolate(
            f64::from(self.samples[i]),
            f64::from(self.samples[i + 1]),
            frac,
        )
    }
}

/// Either a constant or a sampled function.
///
/// Edges without stored samples get `Curve::Constant(f64::NAN)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Constant(f64),
    Sampled(Sampled),
}

impl Curve {
    pub fn unknown() -> Self {
        Curve::Constant(f64::NAN)
    }

    pub fn at(&self, x: f64) -> f64 {
        match self {
            Curve::Constant(y) => *y,
            Curve::Sampled(s) => s.at(x),
        }
    }
}
