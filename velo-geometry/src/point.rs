//! A point of the routable region

use serde::Serialize;
use std::fmt;
use velo_common::{Error, Result};

use crate::bounds::SwissBounds;
use crate::ch1903;
use crate::math::{clamp, interpolate, norm, squared_norm};

/// A position in CH1903+/LV95, guaranteed to lie inside [`SwissBounds`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointCh {
    e: f64,
    n: f64,
}

impl PointCh {
    pub fn new(e: f64, n: f64) -> Result<Self> {
        if !SwissBounds::contains_en(e, n) {
            return Err(Error::invalid_argument(format!(
                "point ({e}, {n}) lies outside the region bounds"
            )));
        }
        Ok(Self { e, n })
    }

    /// Projects a WGS84 position (radians) into the region.
    pub fn from_wgs84(lon: f64, lat: f64) -> Result<Self> {
        Self::new(ch1903::e(lon, lat), ch1903::n(lon, lat))
    }

    pub fn e(&self) -> f64 {
        self.e
    }

    pub fn n(&self) -> f64 {
        self.n
    }

    pub fn squared_distance_to(&self, that: &PointCh) -> f64 {
        squared_norm(that.e - self.e, that.n - self.n)
    }

    pub fn distance_to(&self, that: &PointCh) -> f64 {
        norm(that.e - self.e, that.n - self.n)
    }

    /// Point at fraction `t` of the way from `self` to `that`, with `t`
    /// clamped to `[0, 1]`. A NaN fraction yields `self`.
    pub fn lerp(&self, that: &PointCh, t: f64) -> PointCh {
        if !(t > 0.0) {
            return *self;
        }
        if t >= 1.0 {
            return *that;
        }
        // Both ends are inside the region, so clamping only absorbs rounding.
        PointCh {
            e: clamp(SwissBounds::MIN_E, interpolate(self.e, that.e, t), SwissBounds::MAX_E),
            n: clamp(SwissBounds::MIN_N, interpolate(self.n, that.n, t), SwissBounds::MAX_N),
        }
    }

    /// WGS84 longitude in radians.
    pub fn lon(&self) -> f64 {
        ch1903::lon(self.e, self.n)
    }

    /// WGS84 latitude in radians.
    pub fn lat(&self) -> f64 {
        ch1903::lat(self.e, self.n)
    }
}

impl fmt::Display for PointCh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.e, self.n)
    }
}
