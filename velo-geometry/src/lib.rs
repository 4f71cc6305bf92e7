//! Geometry primitives for the velo route engine
//!
//! Everything here works in the Swiss CH1903+/LV95 projected system, in
//! meters. Conversions to WGS84 live in [`ch1903`].

pub mod bounds;
pub mod ch1903;
pub mod functions;
pub mod math;
pub mod point;

pub use bounds::SwissBounds;
pub use functions::{Curve, Sampled};
pub use point::PointCh;
