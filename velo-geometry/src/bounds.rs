//! Bounding rectangle of the routable region

/// Limits of the region covered by the graph, in CH1903+/LV95 meters.
pub struct SwissBounds;

impl SwissBounds {
    pub const MIN_E: f64 = 2_485_000.0;
    pub const MAX_E: f64 = 2_834_000.0;
    pub const MIN_N: f64 = 1_075_000.0;
    pub const MAX_N: f64 = 1_296_000.0;
    pub const WIDTH: f64 = Self::MAX_E - Self::MIN_E;
    pub const HEIGHT: f64 = Self::MAX_N - Self::MIN_N;

    /// Inclusive on all four sides.
    pub fn contains_en(e: f64, n: f64) -> bool {
        (Self::MIN_E..=Self::MAX_E).contains(&e) && (Self::MIN_N..=Self::MAX_N).contains(&n)
    }
}
