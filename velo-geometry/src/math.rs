//! Small numeric helpers shared by the storage decoders and the route model

/// Clamp `v` to `[min, max]`. NaN passes through unchanged.
pub fn clamp(min: f64, v: f64, max: f64) -> f64 {
    if v < min {
        min
    } else if v > max {
        max
    } else {
        v
    }
}

/// Linear interpolation: `y0` at `x = 0`, `y1` at `x = 1`.
pub fn interpolate(y0: f64, y1: f64, x: f64) -> f64 {
    (y1 - y0).mul_add(x, y0)
}

pub fn squared_norm(u_x: f64, u_y: f64) -> f64 {
    u_x * u_x + u_y * u_y
}

pub fn norm(u_x: f64, u_y: f64) -> f64 {
    squared_norm(u_x, u_y).sqrt()
}

/// Signed length of the projection of AP onto AB.
///
/// Returns 0 when A and B coincide.
pub fn projection_length(a_x: f64, a_y: f64, b_x: f64, b_y: f64, p_x: f64, p_y: f64) -> f64 {
    let (u_x, u_y) = (b_x - a_x, b_y - a_y);
    let len = norm(u_x, u_y);
    if len == 0.0 {
        return 0.0;
    }
    ((p_x - a_x) * u_x + (p_y - a_y) * u_y) / len
}

/// Integer division rounding up; `y` must be positive.
pub fn ceil_div(x: u32, y: u32) -> u32 {
    debug_assert!(y > 0);
    x.div_ceil(y)
}
