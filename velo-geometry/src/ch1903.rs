//! Approximate conversions between CH1903+/LV95 and WGS84
//!
//! Uses the swisstopo polynomial approximation, accurate to about one meter
//! inside the country. Angles are in radians.

pub fn e(lon: f64, lat: f64) -> f64 {
    let (l, p) = auxiliary(lon, lat);
    2_600_072.37 + 211_455.93 * l - 10_938.51 * l * p - 0.36 * l * p * p - 44.54 * l.powi(3)
}

pub fn n(lon: f64, lat: f64) -> f64 {
    let (l, p) = auxiliary(lon, lat);
    1_200_147.07 + 308_807.95 * p + 3_745.25 * l * l + 76.63 * p * p - 194.56 * l * l * p
        + 119.79 * p.powi(3)
}

pub fn lon(e: f64, n: f64) -> f64 {
    let (x, y) = offsets(e, n);
    let lon0 = 2.677_909_4 + 4.728_982 * x + 0.791_484 * x * y + 0.1306 * x * y * y
        - 0.0436 * x.powi(3);
    (lon0 * 100.0 / 36.0).to_radians()
}

pub fn lat(e: f64, n: f64) -> f64 {
    let (x, y) = offsets(e, n);
    let lat0 = 16.902_389_2 + 3.238_272 * y - 0.270_978 * x * x - 0.002_528 * y * y
        - 0.0447 * x * x * y
        - 0.0140 * y.powi(3);
    (lat0 * 100.0 / 36.0).to_radians()
}

fn auxiliary(lon: f64, lat: f64) -> (f64, f64) {
    (
        1e-4 * (3600.0 * lon.to_degrees() - 26_782.5),
        1e-4 * (3600.0 * lat.to_degrees() - 169_028.66),
    )
}

fn offsets(e: f64, n: f64) -> (f64, f64) {
    (1e-6 * (e - 2_600_000.0), 1e-6 * (n - 1_200_000.0))
}
