//! Great-circle helpers for decoded positions.
//!
//! These treat the earth as a sphere of radius 6 372 795 m, so distances may be
//! off by up to 0.5%.

use libm::{atan2, cos, floor, sin, sqrt};

const EARTH_RADIUS_M: f64 = 6_372_795.0;

const CARDINALS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Distance in metres between two positions in signed decimal degrees.
pub fn distance_between(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let delta = (lng1 - lng2).to_radians();
    let (sdlng, cdlng) = (sin(delta), cos(delta));

    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let (slat1, clat1) = (sin(lat1), cos(lat1));
    let (slat2, clat2) = (sin(lat2), cos(lat2));

    let a = clat1 * slat2 - slat1 * clat2 * cdlng;
    let b = clat2 * sdlng;
    let numerator = sqrt(a * a + b * b);
    let denominator = slat1 * slat2 + clat1 * clat2 * cdlng;

    atan2(numerator, denominator) * EARTH_RADIUS_M
}

/// Initial course in degrees (north 0, east 90) from the first position to the
/// second, both in signed decimal degrees.
pub fn course_to(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let dlng = (lng2 - lng1).to_radians();
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());

    let y = sin(dlng) * cos(lat2);
    let x = cos(lat1) * sin(lat2) - sin(lat1) * cos(lat2) * cos(dlng);

    let mut course = atan2(y, x);
    if course < 0.0 {
        course += 2.0 * core::f64::consts::PI;
    }

    course.to_degrees()
}

/// Nearest of the 16 compass points to a course in degrees.
pub fn cardinal(course: f64) -> &'static str {
    let direction = floor((course + 11.25) / 22.5) as i64;
    CARDINALS[direction.rem_euclid(16) as usize]
}
