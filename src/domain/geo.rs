//! Great-circle distance helpers.

use super::models::Position;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_METERS: f64 = 6_371_008.8;

pub const METERS_PER_MILE: f64 = 1609.34;

/// Haversine distance between two positions, in meters.
///
/// Symmetric and zero for identical points.
///
/// # Examples
///
/// ```
/// use coffeefinder::domain::{distance_meters, Position};
///
/// let la = Position::new(34.0522, -118.2437);
/// assert_eq!(distance_meters(la, la), 0.0);
/// ```
pub fn distance_meters(from: Position, to: Position) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

pub fn meters_to_miles(meters: f64) -> f64 {
    meters / METERS_PER_MILE
}

/// Formats a distance in meters as miles with two decimals, e.g. `"0.08 mi"`.
pub fn format_miles(meters: f64) -> String {
    format!("{:.2} mi", meters_to_miles(meters))
}
