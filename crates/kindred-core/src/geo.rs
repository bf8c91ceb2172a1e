//! Great-circle distance and unit conversion.
//!
//! Distances are undefined rather than erroneous when a point is missing, so
//! the optional variants take and return `Option` and callers decide what an
//! unknown distance means for them.

use crate::domain::GeoPoint;

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Miles per kilometer.
pub const MILES_PER_KM: f64 = 0.621371;

/// Haversine distance in kilometers between two known points.
pub fn haversine_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Haversine distance in kilometers, `None` when either point is unknown.
pub fn haversine_distance_km(from: Option<GeoPoint>, to: Option<GeoPoint>) -> Option<f64> {
    Some(haversine_km(from?, to?))
}

pub fn km_to_miles(km: Option<f64>) -> Option<f64> {
    km.map(|km| km * MILES_PER_KM)
}

pub fn miles_to_km(miles: Option<f64>) -> Option<f64> {
    miles.map(|miles| miles / MILES_PER_KM)
}

impl GeoPoint {
    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        haversine_km(*self, *other)
    }

    /// Great-circle distance to `other` in miles.
    pub fn distance_miles(&self, other: &GeoPoint) -> f64 {
        self.distance_km(other) * MILES_PER_KM
    }
}
