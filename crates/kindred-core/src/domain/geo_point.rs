use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
///
/// Latitude is expected in `[-90, 90]` and longitude in `[-180, 180]`, but
/// nothing enforces it: out-of-range points still yield a defined distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}
