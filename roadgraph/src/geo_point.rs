//! Geographic types.

use crate::Location;
use geo::haversine_distance::*;
use geo::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// WGS84 coordinate in decimal degrees, usable as a graph vertex.
///
/// Equality and hashing compare the exact bit patterns of the coordinates, so two points are the
/// same vertex only if the loader produced identical values for them.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct GeoPoint {
  lat: f64,
  lon: f64,
}

// -0.0 and 0.0 compare equal as floats but not as bits
fn normalize(value: f64) -> f64 {
  if value == 0.0 {
    0.0
  } else {
    value
  }
}

impl GeoPoint {
  pub fn new(lat: f64, lon: f64) -> Self {
    GeoPoint {
      lat: normalize(lat),
      lon: normalize(lon),
    }
  }

  pub fn lat(&self) -> f64 {
    self.lat
  }

  pub fn lon(&self) -> f64 {
    self.lon
  }
}

impl Location for GeoPoint {
  /// Great-circle distance in kilometres.
  fn distance(&self, other: &Self) -> f64 {
    Point::from(*self).haversine_distance(&Point::from(*other)) / 1000.0
  }
}

impl PartialEq for GeoPoint {
  fn eq(&self, other: &Self) -> bool {
    self.lat.to_bits() == other.lat.to_bits() && self.lon.to_bits() == other.lon.to_bits()
  }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.lat.to_bits().hash(state);
    self.lon.to_bits().hash(state);
  }
}

impl From<(f64, f64)> for GeoPoint {
  fn from((lat, lon): (f64, f64)) -> Self {
    GeoPoint::new(lat, lon)
  }
}

impl From<GeoPoint> for (f64, f64) {
  fn from(point: GeoPoint) -> Self {
    (point.lat, point.lon)
  }
}

impl From<GeoPoint> for Point<f64> {
  fn from(point: GeoPoint) -> Self {
    Point::new(point.lon, point.lat)
  }
}

impl fmt::Display for GeoPoint {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Lat: {}, Lon: {}", self.lat, self.lon)
  }
}
