//! Road classification speeds.
//!
//! Edge travel time is derived from its length and the speed of its road type. Lengths are
//! expected in kilometres and speeds in km/h, so travel times come out in hours.

use crate::error::GraphError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::convert::TryFrom;

/// Speed used for road types missing from the table
pub const DEFAULT_SPEED_KM_H: f64 = 20.0;

// http://wiki.openstreetmap.org/wiki/Key:highway
const ROAD_CLASS_SPEEDS: [(&str, f64); 11] = [
  ("unclassified", 50.0),
  ("residential", 20.0),
  ("tertiary", 50.0),
  ("living_street", 50.0),
  ("motorway_link", 130.0),
  ("motorway", 130.0),
  ("secondary", 50.0),
  ("secondary_link", 50.0),
  ("primary", 60.0),
  ("trunk_link", 60.0),
  ("trunk", 60.0),
];

lazy_static! {
  static ref ROAD_CLASSES: SpeedTable = SpeedTable {
    default_speed: DEFAULT_SPEED_KM_H,
    speeds: ROAD_CLASS_SPEEDS
      .iter()
      .map(|(road_type, speed)| (road_type.to_string(), *speed))
      .collect(),
  };
}

/// Immutable mapping from road type to speed with a fallback for unknown types.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SpeedTableConfig")]
pub struct SpeedTable {
  default_speed: f64,
  speeds: HashMap<String, f64>,
}

/// Unvalidated form of [`SpeedTable`] as it appears in configuration files.
#[derive(Deserialize)]
struct SpeedTableConfig {
  default_speed: f64,
  #[serde(default)]
  speeds: HashMap<String, f64>,
}

impl TryFrom<SpeedTableConfig> for SpeedTable {
  type Error = GraphError;

  fn try_from(config: SpeedTableConfig) -> Result<Self, Self::Error> {
    config
      .speeds
      .into_iter()
      .try_fold(SpeedTable::new(config.default_speed)?, |table, (road_type, speed)| {
        table.with_speed(road_type, speed)
      })
  }
}

fn check_speed(road_type: &str, speed: f64) -> Result<f64, GraphError> {
  if speed.is_finite() && speed > 0.0 {
    Ok(speed)
  } else {
    Err(GraphError::InvalidSpeed {
      road_type: road_type.to_string(),
      speed,
    })
  }
}

impl SpeedTable {
  /// Empty table where every road type travels at `default_speed`.
  pub fn new(default_speed: f64) -> Result<Self, GraphError> {
    Ok(SpeedTable {
      default_speed: check_speed("<default>", default_speed)?,
      speeds: HashMap::new(),
    })
  }

  /// The process-wide table of OpenStreetMap highway classes.
  pub fn global() -> &'static SpeedTable {
    &ROAD_CLASSES
  }

  pub fn with_speed(mut self, road_type: impl Into<String>, speed: f64) -> Result<Self, GraphError> {
    let road_type = road_type.into();
    let speed = check_speed(&road_type, speed)?;
    self.speeds.insert(road_type, speed);
    Ok(self)
  }

  pub fn speed(&self, road_type: &str) -> f64 {
    self.speeds.get(road_type).copied().unwrap_or(self.default_speed)
  }

  pub fn default_speed(&self) -> f64 {
    self.default_speed
  }

  /// Fastest speed any road type can resolve to, including the fallback.
  pub fn max_speed(&self) -> f64 {
    self.speeds.values().copied().fold(self.default_speed, f64::max)
  }

  pub fn travel_time(&self, length: f64, road_type: &str) -> f64 {
    length / self.speed(road_type)
  }
}

impl Default for SpeedTable {
  fn default() -> Self {
    SpeedTable::global().clone()
  }
}
