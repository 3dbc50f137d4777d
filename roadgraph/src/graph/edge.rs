use crate::speed::SpeedTable;
use crate::Identifier;

/// A directed road segment.
///
/// The travel time is derived once, when the edge is created, from the length and the speed of
/// the road type.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge<P: Identifier> {
  from: P,
  to: P,
  road_name: String,
  road_type: String,
  length: f64,
  time: f64,
}

impl<P: Identifier> Edge<P> {
  pub(crate) fn new(
    from: P,
    to: P,
    road_name: String,
    road_type: String,
    length: f64,
    speeds: &SpeedTable,
  ) -> Self {
    let time = speeds.travel_time(length, &road_type);
    Edge {
      from,
      to,
      road_name,
      road_type,
      length,
      time,
    }
  }

  pub fn from(&self) -> P {
    self.from
  }

  pub fn to(&self) -> P {
    self.to
  }

  pub fn road_name(&self) -> &str {
    &self.road_name
  }

  pub fn road_type(&self) -> &str {
    &self.road_type
  }

  pub fn length(&self) -> f64 {
    self.length
  }

  pub fn time(&self) -> f64 {
    self.time
  }
}
