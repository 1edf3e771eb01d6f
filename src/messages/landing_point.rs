use serde::{Deserialize, Serialize};

/// A candidate touchdown coordinate, produced by the perception system and
/// re-identified by the supervisor once accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LandingPoint {
    pub id: i32,
    /// Decimal degrees.
    pub lat: f64,
    /// Decimal degrees.
    pub lon: f64,
    /// Feet MSL.
    pub alt: f32,
    /// Degrees true.
    pub hdg: f32,
    pub mission_item_no: i32,
}

impl LandingPoint {
    pub fn new(id: i32, lat: f64, lon: f64, alt: f32, hdg: f32, mission_item_no: i32) -> Self {
        Self {
            id,
            lat,
            lon,
            alt,
            hdg,
            mission_item_no,
        }
    }
}
