use serde::{Deserialize, Serialize};

/// Snapshot of the aircraft navigation solution as published by the
/// avionics bridge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftState {
    /// GPS time of validity, seconds.
    pub gps_time: f64,
    /// Decimal degrees.
    pub lat: f64,
    /// Decimal degrees.
    pub lon: f64,
    /// Feet above ground level.
    pub alt_agl: f32,
    /// Feet MSL.
    pub alt_msl: f32,
    /// Degrees, not normalized.
    pub hdg_deg: f32,
    /// Knots, ground speed.
    pub vel_kts: f32,
}
