use serde::{Deserialize, Serialize};

use crate::constants::WPT_PREVIEW_LENGTH;

/// Mission update record consumed by the BOSS pilot display. Field order
/// matches the 4-byte-aligned wire layout; the description is truncated to
/// ten bytes when encoded.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BossUpdate {
    /// Landing point number within the current mission, 0 when no LP yet.
    pub lp_no: i32,
    pub lp_lat: f64,
    pub lp_lon: f64,
    pub mission_no: i32,
    pub mission_item_no: i32,
    pub is_mission_started: i32,
    pub is_landing_leg: i32,
    pub lat: f64,
    pub lon: f64,
    /// Meters MSL.
    pub alt: f32,
    /// Degrees.
    pub yaw: f32,
    /// Meters per second. Zero draws a doghouse, anything else a circle.
    pub speed: f32,
    pub horz_accept_radius_m: f32,
    pub vert_accept_radius_m: f32,
    pub preview_length: i32,
    pub lat_next: [f64; WPT_PREVIEW_LENGTH],
    pub lon_next: [f64; WPT_PREVIEW_LENGTH],
    pub description: String,
}

#[allow(clippy::too_many_arguments)]
impl BossUpdate {
    /// Update announcing a landing point on the landing leg.
    pub fn landing_point(
        lp_no: i32,
        lp_lat: f64,
        lp_lon: f64,
        mission_no: i32,
        mission_item_no: i32,
        alt_m: f32,
        yaw: f32,
        speed: f32,
        description: &str,
    ) -> Self {
        Self {
            lp_no,
            lp_lat,
            lp_lon,
            mission_no,
            mission_item_no,
            is_mission_started: 1,
            is_landing_leg: 1,
            alt: alt_m,
            yaw,
            speed,
            description: description.to_string(),
            ..Self::default()
        }
    }

    /// Update describing a mission item outside the landing leg.
    pub fn mission_item(
        mission_no: i32,
        mission_item_no: i32,
        lat: f64,
        lon: f64,
        alt_m: f32,
        yaw: f32,
        speed: f32,
        horz_accept_radius_m: f32,
        vert_accept_radius_m: f32,
        description: &str,
    ) -> Self {
        Self {
            mission_no,
            mission_item_no,
            is_mission_started: 1,
            lat,
            lon,
            alt: alt_m,
            yaw,
            speed,
            horz_accept_radius_m,
            vert_accept_radius_m,
            description: description.to_string(),
            ..Self::default()
        }
    }

    /// Minimal update used when only an altitude change is reported.
    pub fn scan(mission_no: i32, alt_m: f32, description: &str) -> Self {
        Self {
            mission_no,
            is_mission_started: 1,
            is_landing_leg: 1,
            alt: alt_m,
            description: description.to_string(),
            ..Self::default()
        }
    }
}
