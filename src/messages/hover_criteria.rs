use serde::{Deserialize, Serialize};

/// Quantitative tolerance box the aircraft must hold to be considered
/// stable over a hover target.
///
/// A NaN `desired_hdg_deg` means any heading is acceptable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HoverCriteria {
    /// Decimal degrees.
    pub desired_lat: f64,
    /// Decimal degrees.
    pub desired_lon: f64,
    /// Feet MSL.
    pub desired_alt_msl: f32,
    /// Degrees true, 0-360.
    pub desired_hdg_deg: f32,
    /// Feet.
    pub hor_dist_tol_ft: f64,
    /// Feet.
    pub vert_dist_tol_ft: f64,
    /// Knots.
    pub vel_tol_kts: f64,
    /// Degrees.
    pub hdg_tol_deg: f64,
    /// Seconds the aircraft must stay inside the box.
    pub time_tol: f64,
    /// System time at which the criteria was first met, -1 when unused.
    pub time_crit_first_met: f64,
    pub hover_completed: f64,
    /// Flags the display system that manual control is needed once met.
    pub man_ctrl_required_after_crit_met: i32,
}

#[allow(clippy::too_many_arguments)]
impl HoverCriteria {
    pub fn new(
        desired_lat: f64,
        desired_lon: f64,
        desired_alt_msl: f32,
        desired_hdg_deg: f32,
        hor_dist_tol_ft: f64,
        vert_dist_tol_ft: f64,
        vel_tol_kts: f64,
        hdg_tol_deg: f64,
        time_tol: f64,
        time_crit_first_met: f64,
        hover_completed: f64,
        man_ctrl_required_after_crit_met: i32,
    ) -> Self {
        Self {
            desired_lat,
            desired_lon,
            desired_alt_msl,
            desired_hdg_deg,
            hor_dist_tol_ft,
            vert_dist_tol_ft,
            vel_tol_kts,
            hdg_tol_deg,
            time_tol,
            time_crit_first_met,
            hover_completed,
            man_ctrl_required_after_crit_met,
        }
    }
}
