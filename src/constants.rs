//! Mission-wide constants shared by the decision core and its collaborators.

use crate::devs::time::SimTime;

/// Minimum horizontal separation between subsequently accepted landing
/// points, in meters.
pub const LP_SEPARATION_M: f64 = 10.0;

// Landing timers, in seconds.
pub const REPO_TIMER: f64 = 60.0;
pub const ORBIT_TIMER: f64 = 120.0;
pub const LP_ACCEPT_TIMER: f64 = 120.0;
pub const UPD_TIMER: f64 = 20.0;

// Commanded to the FCC when scanning the landing zone.
pub const DEFAULT_ORBIT_RADIUS_M: f32 = 30.0;
pub const DEFAULT_ORBIT_VELOCITY_KTS: f32 = 2.0;
pub const DEFAULT_HOVER_ALTITUDE_AGL_FT: f32 = 15.0;

// Hover criteria commanded before a landing is attempted.
pub const DEFAULT_LAND_CRITERIA_TIME_S: f64 = 3.0;
pub const DEFAULT_LAND_CRITERIA_HOR_DIST_FT: f64 = 16.40;
pub const DEFAULT_LAND_CRITERIA_VERT_DIST_FT: f64 = 5.0;
pub const DEFAULT_LAND_CRITERIA_VEL_KTS: f64 = 3.0;
pub const DEFAULT_LAND_CRITERIA_HDG_DEG: f64 = 15.0;

// Reposition velocity envelope, in knots, matching the FCC limits.
pub const MAX_REPO_VEL_KTS: f32 = 5.0;
pub const MIN_REPO_VEL_KTS: f32 = 1.0;
/// Nominal time to transit to a new landing point, in seconds.
pub const REPO_TRANSIT_TIME_S: f32 = 10.0;

// Unit conversions.
pub const KTS_TO_MPS: f32 = 0.514_444;
pub const MPS_TO_KTS: f32 = 1.0 / KTS_TO_MPS;
pub const METERS_TO_FT: f32 = 3.281;
pub const FT_TO_METERS: f32 = 0.3048;

/// Horizontal acceptance radius reported to the BOSS display, in meters.
pub const DEFAULT_ACCEPTANCE_RADIUS_HORZ_M: f32 = 10.0;

/// Rate at which Stabilize polls the aircraft state while verifying a hover.
pub const STABILIZE_POLLING_RATE: SimTime = SimTime::from_millis(100);

/// Rate at which the shared-memory segment is polled for aircraft state.
pub const AIRCRAFT_STATE_POLLING_RATE: SimTime = SimTime::from_millis(100);

// Signal identifiers prefixed onto single-value packets.
pub const SIG_ID_SET_MISSION_MONITOR_STATUS: u8 = 1;
pub const SIG_ID_MISSION_COMPLETE: u8 = 2;
pub const SIG_ID_MISSION_ITEM_REACHED: u8 = 3;
pub const SIG_ID_START_MISSION: u8 = 4;
pub const SIG_ID_LANDING_POINT: u8 = 5;

// MAVLink STATUSTEXT framing.
pub const MAVLINK_STX: u8 = 0xFD;
pub const MAVLINK_CORE_HEADER_LEN: usize = 9;
pub const MAVLINK_MSG_ID_STATUSTEXT: u32 = 253;
pub const MAVLINK_MSG_ID_STATUSTEXT_CRC: u8 = 83;
pub const MAVLINK_STATUSTEXT_TEXT_LEN: usize = 50;
pub const MY_MAV_SYS_ID: u8 = 1;
pub const MY_MAV_COMP_ID: u8 = 1;

/// Number of preview waypoints carried in a BOSS mission update.
pub const WPT_PREVIEW_LENGTH: usize = 3;

// Network addresses and ports of the deployed system. The listen ports on
// the supervisor side follow the flight-test bench assignments.
pub const IPV4_FCC: &str = "10.0.0.63";
pub const IPV4_BOSS: &str = "10.0.0.63";
pub const IPV4_GCS: &str = "10.0.0.63";
pub const IPV4_MISSION_MONITOR: &str = "10.0.0.63";

pub const PORT_FCC: u16 = 4060;
pub const PORT_BOSS: u16 = 13333;
pub const PORT_GCS: u16 = 14550;
pub const PORT_MISSION_MONITOR: u16 = 24000;

pub const PORT_PERCEPTION_STATUS_IN: u16 = 23001;
pub const PORT_PILOT_TAKEOVER_IN: u16 = 23002;
pub const PORT_LP_RECV_IN: u16 = 23003;
pub const PORT_PLP_ACH_IN: u16 = 23004;
pub const PORT_START_SUPERVISOR_IN: u16 = 23005;
pub const PORT_WAYPOINT_IN: u16 = 23006;

/// Name of the shared-memory segment published by the avionics bridge.
pub const DEFAULT_SHARED_MEMORY_NAME: &str = "asraSharedMem";
