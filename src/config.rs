//! Host configuration: compiled-in defaults, optionally overridden by a
//! JSON file named through `ASRA_SUPERVISOR_CONFIG`.

use std::{env, fs};

use serde::Deserialize;
use strum_macros::Display;

use crate::constants::{
    AIRCRAFT_STATE_POLLING_RATE, IPV4_BOSS, IPV4_FCC, IPV4_GCS, IPV4_MISSION_MONITOR,
    LP_ACCEPT_TIMER, ORBIT_TIMER, PORT_BOSS, PORT_FCC, PORT_GCS, PORT_LP_RECV_IN,
    PORT_MISSION_MONITOR, PORT_PERCEPTION_STATUS_IN, PORT_PILOT_TAKEOVER_IN, PORT_PLP_ACH_IN,
    PORT_START_SUPERVISOR_IN, PORT_WAYPOINT_IN, REPO_TIMER, STABILIZE_POLLING_RATE, UPD_TIMER,
};
use crate::coupled::landing::LandingTimers;
use crate::devs::time::SimTime;

pub const CONFIG_ENV: &str = "ASRA_SUPERVISOR_CONFIG";

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ConfigError {
    FileUnreadable,
    MalformedJson,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    pub timers: TimerConfig,
    pub network: NetworkConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub lp_accept_s: f64,
    pub orbit_s: f64,
    pub repo_s: f64,
    pub upd_s: f64,
    pub stabilize_polling_ms: u64,
    pub aircraft_state_polling_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub fcc_addr: String,
    pub boss_addr: String,
    pub gcs_addr: String,
    pub mission_monitor_addr: String,
    pub listen: ListenPorts,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ListenPorts {
    pub lp_recv: u16,
    pub plp_ach: u16,
    pub pilot_takeover: u16,
    pub start_supervisor: u16,
    pub waypoint: u16,
    pub perception_status: u16,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            timers: TimerConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            lp_accept_s: LP_ACCEPT_TIMER,
            orbit_s: ORBIT_TIMER,
            repo_s: REPO_TIMER,
            upd_s: UPD_TIMER,
            stabilize_polling_ms: STABILIZE_POLLING_RATE.as_millis(),
            aircraft_state_polling_ms: AIRCRAFT_STATE_POLLING_RATE.as_millis(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            fcc_addr: format!("{IPV4_FCC}:{PORT_FCC}"),
            boss_addr: format!("{IPV4_BOSS}:{PORT_BOSS}"),
            gcs_addr: format!("{IPV4_GCS}:{PORT_GCS}"),
            mission_monitor_addr: format!("{IPV4_MISSION_MONITOR}:{PORT_MISSION_MONITOR}"),
            listen: ListenPorts::default(),
        }
    }
}

impl Default for ListenPorts {
    fn default() -> Self {
        Self {
            lp_recv: PORT_LP_RECV_IN,
            plp_ach: PORT_PLP_ACH_IN,
            pilot_takeover: PORT_PILOT_TAKEOVER_IN,
            start_supervisor: PORT_START_SUPERVISOR_IN,
            waypoint: PORT_WAYPOINT_IN,
            perception_status: PORT_PERCEPTION_STATUS_IN,
        }
    }
}

impl SupervisorConfig {
    pub fn landing_timers(&self) -> LandingTimers {
        LandingTimers {
            lp_accept_time: SimTime::from_secs_f64(self.timers.lp_accept_s),
            orbit_time: SimTime::from_secs_f64(self.timers.orbit_s),
            repo_time: SimTime::from_secs_f64(self.timers.repo_s),
            upd_time: SimTime::from_secs_f64(self.timers.upd_s),
            stabilize_polling_rate: SimTime::from_millis(self.timers.stabilize_polling_ms),
        }
    }
}

/// Loads the configuration, falling back to defaults when no override file
/// is named in the environment.
pub fn load() -> Result<SupervisorConfig, ConfigError> {
    match env::var(CONFIG_ENV) {
        Ok(path) => {
            let text = fs::read_to_string(path).map_err(|_| ConfigError::FileUnreadable)?;
            serde_json::from_str(&text).map_err(|_| ConfigError::MalformedJson)
        }
        Err(_) => Ok(SupervisorConfig::default()),
    }
}
