use serde::{Deserialize, Serialize};

/// Control modes encoded into the supervisor status bitfield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    LandingRequested,
    TakeoffRequested,
    TrajectoryControl,
    DaaControl,
    MavCommand,
}

/// MAV command numbers understood by the FCC bridge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u16)]
pub enum MavCommand {
    DoChangeSpeed = 178,
    DoReposition = 192,
    DoOrbit = 34,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum OrbitYawBehaviour {
    HoldFrontToCircleCenter = 0,
    HoldInitialHeading = 1,
    Uncontrolled = 2,
    HoldFrontTangentToCircle = 3,
    RcControlled = 4,
}

// Bit assignments of the supervisor status word.
const STATUS_READY: u32 = 1 << 0;
const STATUS_LANDING_REQUESTED: u32 = 1 << 1;
const STATUS_TAKEOFF_REQUESTED: u32 = 1 << 2;
const STATUS_TRAJECTORY_CONTROL: u32 = 1 << 3;
const STATUS_DAA_CONTROL: u32 = 1 << 4;
const STATUS_MAV_COMMAND: u32 = 1 << 5;

/// Binary command record sent to the flight-control computer. The field
/// order matches the 4-byte-aligned wire layout expected by the bridge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FccCommand {
    pub supervisor_gps_time: f64,
    pub supervisor_status: u32,
    pub command: u16,
    pub param1: f32,
    pub param2: f32,
    pub param3: f32,
    pub param4: f32,
    /// Degrees scaled by 1e7.
    pub latitude: i32,
    /// Degrees scaled by 1e7.
    pub longitude: i32,
    /// Meters MSL.
    pub altitude_msl: f32,
}

impl FccCommand {
    pub fn set_supervisor_status(&mut self, mode: ControlMode) {
        self.supervisor_status = STATUS_READY
            | match mode {
                ControlMode::LandingRequested => STATUS_LANDING_REQUESTED,
                ControlMode::TakeoffRequested => STATUS_TAKEOFF_REQUESTED,
                ControlMode::TrajectoryControl => STATUS_TRAJECTORY_CONTROL,
                ControlMode::DaaControl => STATUS_DAA_CONTROL,
                ControlMode::MavCommand => STATUS_MAV_COMMAND,
            };
    }

    pub fn change_velocity(velocity_mps: f32, gps_time: f64) -> Self {
        let mut command = FccCommand {
            supervisor_gps_time: gps_time,
            param2: velocity_mps,
            param4: -f32::NAN,
            command: MavCommand::DoChangeSpeed as u16,
            ..FccCommand::default()
        };
        command.set_supervisor_status(ControlMode::MavCommand);
        command
    }

    pub fn reposition(gps_time: f64, lat_e7: i32, lon_e7: i32, alt_msl_m: f32) -> Self {
        let mut command = FccCommand {
            supervisor_gps_time: gps_time,
            command: MavCommand::DoReposition as u16,
            param4: -f32::NAN,
            latitude: lat_e7,
            longitude: lon_e7,
            altitude_msl: alt_msl_m,
            ..FccCommand::default()
        };
        command.set_supervisor_status(ControlMode::MavCommand);
        command
    }

    pub fn orbit(
        gps_time: f64,
        lat_e7: i32,
        lon_e7: i32,
        alt_msl_m: f32,
        radius_m: f32,
        velocity_kts: f32,
        behaviour: OrbitYawBehaviour,
    ) -> Self {
        let mut command = FccCommand {
            supervisor_gps_time: gps_time,
            command: MavCommand::DoOrbit as u16,
            param1: radius_m,
            param2: velocity_kts,
            param3: behaviour as u8 as f32,
            latitude: lat_e7,
            longitude: lon_e7,
            altitude_msl: alt_msl_m,
            ..FccCommand::default()
        };
        command.set_supervisor_status(ControlMode::MavCommand);
        command
    }

    pub fn status_mode(mode: ControlMode) -> Self {
        let mut command = FccCommand::default();
        command.set_supervisor_status(mode);
        command
    }
}
