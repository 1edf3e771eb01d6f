use crate::messages::{
    AircraftState, BossUpdate, FccCommand, GcsUpdate, HoverCriteria, LandingPoint, StartSupervisor,
};

/// Port-tagged event currency of the whole model hierarchy.
///
/// Every logical input or output port of the supervisor wiring is one variant;
/// coupling a port to another is a match arm in the owning composition.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    // Sensor and operator inputs.
    AircraftState(AircraftState),
    LpRecv(LandingPoint),
    PlpAch(LandingPoint),
    PilotTakeover,
    LandingAchieved,
    PerceptionStatus(bool),
    StartSupervisor(StartSupervisor),
    Waypoint(FccCommand),

    // Mission sequencing.
    StartMission(i32),
    MissionComplete,
    UpdateMissionItem,
    SetMissionMonitorStatus(u8),

    // Landing-point traffic between the machines.
    LpNew(LandingPoint),
    LpExpired(LandingPoint),
    RequestReposition(LandingPoint),
    Land(LandingPoint),
    LpCriteriaMet(LandingPoint),
    PilotHandover(LandingPoint),

    // Hover verification.
    StabilizeAt(HoverCriteria),
    CancelHover,
    HoverCriteriaMet,

    // Pilot handover protocol.
    NotifyPilot,
    ControlYielded,

    // Aircraft state demand loop.
    RequestAircraftState,

    // Perception status cache (Takeoff internals).
    RequestPerceptionStatus,
    CachedPerceptionStatus(bool),

    // Commands leaving the core.
    FccCommandOrbit(FccCommand),
    FccCommandVelocity(FccCommand),
    FccCommandHover(FccCommand),
    FccCommandLand(FccCommand),
    FccWaypointUpdate(FccCommand),

    // Display traffic.
    UpdateBoss(BossUpdate),
    UpdateGcs(GcsUpdate),
}

/// A message bag: all events delivered to or emitted by a component at one
/// simulation instant, in insertion order.
pub type Bag = Vec<Event>;
