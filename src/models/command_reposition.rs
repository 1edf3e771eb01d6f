use strum_macros::Display;

use crate::constants::{
    DEFAULT_LAND_CRITERIA_HDG_DEG, DEFAULT_LAND_CRITERIA_HOR_DIST_FT,
    DEFAULT_LAND_CRITERIA_TIME_S, DEFAULT_LAND_CRITERIA_VEL_KTS, DEFAULT_LAND_CRITERIA_VERT_DIST_FT,
    FT_TO_METERS, KTS_TO_MPS, MAX_REPO_VEL_KTS, MIN_REPO_VEL_KTS, MPS_TO_KTS, REPO_TRANSIT_TIME_S,
};
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{AircraftState, BossUpdate, FccCommand, GcsUpdate, HoverCriteria, LandingPoint};
use crate::util::distance_wgs84;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitRequestReposition,
    RequestState,
    GetState,
    CommandVel,
    CommandHover,
    Stabilizing,
    LpCriteriaMet,
    Landing,
    CancelHover,
    TimerExpired,
    PilotControl,
}

/// Converts a "landing point to reposition to" into a command series:
/// request aircraft state, command a transit velocity, then hand the hover
/// verification to Stabilize.
pub struct CommandReposition {
    state: State,
    landing_point: LandingPoint,
    aircraft_state: AircraftState,
    /// Transit velocity for the pending reposition, meters per second.
    velocity: f32,
    mission_number: i32,
}

impl CommandReposition {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            landing_point: LandingPoint::default(),
            aircraft_state: AircraftState::default(),
            velocity: 0.0,
            mission_number: 0,
        }
    }

    pub fn with_state(initial_state: State) -> Self {
        Self {
            state: initial_state,
            ..Self::new()
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn velocity_mps(&self) -> f32 {
        self.velocity
    }

    fn latest_reposition(inputs: &Bag) -> Option<LandingPoint> {
        inputs.iter().rev().find_map(|ev| match ev {
            Event::RequestReposition(lp) => Some(*lp),
            _ => None,
        })
    }

    /// Transit velocity to cover the horizontal separation in the nominal
    /// transit time, clamped to the FCC envelope.
    fn compute_velocity(&mut self) {
        let (distance_m, _) = distance_wgs84(
            self.aircraft_state.lat,
            self.aircraft_state.lon,
            self.aircraft_state.alt_msl * FT_TO_METERS,
            self.landing_point.lat,
            self.landing_point.lon,
            self.landing_point.alt * FT_TO_METERS,
        );
        let velocity = distance_m / REPO_TRANSIT_TIME_S;
        self.velocity = velocity.clamp(MIN_REPO_VEL_KTS * KTS_TO_MPS, MAX_REPO_VEL_KTS * KTS_TO_MPS);
    }

    fn reset_state(&mut self) {
        self.aircraft_state = AircraftState::default();
        self.landing_point = LandingPoint::default();
        self.velocity = 0.0;
        self.mission_number = 0;
    }
}

impl Default for CommandReposition {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for CommandReposition {
    fn internal(&mut self) {
        self.state = match self.state {
            State::RequestState => State::GetState,
            State::CommandVel => State::CommandHover,
            State::CommandHover => State::Stabilizing,
            State::LpCriteriaMet => State::Landing,
            State::CancelHover => State::RequestState,
            other => other,
        };
    }

    fn external(&mut self, _e: SimTime, inputs: &Bag) {
        if inputs.iter().any(|ev| matches!(ev, Event::PilotTakeover)) {
            self.state = State::PilotControl;
            return;
        }

        let start_mission = inputs.iter().rev().find_map(|ev| match ev {
            Event::StartMission(mission) => Some(*mission),
            _ => None,
        });
        if let Some(mission_number) = start_mission {
            self.reset_state();
            self.mission_number = mission_number;
            self.state = State::WaitRequestReposition;
            return;
        }

        let received_pilot_handover = inputs.iter().any(|ev| matches!(ev, Event::PilotHandover(_)));
        if received_pilot_handover && self.state != State::Idle {
            self.state = State::TimerExpired;
            return;
        }

        match self.state {
            State::WaitRequestReposition | State::CommandVel | State::CommandHover => {
                if let Some(lp) = Self::latest_reposition(inputs) {
                    self.landing_point = lp;
                    self.state = State::RequestState;
                }
            }
            State::GetState => {
                if let Some(aircraft) = inputs.iter().find_map(|ev| match ev {
                    Event::AircraftState(state) => Some(*state),
                    _ => None,
                }) {
                    self.aircraft_state = aircraft;
                    self.compute_velocity();
                    self.state = State::CommandVel;
                }
            }
            State::Stabilizing => {
                if let Some(lp) = Self::latest_reposition(inputs) {
                    self.landing_point = lp;
                    self.state = State::CancelHover;
                } else if inputs.iter().any(|ev| matches!(ev, Event::HoverCriteriaMet)) {
                    self.state = State::LpCriteriaMet;
                }
            }
            State::LpCriteriaMet => {
                if let Some(lp) = Self::latest_reposition(inputs) {
                    self.landing_point = lp;
                    self.state = State::CancelHover;
                }
            }
            _ => {}
        }
    }

    /// A simultaneous input always wins over the pending internal step.
    fn confluent(&mut self, _e: SimTime, inputs: &Bag) {
        self.external(SimTime::ZERO, inputs);
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::RequestState => {
                bag.push(Event::RequestAircraftState);
            }
            State::CommandVel => {
                bag.push(Event::FccCommandVelocity(FccCommand::change_velocity(
                    self.velocity,
                    self.aircraft_state.gps_time,
                )));
            }
            State::CommandHover => {
                bag.push(Event::SetMissionMonitorStatus(0));
                bag.push(Event::StabilizeAt(HoverCriteria::new(
                    self.landing_point.lat,
                    self.landing_point.lon,
                    self.landing_point.alt,
                    self.landing_point.hdg,
                    DEFAULT_LAND_CRITERIA_HOR_DIST_FT,
                    DEFAULT_LAND_CRITERIA_VERT_DIST_FT,
                    DEFAULT_LAND_CRITERIA_VEL_KTS,
                    DEFAULT_LAND_CRITERIA_HDG_DEG,
                    DEFAULT_LAND_CRITERIA_TIME_S,
                    -1.0,
                    0.0,
                    0,
                )));
                bag.push(Event::UpdateBoss(BossUpdate::landing_point(
                    self.landing_point.id,
                    self.landing_point.lat,
                    self.landing_point.lon,
                    self.mission_number,
                    self.landing_point.mission_item_no,
                    self.landing_point.alt * FT_TO_METERS,
                    self.landing_point.hdg,
                    self.velocity * MPS_TO_KTS,
                    "LP REP",
                )));
                bag.push(Event::UpdateGcs(GcsUpdate::alert("Repositioning to LP!")));
            }
            State::CancelHover => {
                bag.push(Event::CancelHover);
            }
            State::LpCriteriaMet => {
                bag.push(Event::LpCriteriaMet(self.landing_point));
            }
            _ => {}
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle
            | State::WaitRequestReposition
            | State::GetState
            | State::Stabilizing
            | State::Landing
            | State::TimerExpired
            | State::PilotControl => SimTime::INFINITY,
            State::RequestState
            | State::CommandVel
            | State::CommandHover
            | State::LpCriteriaMet
            | State::CancelHover => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
