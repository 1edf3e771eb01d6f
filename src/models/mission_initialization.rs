use strum_macros::Display;

use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{AircraftState, GcsUpdate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    RequestPerceptionStatus,
    CheckPerceptionStatus,
    RequestAircraftState,
    GetAircraftState,
    StartMission,
    NotifyFailure,
    MissionStarted,
}

/// Gates the start of a mission: the perception system must report ready
/// and an aircraft state must be on hand before the rest of the supervisor
/// is armed with `start_mission`.
pub struct MissionInitialization {
    state: State,
    mission_id: i32,
    aircraft_state: AircraftState,
}

impl MissionInitialization {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            mission_id: 0,
            aircraft_state: AircraftState::default(),
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
}

impl Default for MissionInitialization {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for MissionInitialization {
    fn internal(&mut self) {
        self.state = match self.state {
            State::RequestPerceptionStatus => State::CheckPerceptionStatus,
            State::RequestAircraftState => State::GetAircraftState,
            State::StartMission => State::MissionStarted,
            State::NotifyFailure => State::Idle,
            other => other,
        };
    }

    fn external(&mut self, _e: SimTime, inputs: &Bag) {
        let start_supervisor = inputs.iter().rev().find_map(|ev| match ev {
            Event::StartSupervisor(start) => Some(*start),
            _ => None,
        });

        match self.state {
            State::Idle | State::MissionStarted => {
                if let Some(start) = start_supervisor {
                    self.mission_id = start.mission_id;
                    self.state = State::RequestPerceptionStatus;
                }
            }
            State::CheckPerceptionStatus => {
                if let Some(ready) = inputs.iter().find_map(|ev| match ev {
                    Event::CachedPerceptionStatus(ready) => Some(*ready),
                    _ => None,
                }) {
                    self.state = if ready {
                        State::RequestAircraftState
                    } else {
                        State::NotifyFailure
                    };
                }
            }
            State::GetAircraftState => {
                if let Some(aircraft) = inputs.iter().find_map(|ev| match ev {
                    Event::AircraftState(state) => Some(*state),
                    _ => None,
                }) {
                    self.aircraft_state = aircraft;
                    self.state = State::StartMission;
                }
            }
            _ => {}
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::RequestPerceptionStatus => {
                bag.push(Event::RequestPerceptionStatus);
            }
            State::RequestAircraftState => {
                bag.push(Event::RequestAircraftState);
            }
            State::StartMission => {
                bag.push(Event::StartMission(self.mission_id));
                bag.push(Event::SetMissionMonitorStatus(1));
                bag.push(Event::UpdateGcs(GcsUpdate::info(format!(
                    "Supervisor armed for mission {}",
                    self.mission_id
                ))));
            }
            State::NotifyFailure => {
                bag.push(Event::UpdateGcs(GcsUpdate::alert(
                    "Perception system not ready, mission not started",
                )));
            }
            _ => {}
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle
            | State::CheckPerceptionStatus
            | State::GetAircraftState
            | State::MissionStarted => SimTime::INFINITY,
            State::RequestPerceptionStatus
            | State::RequestAircraftState
            | State::StartMission
            | State::NotifyFailure => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
