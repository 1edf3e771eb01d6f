use strum_macros::Display;

use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{ControlMode, FccCommand};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitForWaypoint,
    PilotTakeover,
    UpdateFcc,
}

/// On-route waypoint forwarder: stamps incoming waypoints with the
/// MAV_COMMAND control mode and relays them to the FCC.
pub struct HandleWaypoint {
    state: State,
    next_waypoints: Vec<FccCommand>,
}

impl HandleWaypoint {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            next_waypoints: Vec::new(),
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

impl Default for HandleWaypoint {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for HandleWaypoint {
    fn internal(&mut self) {
        if self.state == State::UpdateFcc {
            self.state = State::WaitForWaypoint;
            self.next_waypoints.clear();
        }
    }

    fn external(&mut self, _e: SimTime, inputs: &Bag) {
        if inputs.iter().any(|ev| matches!(ev, Event::PilotTakeover)) {
            self.state = State::PilotTakeover;
            return;
        }

        match self.state {
            State::Idle => {
                if inputs.iter().any(|ev| matches!(ev, Event::StartMission(_))) {
                    self.state = State::WaitForWaypoint;
                }
            }
            State::WaitForWaypoint => {
                let waypoints: Vec<FccCommand> = inputs
                    .iter()
                    .filter_map(|ev| match ev {
                        Event::Waypoint(command) => {
                            let mut waypoint = *command;
                            waypoint.set_supervisor_status(ControlMode::MavCommand);
                            Some(waypoint)
                        }
                        _ => None,
                    })
                    .collect();
                if !waypoints.is_empty() {
                    self.next_waypoints = waypoints;
                    self.state = State::UpdateFcc;
                }
            }
            _ => {}
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        if self.state == State::UpdateFcc {
            for waypoint in &self.next_waypoints {
                bag.push(Event::FccWaypointUpdate(*waypoint));
            }
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle | State::WaitForWaypoint | State::PilotTakeover => SimTime::INFINITY,
            State::UpdateFcc => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
