use strum_macros::Display;

use crate::constants::{
    DEFAULT_LAND_CRITERIA_HDG_DEG, DEFAULT_LAND_CRITERIA_HOR_DIST_FT,
    DEFAULT_LAND_CRITERIA_TIME_S, DEFAULT_LAND_CRITERIA_VEL_KTS, DEFAULT_LAND_CRITERIA_VERT_DIST_FT,
};
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{HoverCriteria, LandingPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitPilotHandover,
    Hover,
    Stabilizing,
    NotifyPilot,
    WaitForPilot,
    YieldControl,
    PilotControl,
}

/// Pilot-handover protocol: bring the aircraft to a stable hover over the
/// last useful point, notify the pilot, then yield control once the pilot
/// takes over.
pub struct HandoverControl {
    state: State,
    hover_location: LandingPoint,
}

impl HandoverControl {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            hover_location: LandingPoint::default(),
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

impl Default for HandoverControl {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for HandoverControl {
    fn internal(&mut self) {
        self.state = match self.state {
            State::Hover => State::Stabilizing,
            State::NotifyPilot => State::WaitForPilot,
            State::YieldControl => State::PilotControl,
            other => other,
        };
    }

    fn external(&mut self, _e: SimTime, inputs: &Bag) {
        let received_pilot_takeover = inputs.iter().any(|ev| matches!(ev, Event::PilotTakeover));
        if received_pilot_takeover && self.state != State::WaitForPilot {
            self.state = State::PilotControl;
            return;
        }

        if inputs.iter().any(|ev| matches!(ev, Event::StartMission(_))) {
            self.state = State::WaitPilotHandover;
            return;
        }

        match self.state {
            State::WaitPilotHandover => {
                if let Some(lp) = inputs.iter().rev().find_map(|ev| match ev {
                    Event::PilotHandover(lp) => Some(*lp),
                    _ => None,
                }) {
                    self.hover_location = lp;
                    self.state = State::Hover;
                }
            }
            State::Stabilizing => {
                if inputs.iter().any(|ev| matches!(ev, Event::HoverCriteriaMet)) {
                    self.state = State::NotifyPilot;
                }
            }
            State::WaitForPilot => {
                if received_pilot_takeover {
                    self.state = State::YieldControl;
                }
            }
            _ => {}
        }
    }

    fn confluent(&mut self, _e: SimTime, inputs: &Bag) {
        if inputs.iter().any(|ev| matches!(ev, Event::PilotTakeover)) {
            self.external(SimTime::ZERO, inputs);
            self.internal();
        } else {
            self.internal();
            self.external(SimTime::ZERO, inputs);
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::Hover => {
                // NaN heading: any heading is acceptable for a handover hover.
                bag.push(Event::StabilizeAt(HoverCriteria::new(
                    self.hover_location.lat,
                    self.hover_location.lon,
                    self.hover_location.alt,
                    f32::NAN,
                    DEFAULT_LAND_CRITERIA_HOR_DIST_FT,
                    DEFAULT_LAND_CRITERIA_VERT_DIST_FT,
                    DEFAULT_LAND_CRITERIA_VEL_KTS,
                    DEFAULT_LAND_CRITERIA_HDG_DEG,
                    DEFAULT_LAND_CRITERIA_TIME_S,
                    0.0,
                    0.0,
                    0,
                )));
            }
            State::NotifyPilot => {
                bag.push(Event::NotifyPilot);
            }
            State::YieldControl => {
                bag.push(Event::ControlYielded);
            }
            _ => {}
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle
            | State::WaitPilotHandover
            | State::Stabilizing
            | State::WaitForPilot
            | State::PilotControl => SimTime::INFINITY,
            State::Hover | State::NotifyPilot | State::YieldControl => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
