use strum_macros::Display;

use crate::constants::FT_TO_METERS;
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{BossUpdate, ControlMode, FccCommand, GcsUpdate, LandingPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitLandRequest,
    RequestLand,
    Landing,
    NotifyLanded,
    Landed,
    PilotControl,
}

/// Issues the final land command and reports mission completion once the
/// touchdown is observed. A landing finished by the pilot after a takeover
/// still completes the mission.
pub struct LandingRoutine {
    state: State,
    landing_point: LandingPoint,
    mission_number: i32,
}

impl LandingRoutine {
    pub fn new() -> Self {
        Self {
            state: State::Idle,
            landing_point: LandingPoint::default(),
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
}

impl Default for LandingRoutine {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for LandingRoutine {
    fn internal(&mut self) {
        self.state = match self.state {
            State::RequestLand => State::Landing,
            State::NotifyLanded => State::Landed,
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
            self.mission_number = mission_number;
            self.state = State::WaitLandRequest;
            return;
        }

        match self.state {
            State::WaitLandRequest => {
                if let Some(lp) = inputs.iter().rev().find_map(|ev| match ev {
                    Event::Land(lp) => Some(*lp),
                    _ => None,
                }) {
                    self.landing_point = lp;
                    self.state = State::RequestLand;
                }
            }
            State::Landing | State::PilotControl => {
                if inputs.iter().any(|ev| matches!(ev, Event::LandingAchieved)) {
                    self.state = State::NotifyLanded;
                }
            }
            _ => {}
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::RequestLand => {
                bag.push(Event::FccCommandLand(FccCommand::status_mode(
                    ControlMode::LandingRequested,
                )));
                bag.push(Event::UpdateBoss(BossUpdate::landing_point(
                    self.landing_point.id,
                    self.landing_point.lat,
                    self.landing_point.lon,
                    self.mission_number,
                    self.landing_point.mission_item_no,
                    self.landing_point.alt * FT_TO_METERS,
                    self.landing_point.hdg,
                    0.0,
                    "LAND",
                )));
                bag.push(Event::UpdateGcs(GcsUpdate::alert("Landing")));
            }
            State::NotifyLanded => {
                bag.push(Event::UpdateGcs(GcsUpdate::info("Just landed!")));
                bag.push(Event::MissionComplete);
                bag.push(Event::UpdateMissionItem);
            }
            _ => {}
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle
            | State::WaitLandRequest
            | State::Landing
            | State::Landed
            | State::PilotControl => SimTime::INFINITY,
            State::RequestLand | State::NotifyLanded => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
