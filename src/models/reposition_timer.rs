use strum_macros::Display;

use crate::constants::FT_TO_METERS;
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{BossUpdate, GcsUpdate, LandingPoint};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitNewLp,
    NotifyUpdate,
    UpdateLp,
    LpRepo,
    NewLpRepo,
    RequestLand,
    HandoverCtrl,
    LandingRoutine,
    PilotControl,
}

/// Wraps a repositioning attempt in a hard time budget and decides whether
/// to land, chase a newer landing point, or hand over to the pilot.
pub struct RepositionTimer {
    state: State,
    landing_point: LandingPoint,
    mission_number: i32,
    /// Remaining reposition budget; successive updates eat into it so a
    /// stream of new points cannot defer the decision indefinitely.
    repo_time: SimTime,
    repo_duration: SimTime,
    /// Remaining patience for updated landing points before repositioning.
    upd_time: SimTime,
    upd_duration: SimTime,
    /// Id of the last landing point announced to the displays.
    last_lp: i32,
}

impl RepositionTimer {
    pub fn new(repo_time: SimTime, upd_time: SimTime) -> Self {
        Self {
            state: State::Idle,
            landing_point: LandingPoint::default(),
            mission_number: 0,
            repo_time,
            repo_duration: repo_time,
            upd_time,
            upd_duration: upd_time,
            last_lp: 0,
        }
    }

    pub fn with_state(repo_time: SimTime, upd_time: SimTime, initial_state: State) -> Self {
        Self {
            state: initial_state,
            ..Self::new(repo_time, upd_time)
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn remaining_upd_time(&self) -> SimTime {
        self.upd_time
    }

    pub fn remaining_repo_time(&self) -> SimTime {
        self.repo_time
    }

    fn latest_lp(inputs: &Bag) -> Option<LandingPoint> {
        inputs.iter().rev().find_map(|ev| match ev {
            Event::LpNew(lp) => Some(*lp),
            _ => None,
        })
    }

    fn reset_state(&mut self) {
        self.mission_number = 0;
        self.repo_time = self.repo_duration;
        self.upd_time = self.upd_duration;
        self.landing_point = LandingPoint::default();
        self.last_lp = 0;
    }
}

impl Atomic for RepositionTimer {
    fn internal(&mut self) {
        self.state = match self.state {
            State::NotifyUpdate => {
                self.last_lp = self.landing_point.id;
                State::UpdateLp
            }
            State::UpdateLp => State::NewLpRepo,
            State::NewLpRepo => State::LpRepo,
            State::LpRepo => State::HandoverCtrl,
            State::RequestLand => State::LandingRoutine,
            other => other,
        };
    }

    fn external(&mut self, e: SimTime, inputs: &Bag) {
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
            self.state = State::WaitNewLp;
            return;
        }

        match self.state {
            State::WaitNewLp => {
                if let Some(lp) = Self::latest_lp(inputs) {
                    self.landing_point = lp;
                    self.state = State::NotifyUpdate;
                }
            }
            State::UpdateLp => {
                if let Some(lp) = Self::latest_lp(inputs) {
                    self.landing_point = lp;
                    self.upd_time -= e;
                    self.state = State::NotifyUpdate;
                }
            }
            State::LpRepo => {
                if let Some(lp) = Self::latest_lp(inputs) {
                    self.landing_point = lp;
                    self.repo_time -= e;
                    self.state = State::NewLpRepo;
                } else if inputs.iter().any(|ev| matches!(ev, Event::LpCriteriaMet(_))) {
                    self.state = State::RequestLand;
                }
            }
            State::HandoverCtrl => {
                if inputs.iter().any(|ev| matches!(ev, Event::ControlYielded)) {
                    self.state = State::PilotControl;
                }
            }
            _ => {}
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::NotifyUpdate => {
                if self.last_lp == 0 {
                    bag.push(Event::UpdateGcs(GcsUpdate::alert(format!(
                        "LP found. Holding for {}s",
                        self.upd_time.as_secs()
                    ))));
                }
                if self.landing_point.id != self.last_lp {
                    bag.push(Event::UpdateBoss(BossUpdate::landing_point(
                        self.landing_point.id,
                        self.landing_point.lat,
                        self.landing_point.lon,
                        self.mission_number,
                        self.landing_point.mission_item_no,
                        self.landing_point.alt * FT_TO_METERS,
                        self.landing_point.hdg,
                        0.0,
                        "LP UPD",
                    )));
                }
            }
            State::RequestLand => {
                bag.push(Event::Land(self.landing_point));
            }
            State::LpRepo => {
                bag.push(Event::UpdateBoss(BossUpdate::scan(
                    self.mission_number,
                    self.landing_point.alt * FT_TO_METERS,
                    "LZ SCAN",
                )));
                bag.push(Event::UpdateGcs(GcsUpdate::alert(
                    "Repo timer expired, hovering over the last LP",
                )));
                bag.push(Event::CancelHover);
                bag.push(Event::PilotHandover(self.landing_point));
            }
            State::NewLpRepo => {
                bag.push(Event::RequestReposition(self.landing_point));
            }
            _ => {}
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle
            | State::WaitNewLp
            | State::HandoverCtrl
            | State::PilotControl
            | State::LandingRoutine => SimTime::INFINITY,
            State::UpdateLp => self.upd_time,
            State::LpRepo => self.repo_time,
            State::NotifyUpdate | State::NewLpRepo | State::RequestLand => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
