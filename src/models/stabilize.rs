use strum_macros::Display;

use crate::constants::{FT_TO_METERS, METERS_TO_FT};
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::messages::{AircraftState, FccCommand, GcsUpdate, HoverCriteria};
use crate::util::distance_wgs84;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitStabilize,
    RequestAircraftState,
    GetAircraftState,
    InitHover,
    Stabilizing,
    CheckState,
    Hover,
}

/// Verifies that the aircraft holds a commanded hover inside the tolerance
/// box for the required dwell duration, polling the aircraft state at a
/// fixed rate.
pub struct Stabilize {
    state: State,
    in_tolerance: bool,
    time_tolerance_met: bool,
    /// Remaining dwell before the hover criteria counts as met.
    stabilization_time: SimTime,
    polling_rate: SimTime,
    hover_criteria: HoverCriteria,
    aircraft_state: AircraftState,
}

impl Stabilize {
    pub fn new(polling_rate: SimTime) -> Self {
        Self {
            state: State::Idle,
            in_tolerance: false,
            time_tolerance_met: false,
            stabilization_time: SimTime::ZERO,
            polling_rate,
            hover_criteria: HoverCriteria::default(),
            aircraft_state: AircraftState::default(),
        }
    }

    pub fn with_state(polling_rate: SimTime, initial_state: State) -> Self {
        Self {
            state: initial_state,
            ..Self::new(polling_rate)
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn remaining_dwell(&self) -> SimTime {
        self.stabilization_time
    }

    fn reset_state(&mut self) {
        self.stabilization_time = SimTime::ZERO;
        self.in_tolerance = false;
        self.time_tolerance_met = false;
    }

    /// Four-part tolerance predicate. All bounds are strict: sitting exactly
    /// on a tolerance fails the check.
    fn hover_criteria_met(&self, aircraft: &AircraftState) -> bool {
        let criteria = &self.hover_criteria;
        if f64::from((aircraft.alt_msl - criteria.desired_alt_msl).abs()) >= criteria.vert_dist_tol_ft
        {
            return false;
        }

        let mut hdg = aircraft.hdg_deg;
        while hdg < 0.0 {
            hdg += 360.0;
        }
        if !criteria.desired_hdg_deg.is_nan()
            && f64::from((hdg - criteria.desired_hdg_deg).abs()) >= criteria.hdg_tol_deg
        {
            return false;
        }

        if f64::from(aircraft.vel_kts.abs()) >= criteria.vel_tol_kts {
            return false;
        }

        let (dist_xy_m, _) = distance_wgs84(
            aircraft.lat,
            aircraft.lon,
            aircraft.alt_msl * FT_TO_METERS,
            criteria.desired_lat,
            criteria.desired_lon,
            criteria.desired_alt_msl * FT_TO_METERS,
        );
        if f64::from(dist_xy_m * METERS_TO_FT) >= criteria.hor_dist_tol_ft {
            return false;
        }

        true
    }
}

impl Atomic for Stabilize {
    fn internal(&mut self) {
        match self.state {
            State::RequestAircraftState => self.state = State::GetAircraftState,
            State::InitHover => self.state = State::Stabilizing,
            State::Stabilizing => {
                self.state = if self.time_tolerance_met && self.in_tolerance {
                    State::Hover
                } else {
                    State::CheckState
                };
            }
            State::Hover => {
                self.reset_state();
                self.state = State::WaitStabilize;
            }
            _ => {}
        }
    }

    fn external(&mut self, e: SimTime, inputs: &Bag) {
        let received_cancel = inputs.iter().any(|ev| matches!(ev, Event::CancelHover));
        let received_start_mission = inputs.iter().any(|ev| matches!(ev, Event::StartMission(_)));
        if received_cancel || received_start_mission {
            self.reset_state();
            self.state = State::WaitStabilize;
            return;
        }

        match self.state {
            State::WaitStabilize => {
                if let Some(criteria) = inputs.iter().rev().find_map(|ev| match ev {
                    Event::StabilizeAt(criteria) => Some(*criteria),
                    _ => None,
                }) {
                    self.hover_criteria = criteria;
                    self.stabilization_time = SimTime::from_secs_f64(criteria.time_tol);
                    self.state = State::RequestAircraftState;
                }
            }
            State::GetAircraftState => {
                if let Some(aircraft) = inputs.iter().find_map(|ev| match ev {
                    Event::AircraftState(state) => Some(*state),
                    _ => None,
                }) {
                    self.aircraft_state = aircraft;
                    self.state = State::InitHover;
                }
            }
            State::CheckState => {
                if let Some(aircraft) = inputs.iter().find_map(|ev| match ev {
                    Event::AircraftState(state) => Some(*state),
                    _ => None,
                }) {
                    self.aircraft_state = aircraft;
                    self.in_tolerance = self.hover_criteria_met(&aircraft);
                    if self.in_tolerance {
                        self.stabilization_time -= self.polling_rate + e;
                        self.time_tolerance_met = self.stabilization_time == SimTime::ZERO;
                    } else {
                        self.stabilization_time =
                            SimTime::from_secs_f64(self.hover_criteria.time_tol);
                    }
                    self.state = State::Stabilizing;
                }
            }
            _ => {}
        }
    }

    /// A simultaneous cancel beats the pending internal step; any other
    /// coincidence lets the internal step run alone.
    fn confluent(&mut self, _e: SimTime, inputs: &Bag) {
        if inputs.iter().any(|ev| matches!(ev, Event::CancelHover)) {
            self.external(SimTime::ZERO, inputs);
        } else {
            self.internal();
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::RequestAircraftState => {
                bag.push(Event::RequestAircraftState);
            }
            State::InitHover => {
                bag.push(Event::FccCommandHover(FccCommand::reposition(
                    self.aircraft_state.gps_time,
                    (self.hover_criteria.desired_lat * 1e7) as i32,
                    (self.hover_criteria.desired_lon * 1e7) as i32,
                    self.hover_criteria.desired_alt_msl * FT_TO_METERS,
                )));
            }
            State::Stabilizing => {
                if self.time_tolerance_met && self.in_tolerance {
                    bag.push(Event::HoverCriteriaMet);
                    bag.push(Event::UpdateGcs(GcsUpdate::info("Came to hover!")));
                } else {
                    bag.push(Event::RequestAircraftState);
                }
            }
            _ => {}
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle | State::WaitStabilize | State::GetAircraftState | State::CheckState => {
                SimTime::INFINITY
            }
            State::RequestAircraftState | State::InitHover | State::Hover => SimTime::ZERO,
            State::Stabilizing => self.polling_rate,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
