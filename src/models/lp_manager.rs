use strum_macros::{Display, EnumString};

use crate::constants::{
    DEFAULT_ACCEPTANCE_RADIUS_HORZ_M, DEFAULT_HOVER_ALTITUDE_AGL_FT, DEFAULT_ORBIT_RADIUS_M,
    DEFAULT_ORBIT_VELOCITY_KTS, FT_TO_METERS, LP_SEPARATION_M,
};
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::fatal;
use crate::messages::{
    AircraftState, BossUpdate, FccCommand, GcsUpdate, LandingPoint, OrbitYawBehaviour,
};
use crate::util::distance_wgs84;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    WaitLpPlp,
    RequestStatePlp,
    GetStatePlp,
    RequestStateLp,
    GetStateLp,
    StartLzeScan,
    LzeScan,
    HandoverControl,
    PilotControl,
    NotifyLp,
    LpApproach,
    LpAcceptExp,
}

/// Landing point manager: between "planned landing point achieved" and the
/// first valid landing point, commands an orbit over the planned point,
/// validates incoming candidates and bounds the total accept window.
pub struct LpManager {
    state: State,
    /// Waypoint number reused on every accepted LP for display continuity.
    first_waypoint_number: i32,
    lp_count: i32,
    mission_number: i32,
    lp: LandingPoint,
    plp: LandingPoint,
    aircraft_state: AircraftState,
    /// Remaining accept window, decremented while soliciting LPs.
    lp_accept_time: SimTime,
    lp_accept_duration: SimTime,
    orbit_time: SimTime,
}

impl LpManager {
    pub fn new(lp_accept_time: SimTime, orbit_time: SimTime) -> Self {
        Self {
            state: State::Idle,
            first_waypoint_number: -1,
            lp_count: 0,
            mission_number: 0,
            lp: LandingPoint::default(),
            plp: LandingPoint::default(),
            aircraft_state: AircraftState::default(),
            lp_accept_time,
            lp_accept_duration: lp_accept_time,
            orbit_time,
        }
    }

    pub fn with_state(lp_accept_time: SimTime, orbit_time: SimTime, initial_state: State) -> Self {
        Self {
            state: initial_state,
            ..Self::new(lp_accept_time, orbit_time)
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn lp_count(&self) -> i32 {
        self.lp_count
    }

    pub fn current_lp(&self) -> &LandingPoint {
        &self.lp
    }

    /// Latches the first acceptable landing point out of the received batch.
    ///
    /// The very first LP of a mission is the newest of the batch; afterwards
    /// candidates are scanned in arrival order and the first one separated by
    /// at least `LP_SEPARATION_M` from the previous LP wins. Returns false
    /// when the whole batch is too close.
    fn set_lp_if_valid(&mut self, inputs: &Bag) -> bool {
        let batch: Vec<LandingPoint> = inputs
            .iter()
            .filter_map(|ev| match ev {
                Event::LpRecv(lp) => Some(*lp),
                _ => None,
            })
            .collect();
        let accepted = if self.lp_count == 0 {
            batch.last().copied()
        } else {
            batch
                .iter()
                .find(|candidate| {
                    let (distance_xy, _) = distance_wgs84(
                        self.lp.lat,
                        self.lp.lon,
                        self.lp.alt * FT_TO_METERS,
                        candidate.lat,
                        candidate.lon,
                        candidate.alt * FT_TO_METERS,
                    );
                    f64::from(distance_xy) >= LP_SEPARATION_M
                })
                .copied()
        };
        if let Some(new_lp) = accepted {
            self.lp = new_lp;
            self.lp_count += 1;
            self.lp.id = self.lp_count;
        }
        accepted.is_some()
    }

    /// Floors the hover altitude so the aircraft never orbits or hovers
    /// below `DEFAULT_HOVER_ALTITUDE_AGL_FT` above ground.
    fn hover_safe_altitude(aircraft: &AircraftState) -> f32 {
        if aircraft.alt_agl < DEFAULT_HOVER_ALTITUDE_AGL_FT {
            aircraft.alt_msl - aircraft.alt_agl + DEFAULT_HOVER_ALTITUDE_AGL_FT
        } else {
            aircraft.alt_msl
        }
    }

    fn update_lp_accept_time(&mut self, e: SimTime) {
        if matches!(
            self.state,
            State::RequestStateLp | State::GetStateLp | State::NotifyLp | State::LpApproach
        ) {
            self.lp_accept_time -= e;
        }
    }

    fn reset_mission_state(&mut self) {
        self.lp_accept_time = self.lp_accept_duration;
        self.mission_number = 0;
        self.lp_count = 0;
    }
}

impl Atomic for LpManager {
    fn internal(&mut self) {
        self.state = match self.state {
            State::StartLzeScan => State::LzeScan,
            State::RequestStateLp => State::GetStateLp,
            State::RequestStatePlp => State::GetStatePlp,
            State::LzeScan => State::HandoverControl,
            State::NotifyLp => State::LpApproach,
            State::LpApproach => State::LpAcceptExp,
            other => other,
        };
    }

    fn external(&mut self, e: SimTime, inputs: &Bag) {
        let received_pilot_takeover = inputs.iter().any(|ev| matches!(ev, Event::PilotTakeover));
        if received_pilot_takeover && self.state != State::HandoverControl {
            self.state = State::PilotControl;
            return;
        }

        let start_mission = inputs.iter().rev().find_map(|ev| match ev {
            Event::StartMission(mission) => Some(*mission),
            _ => None,
        });
        if let Some(mission_number) = start_mission {
            self.reset_mission_state();
            self.mission_number = mission_number;
            self.state = State::WaitLpPlp;
            return;
        }

        self.update_lp_accept_time(e);

        match self.state {
            State::WaitLpPlp => {
                let received_lp = inputs.iter().any(|ev| matches!(ev, Event::LpRecv(_)));
                let plp_ach = inputs.iter().find_map(|ev| match ev {
                    Event::PlpAch(plp) => Some(*plp),
                    _ => None,
                });
                if received_lp {
                    if self.set_lp_if_valid(inputs) {
                        self.first_waypoint_number = if plp_ach.is_some() {
                            self.lp.mission_item_no
                        } else {
                            self.lp.mission_item_no + 1
                        };
                        self.lp.mission_item_no = self.first_waypoint_number;
                        self.state = State::RequestStateLp;
                    }
                } else if let Some(plp) = plp_ach {
                    self.plp = plp;
                    self.first_waypoint_number = plp.mission_item_no;
                    self.state = State::RequestStatePlp;
                }
            }
            State::LzeScan => {
                let received_lp = inputs.iter().any(|ev| matches!(ev, Event::LpRecv(_)));
                if received_lp && self.set_lp_if_valid(inputs) {
                    self.state = State::RequestStateLp;
                }
            }
            State::GetStatePlp => {
                if let Some(aircraft) = inputs.iter().find_map(|ev| match ev {
                    Event::AircraftState(state) => Some(*state),
                    _ => None,
                }) {
                    self.aircraft_state = aircraft;
                    self.plp.alt = Self::hover_safe_altitude(&aircraft);
                    self.state = State::StartLzeScan;
                }
            }
            State::GetStateLp => {
                if let Some(aircraft) = inputs.iter().find_map(|ev| match ev {
                    Event::AircraftState(state) => Some(*state),
                    _ => None,
                }) {
                    self.aircraft_state = aircraft;
                    self.lp.alt = Self::hover_safe_altitude(&aircraft);
                    self.state = State::NotifyLp;
                }
            }
            State::HandoverControl => {
                if inputs.iter().any(|ev| matches!(ev, Event::ControlYielded)) {
                    self.state = State::PilotControl;
                }
            }
            State::LpApproach => {
                let received_command_land =
                    inputs.iter().any(|ev| matches!(ev, Event::FccCommandLand(_)));
                let received_lp = inputs.iter().any(|ev| matches!(ev, Event::LpRecv(_)));
                if received_command_land {
                    self.state = State::LpAcceptExp;
                } else if received_lp && self.set_lp_if_valid(inputs) {
                    self.lp.mission_item_no = self.first_waypoint_number;
                    self.state = State::RequestStateLp;
                }
            }
            _ => {}
        }
    }

    fn confluent(&mut self, _e: SimTime, inputs: &Bag) {
        let received_pilot_takeover = inputs.iter().any(|ev| matches!(ev, Event::PilotTakeover));
        if received_pilot_takeover {
            self.external(SimTime::ZERO, inputs);
            self.internal();
        } else {
            self.internal();
            self.external(SimTime::ZERO, inputs);
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        match self.state {
            State::StartLzeScan => {
                bag.push(Event::FccCommandOrbit(FccCommand::orbit(
                    self.aircraft_state.gps_time,
                    (self.plp.lat * 1e7) as i32,
                    (self.plp.lon * 1e7) as i32,
                    self.plp.alt * FT_TO_METERS,
                    DEFAULT_ORBIT_RADIUS_M,
                    DEFAULT_ORBIT_VELOCITY_KTS,
                    OrbitYawBehaviour::HoldFrontTangentToCircle,
                )));
                bag.push(Event::UpdateGcs(GcsUpdate::info("Starting an orbit to scan LZ")));
                bag.push(Event::UpdateBoss(BossUpdate::mission_item(
                    self.mission_number,
                    self.plp.mission_item_no,
                    self.plp.lat,
                    self.plp.lon,
                    self.plp.alt * FT_TO_METERS,
                    self.plp.hdg,
                    0.1,
                    DEFAULT_ACCEPTANCE_RADIUS_HORZ_M,
                    0.0,
                    "LZ SCAN",
                )));
                bag.push(Event::SetMissionMonitorStatus(0));
            }
            State::LzeScan => {
                bag.push(Event::UpdateGcs(GcsUpdate::alert(
                    "Landing point not found. Hovering over PLP",
                )));
                bag.push(Event::UpdateBoss(BossUpdate::mission_item(
                    self.mission_number,
                    self.plp.mission_item_no,
                    self.plp.lat,
                    self.plp.lon,
                    self.plp.alt * FT_TO_METERS,
                    self.plp.hdg,
                    0.1,
                    DEFAULT_ACCEPTANCE_RADIUS_HORZ_M,
                    0.0,
                    "MAN CTRL",
                )));
                bag.push(Event::PilotHandover(self.plp));
            }
            State::NotifyLp => {
                if self.lp_count == 1 {
                    bag.push(Event::UpdateGcs(GcsUpdate::info("LP timer started")));
                }
                bag.push(Event::LpNew(self.lp));
            }
            State::LpApproach => {
                bag.push(Event::LpExpired(self.lp));
                bag.push(Event::UpdateGcs(GcsUpdate::info("LP accept timer expired")));
            }
            State::RequestStateLp | State::RequestStatePlp => {
                bag.push(Event::RequestAircraftState);
            }
            other => fatal!("Unhandled LP_Manager output in state {other}"),
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle
            | State::WaitLpPlp
            | State::GetStatePlp
            | State::GetStateLp
            | State::HandoverControl
            | State::PilotControl
            | State::LpAcceptExp => SimTime::INFINITY,
            State::StartLzeScan
            | State::NotifyLp
            | State::RequestStateLp
            | State::RequestStatePlp => SimTime::ZERO,
            State::LzeScan => self.orbit_time,
            State::LpApproach => self.lp_accept_time,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
