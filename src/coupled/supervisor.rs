use crate::devs::atomic::Atomic;
use crate::devs::child::Child;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;

use super::landing::{Landing, LandingTimers};
use super::on_route::OnRoute;
use super::takeoff::Takeoff;

/// Top-level supervisor: the takeoff, on-route and landing phases run side
/// by side; `start_mission` from the takeoff phase arms the other two.
pub struct Supervisor {
    takeoff: Child<Takeoff>,
    on_route: Child<OnRoute>,
    landing: Child<Landing>,
    clock: SimTime,
    pending_t: Option<SimTime>,
    out_takeoff: Bag,
    out_on_route: Bag,
    out_landing: Bag,
}

impl Supervisor {
    pub fn new(timers: LandingTimers) -> Self {
        Self {
            takeoff: Child::new(Takeoff::new()),
            on_route: Child::new(OnRoute::new()),
            landing: Child::new(Landing::new(timers)),
            clock: SimTime::ZERO,
            pending_t: None,
            out_takeoff: Bag::new(),
            out_on_route: Bag::new(),
            out_landing: Bag::new(),
        }
    }

    pub fn takeoff(&self) -> &Takeoff {
        &self.takeoff.model
    }

    pub fn on_route(&self) -> &OnRoute {
        &self.on_route.model
    }

    pub fn landing(&self) -> &Landing {
        &self.landing.model
    }

    fn next_event_time(&self) -> SimTime {
        self.takeoff
            .t_next()
            .min(self.on_route.t_next())
            .min(self.landing.t_next())
    }

    fn round(&mut self, t: SimTime, inputs: &Bag) {
        let mut to_takeoff = Bag::new();
        let mut to_on_route = Bag::new();
        let mut to_landing = Bag::new();

        for ev in inputs {
            match ev {
                Event::AircraftState(_) => {
                    to_takeoff.push(ev.clone());
                    to_landing.push(ev.clone());
                }
                Event::PerceptionStatus(_) | Event::StartSupervisor(_) => {
                    to_takeoff.push(ev.clone());
                }
                Event::Waypoint(_) => to_on_route.push(ev.clone()),
                Event::PilotTakeover => {
                    to_on_route.push(ev.clone());
                    to_landing.push(ev.clone());
                }
                Event::LandingAchieved | Event::LpRecv(_) | Event::PlpAch(_) => {
                    to_landing.push(ev.clone());
                }
                _ => {}
            }
        }

        // start_mission fans out from the takeoff phase to the others.
        for ev in &self.out_takeoff {
            if let Event::StartMission(_) = ev {
                to_on_route.push(ev.clone());
                to_landing.push(ev.clone());
            }
        }

        self.takeoff.deliver(t, &to_takeoff);
        self.on_route.deliver(t, &to_on_route);
        self.landing.deliver(t, &to_landing);

        self.out_takeoff.clear();
        self.out_on_route.clear();
        self.out_landing.clear();
        self.clock = t;
    }
}

impl Atomic for Supervisor {
    fn internal(&mut self) {
        let t = self.pending_t.take().expect("[FATAL] Internal transition without prior output!");
        self.round(t, &Bag::new());
    }

    fn external(&mut self, e: SimTime, inputs: &Bag) {
        let t = self.clock + e;
        self.round(t, inputs);
    }

    fn confluent(&mut self, _e: SimTime, inputs: &Bag) {
        let t = self.pending_t.take().expect("[FATAL] Confluent transition without prior output!");
        self.round(t, inputs);
    }

    fn output(&mut self, bag: &mut Bag) {
        let t = self.clock + self.time_advance();
        self.pending_t = Some(t);
        if self.takeoff.imminent(t) {
            self.takeoff.emit(&mut self.out_takeoff);
        }
        if self.on_route.imminent(t) {
            self.on_route.emit(&mut self.out_on_route);
        }
        if self.landing.imminent(t) {
            self.landing.emit(&mut self.out_landing);
        }

        for ev in &self.out_takeoff {
            match ev {
                Event::RequestAircraftState
                | Event::SetMissionMonitorStatus(_)
                | Event::UpdateGcs(_)
                | Event::StartMission(_) => bag.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_on_route {
            if let Event::FccWaypointUpdate(_) = ev {
                bag.push(ev.clone());
            }
        }
        for ev in &self.out_landing {
            match ev {
                Event::RequestAircraftState
                | Event::ControlYielded
                | Event::FccCommandHover(_)
                | Event::FccCommandLand(_)
                | Event::FccCommandOrbit(_)
                | Event::FccCommandVelocity(_)
                | Event::LpExpired(_)
                | Event::LpNew(_)
                | Event::MissionComplete
                | Event::NotifyPilot
                | Event::SetMissionMonitorStatus(_)
                | Event::UpdateBoss(_)
                | Event::UpdateGcs(_)
                | Event::UpdateMissionItem => bag.push(ev.clone()),
                _ => {}
            }
        }
    }

    fn time_advance(&self) -> SimTime {
        self.next_event_time() - self.clock
    }

    fn state_name(&self) -> String {
        format!(
            "{}|{}|{}",
            self.takeoff.model.state_name(),
            self.on_route.model.state_name(),
            self.landing.model.state_name()
        )
    }

    fn state_lines(&self, name: &str, lines: &mut Vec<String>) {
        self.takeoff.model.state_lines(&format!("{name}.takeoff"), lines);
        self.on_route.model.state_lines(&format!("{name}.on_route"), lines);
        self.landing.model.state_lines(&format!("{name}.landing"), lines);
    }
}
