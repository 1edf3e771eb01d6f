use crate::devs::atomic::Atomic;
use crate::devs::child::Child;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::models::handle_waypoint::HandleWaypoint;

/// On-route composition: a single waypoint forwarder.
pub struct OnRoute {
    handle_waypoint: Child<HandleWaypoint>,
    clock: SimTime,
    pending_t: Option<SimTime>,
    out_handle_waypoint: Bag,
}

impl OnRoute {
    pub fn new() -> Self {
        Self {
            handle_waypoint: Child::new(HandleWaypoint::new()),
            clock: SimTime::ZERO,
            pending_t: None,
            out_handle_waypoint: Bag::new(),
        }
    }

    pub fn handle_waypoint(&self) -> &HandleWaypoint {
        &self.handle_waypoint.model
    }

    fn round(&mut self, t: SimTime, inputs: &Bag) {
        let mut to_handle_waypoint = Bag::new();
        for ev in inputs {
            match ev {
                Event::PilotTakeover | Event::StartMission(_) | Event::Waypoint(_) => {
                    to_handle_waypoint.push(ev.clone());
                }
                _ => {}
            }
        }
        self.handle_waypoint.deliver(t, &to_handle_waypoint);
        self.out_handle_waypoint.clear();
        self.clock = t;
    }
}

impl Default for OnRoute {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for OnRoute {
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
        if self.handle_waypoint.imminent(t) {
            self.handle_waypoint.emit(&mut self.out_handle_waypoint);
        }
        for ev in &self.out_handle_waypoint {
            if let Event::FccWaypointUpdate(_) = ev {
                bag.push(ev.clone());
            }
        }
    }

    fn time_advance(&self) -> SimTime {
        self.handle_waypoint.t_next() - self.clock
    }

    fn state_name(&self) -> String {
        self.handle_waypoint.model.state_name()
    }

    fn state_lines(&self, name: &str, lines: &mut Vec<String>) {
        self.handle_waypoint
            .model
            .state_lines(&format!("{name}.handle_waypoint"), lines);
    }
}
