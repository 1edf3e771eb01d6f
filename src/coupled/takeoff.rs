use crate::devs::atomic::Atomic;
use crate::devs::child::Child;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::models::cache_input::CacheInput;
use crate::models::mission_initialization::MissionInitialization;

/// Takeoff-phase composition: mission initialization gated by the cached
/// perception status.
pub struct Takeoff {
    mission_initialization: Child<MissionInitialization>,
    cache_input: Child<CacheInput>,
    clock: SimTime,
    pending_t: Option<SimTime>,
    out_mission_initialization: Bag,
    out_cache_input: Bag,
}

impl Takeoff {
    pub fn new() -> Self {
        Self {
            mission_initialization: Child::new(MissionInitialization::new()),
            cache_input: Child::new(CacheInput::new(false)),
            clock: SimTime::ZERO,
            pending_t: None,
            out_mission_initialization: Bag::new(),
            out_cache_input: Bag::new(),
        }
    }

    pub fn mission_initialization(&self) -> &MissionInitialization {
        &self.mission_initialization.model
    }

    pub fn cache_input(&self) -> &CacheInput {
        &self.cache_input.model
    }

    fn next_event_time(&self) -> SimTime {
        self.mission_initialization.t_next().min(self.cache_input.t_next())
    }

    fn round(&mut self, t: SimTime, inputs: &Bag) {
        let mut to_mission_initialization = Bag::new();
        let mut to_cache_input = Bag::new();

        for ev in inputs {
            match ev {
                Event::AircraftState(_) | Event::StartSupervisor(_) => {
                    to_mission_initialization.push(ev.clone());
                }
                Event::PerceptionStatus(_) => to_cache_input.push(ev.clone()),
                _ => {}
            }
        }

        for ev in &self.out_mission_initialization {
            if let Event::RequestPerceptionStatus = ev {
                to_cache_input.push(ev.clone());
            }
        }
        for ev in &self.out_cache_input {
            if let Event::CachedPerceptionStatus(_) = ev {
                to_mission_initialization.push(ev.clone());
            }
        }

        self.mission_initialization.deliver(t, &to_mission_initialization);
        self.cache_input.deliver(t, &to_cache_input);

        self.out_mission_initialization.clear();
        self.out_cache_input.clear();
        self.clock = t;
    }
}

impl Default for Takeoff {
    fn default() -> Self {
        Self::new()
    }
}

impl Atomic for Takeoff {
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
        if self.mission_initialization.imminent(t) {
            self.mission_initialization.emit(&mut self.out_mission_initialization);
        }
        if self.cache_input.imminent(t) {
            self.cache_input.emit(&mut self.out_cache_input);
        }

        for ev in &self.out_mission_initialization {
            match ev {
                Event::RequestAircraftState
                | Event::SetMissionMonitorStatus(_)
                | Event::UpdateGcs(_)
                | Event::StartMission(_) => bag.push(ev.clone()),
                _ => {}
            }
        }
    }

    fn time_advance(&self) -> SimTime {
        self.next_event_time() - self.clock
    }

    fn state_name(&self) -> String {
        self.mission_initialization.model.state_name()
    }

    fn state_lines(&self, name: &str, lines: &mut Vec<String>) {
        self.mission_initialization
            .model
            .state_lines(&format!("{name}.mission_initialization"), lines);
        self.cache_input.model.state_lines(&format!("{name}.cache_input"), lines);
    }
}
