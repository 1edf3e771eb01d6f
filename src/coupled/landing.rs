use crate::devs::atomic::Atomic;
use crate::devs::child::Child;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::models::handover_control::HandoverControl;
use crate::models::lp_manager::LpManager;
use crate::models::stabilize::Stabilize;

use super::lp_reposition::LpReposition;

/// Landing-phase composition wiring `LP_Manager`, `Stabilize`,
/// `Handover_Control` and the `LP_Reposition` sub-composition.
pub struct Landing {
    lp_manager: Child<LpManager>,
    stabilize: Child<Stabilize>,
    handover_control: Child<HandoverControl>,
    lp_reposition: Child<LpReposition>,
    clock: SimTime,
    pending_t: Option<SimTime>,
    out_lp_manager: Bag,
    out_stabilize: Bag,
    out_handover_control: Bag,
    out_lp_reposition: Bag,
}

/// Timer lengths handed to the submodels at construction.
pub struct LandingTimers {
    pub lp_accept_time: SimTime,
    pub orbit_time: SimTime,
    pub repo_time: SimTime,
    pub upd_time: SimTime,
    pub stabilize_polling_rate: SimTime,
}

impl Landing {
    pub fn new(timers: LandingTimers) -> Self {
        Self {
            lp_manager: Child::new(LpManager::new(timers.lp_accept_time, timers.orbit_time)),
            stabilize: Child::new(Stabilize::new(timers.stabilize_polling_rate)),
            handover_control: Child::new(HandoverControl::new()),
            lp_reposition: Child::new(LpReposition::new(timers.repo_time, timers.upd_time)),
            clock: SimTime::ZERO,
            pending_t: None,
            out_lp_manager: Bag::new(),
            out_stabilize: Bag::new(),
            out_handover_control: Bag::new(),
            out_lp_reposition: Bag::new(),
        }
    }

    pub fn lp_manager(&self) -> &LpManager {
        &self.lp_manager.model
    }

    pub fn stabilize(&self) -> &Stabilize {
        &self.stabilize.model
    }

    pub fn handover_control(&self) -> &HandoverControl {
        &self.handover_control.model
    }

    pub fn lp_reposition(&self) -> &LpReposition {
        &self.lp_reposition.model
    }

    fn next_event_time(&self) -> SimTime {
        self.lp_manager
            .t_next()
            .min(self.stabilize.t_next())
            .min(self.handover_control.t_next())
            .min(self.lp_reposition.t_next())
    }

    fn round(&mut self, t: SimTime, inputs: &Bag) {
        let mut to_lp_manager = Bag::new();
        let mut to_stabilize = Bag::new();
        let mut to_handover_control = Bag::new();
        let mut to_lp_reposition = Bag::new();

        for ev in inputs {
            match ev {
                Event::LpRecv(_) | Event::PlpAch(_) => to_lp_manager.push(ev.clone()),
                // Stabilize has no takeover port; it is silenced by the
                // cancel-hover couplings instead.
                Event::PilotTakeover => {
                    to_lp_manager.push(ev.clone());
                    to_lp_reposition.push(ev.clone());
                    to_handover_control.push(ev.clone());
                }
                Event::AircraftState(_) => {
                    to_lp_manager.push(ev.clone());
                    to_lp_reposition.push(ev.clone());
                    to_stabilize.push(ev.clone());
                }
                Event::StartMission(_) => {
                    to_lp_manager.push(ev.clone());
                    to_lp_reposition.push(ev.clone());
                    to_stabilize.push(ev.clone());
                    to_handover_control.push(ev.clone());
                }
                Event::LandingAchieved => to_lp_reposition.push(ev.clone()),
                _ => {}
            }
        }

        for ev in &self.out_lp_manager {
            match ev {
                Event::LpNew(_) => to_lp_reposition.push(ev.clone()),
                Event::PilotHandover(_) => to_handover_control.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_lp_reposition {
            match ev {
                Event::CancelHover | Event::StabilizeAt(_) => to_stabilize.push(ev.clone()),
                Event::PilotHandover(_) => to_handover_control.push(ev.clone()),
                Event::FccCommandLand(_) => to_lp_manager.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_stabilize {
            if let Event::HoverCriteriaMet = ev {
                to_handover_control.push(ev.clone());
                to_lp_reposition.push(ev.clone());
            }
        }
        for ev in &self.out_handover_control {
            match ev {
                Event::ControlYielded => {
                    to_lp_manager.push(ev.clone());
                    to_lp_reposition.push(ev.clone());
                }
                Event::StabilizeAt(_) => to_stabilize.push(ev.clone()),
                _ => {}
            }
        }

        self.lp_manager.deliver(t, &to_lp_manager);
        self.stabilize.deliver(t, &to_stabilize);
        self.handover_control.deliver(t, &to_handover_control);
        self.lp_reposition.deliver(t, &to_lp_reposition);

        self.out_lp_manager.clear();
        self.out_stabilize.clear();
        self.out_handover_control.clear();
        self.out_lp_reposition.clear();
        self.clock = t;
    }
}

impl Atomic for Landing {
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
        if self.lp_manager.imminent(t) {
            self.lp_manager.emit(&mut self.out_lp_manager);
        }
        if self.stabilize.imminent(t) {
            self.stabilize.emit(&mut self.out_stabilize);
        }
        if self.handover_control.imminent(t) {
            self.handover_control.emit(&mut self.out_handover_control);
        }
        if self.lp_reposition.imminent(t) {
            self.lp_reposition.emit(&mut self.out_lp_reposition);
        }

        for ev in &self.out_lp_manager {
            match ev {
                Event::FccCommandOrbit(_)
                | Event::LpExpired(_)
                | Event::LpNew(_)
                | Event::UpdateBoss(_)
                | Event::UpdateGcs(_)
                | Event::RequestAircraftState
                | Event::SetMissionMonitorStatus(_) => bag.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_lp_reposition {
            match ev {
                Event::FccCommandLand(_)
                | Event::FccCommandVelocity(_)
                | Event::MissionComplete
                | Event::RequestAircraftState
                | Event::SetMissionMonitorStatus(_)
                | Event::UpdateBoss(_)
                | Event::UpdateGcs(_)
                | Event::UpdateMissionItem => bag.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_handover_control {
            match ev {
                Event::ControlYielded | Event::NotifyPilot => bag.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_stabilize {
            match ev {
                Event::FccCommandHover(_) | Event::RequestAircraftState | Event::UpdateGcs(_) => {
                    bag.push(ev.clone());
                }
                _ => {}
            }
        }
    }

    fn time_advance(&self) -> SimTime {
        self.next_event_time() - self.clock
    }

    fn state_name(&self) -> String {
        format!(
            "{}|{}",
            self.lp_manager.model.state_name(),
            self.lp_reposition.model.state_name()
        )
    }

    fn state_lines(&self, name: &str, lines: &mut Vec<String>) {
        self.lp_manager.model.state_lines(&format!("{name}.lp_manager"), lines);
        self.stabilize.model.state_lines(&format!("{name}.stabilize"), lines);
        self.handover_control
            .model
            .state_lines(&format!("{name}.handover_control"), lines);
        self.lp_reposition
            .model
            .state_lines(&format!("{name}.lp_reposition"), lines);
    }
}
