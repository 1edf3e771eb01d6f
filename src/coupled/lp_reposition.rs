use crate::devs::atomic::Atomic;
use crate::devs::child::Child;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::models::command_reposition::CommandReposition;
use crate::models::landing_routine::LandingRoutine;
use crate::models::reposition_timer::RepositionTimer;

/// Reposition-and-land composition: `Reposition_Timer` budgets the attempt,
/// `Command_Reposition` drives the aircraft, `Landing_Routine` finishes the
/// mission.
pub struct LpReposition {
    landing_routine: Child<LandingRoutine>,
    command_reposition: Child<CommandReposition>,
    reposition_timer: Child<RepositionTimer>,
    clock: SimTime,
    pending_t: Option<SimTime>,
    out_landing_routine: Bag,
    out_command_reposition: Bag,
    out_reposition_timer: Bag,
}

impl LpReposition {
    pub fn new(repo_time: SimTime, upd_time: SimTime) -> Self {
        Self {
            landing_routine: Child::new(LandingRoutine::new()),
            command_reposition: Child::new(CommandReposition::new()),
            reposition_timer: Child::new(RepositionTimer::new(repo_time, upd_time)),
            clock: SimTime::ZERO,
            pending_t: None,
            out_landing_routine: Bag::new(),
            out_command_reposition: Bag::new(),
            out_reposition_timer: Bag::new(),
        }
    }

    pub fn landing_routine(&self) -> &LandingRoutine {
        &self.landing_routine.model
    }

    pub fn command_reposition(&self) -> &CommandReposition {
        &self.command_reposition.model
    }

    pub fn reposition_timer(&self) -> &RepositionTimer {
        &self.reposition_timer.model
    }

    fn next_event_time(&self) -> SimTime {
        self.landing_routine
            .t_next()
            .min(self.command_reposition.t_next())
            .min(self.reposition_timer.t_next())
    }

    /// One delivery round at time `t`: routes external inputs and the
    /// already-collected imminent outputs, then transitions every child.
    fn round(&mut self, t: SimTime, inputs: &Bag) {
        let mut to_landing_routine = Bag::new();
        let mut to_command_reposition = Bag::new();
        let mut to_reposition_timer = Bag::new();

        for ev in inputs {
            match ev {
                Event::LandingAchieved => to_landing_routine.push(ev.clone()),
                Event::PilotTakeover => {
                    to_landing_routine.push(ev.clone());
                    to_command_reposition.push(ev.clone());
                    to_reposition_timer.push(ev.clone());
                }
                Event::StartMission(_) => {
                    to_landing_routine.push(ev.clone());
                    to_command_reposition.push(ev.clone());
                    to_reposition_timer.push(ev.clone());
                }
                Event::HoverCriteriaMet | Event::AircraftState(_) => {
                    to_command_reposition.push(ev.clone());
                }
                Event::ControlYielded | Event::LpNew(_) => {
                    to_reposition_timer.push(ev.clone());
                }
                _ => {}
            }
        }

        for ev in &self.out_command_reposition {
            if let Event::LpCriteriaMet(_) = ev {
                to_reposition_timer.push(ev.clone());
            }
        }
        for ev in &self.out_reposition_timer {
            match ev {
                Event::Land(_) => to_landing_routine.push(ev.clone()),
                Event::PilotHandover(_) | Event::RequestReposition(_) => {
                    to_command_reposition.push(ev.clone());
                }
                _ => {}
            }
        }

        self.landing_routine.deliver(t, &to_landing_routine);
        self.command_reposition.deliver(t, &to_command_reposition);
        self.reposition_timer.deliver(t, &to_reposition_timer);

        self.out_landing_routine.clear();
        self.out_command_reposition.clear();
        self.out_reposition_timer.clear();
        self.clock = t;
    }
}

impl Atomic for LpReposition {
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
        if self.landing_routine.imminent(t) {
            self.landing_routine.emit(&mut self.out_landing_routine);
        }
        if self.command_reposition.imminent(t) {
            self.command_reposition.emit(&mut self.out_command_reposition);
        }
        if self.reposition_timer.imminent(t) {
            self.reposition_timer.emit(&mut self.out_reposition_timer);
        }

        for ev in &self.out_landing_routine {
            match ev {
                Event::FccCommandLand(_)
                | Event::MissionComplete
                | Event::UpdateMissionItem
                | Event::UpdateBoss(_)
                | Event::UpdateGcs(_) => bag.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_command_reposition {
            match ev {
                Event::CancelHover
                | Event::StabilizeAt(_)
                | Event::FccCommandVelocity(_)
                | Event::SetMissionMonitorStatus(_)
                | Event::RequestAircraftState
                | Event::UpdateBoss(_)
                | Event::UpdateGcs(_) => bag.push(ev.clone()),
                _ => {}
            }
        }
        for ev in &self.out_reposition_timer {
            match ev {
                Event::CancelHover
                | Event::PilotHandover(_)
                | Event::UpdateBoss(_)
                | Event::UpdateGcs(_) => bag.push(ev.clone()),
                _ => {}
            }
        }
    }

    fn time_advance(&self) -> SimTime {
        self.next_event_time() - self.clock
    }

    fn state_name(&self) -> String {
        format!(
            "{}/{}/{}",
            self.reposition_timer.model.state_name(),
            self.command_reposition.model.state_name(),
            self.landing_routine.model.state_name()
        )
    }

    fn state_lines(&self, name: &str, lines: &mut Vec<String>) {
        self.landing_routine
            .model
            .state_lines(&format!("{name}.landing_routine"), lines);
        self.command_reposition
            .model
            .state_lines(&format!("{name}.command_reposition"), lines);
        self.reposition_timer
            .model
            .state_lines(&format!("{name}.reposition_timer"), lines);
    }
}
