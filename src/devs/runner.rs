use std::collections::VecDeque;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::atomic::Atomic;
use super::event::{Bag, Event};
use super::time::SimTime;
use crate::{event, log};

/// Root coordinator: advances simulation time to the next internal event or
/// scheduled input, runs output-before-internal, resolves ties through the
/// model's confluent transition and records the traces.
pub struct Runner<M: Atomic> {
    model: M,
    t_last: SimTime,
    t_next: SimTime,
    schedule: VecDeque<(SimTime, Event)>,
    outputs: Vec<(SimTime, Event)>,
    state_sink: Option<fs::File>,
    messages_sink: Option<fs::File>,
}

#[derive(Debug, strum_macros::Display)]
pub enum RunnerError {
    ResultsDirUnavailable,
    SinkUnavailable,
}

impl<M: Atomic> Runner<M> {
    /// In-memory runner used by the scenario tests.
    pub fn new(model: M, mut schedule: Vec<(SimTime, Event)>) -> Self {
        schedule.sort_by_key(|(t, _)| *t);
        let t_next = model.time_advance();
        Self {
            model,
            t_last: SimTime::ZERO,
            t_next,
            schedule: schedule.into(),
            outputs: Vec::new(),
            state_sink: None,
            messages_sink: None,
        }
    }

    /// Runner writing `output_state.txt` and `output_messages.txt` into the
    /// given results directory, creating it if needed.
    pub fn with_sinks(
        model: M,
        schedule: Vec<(SimTime, Event)>,
        results_dir: &Path,
    ) -> Result<Self, RunnerError> {
        fs::create_dir_all(results_dir).map_err(|_| RunnerError::ResultsDirUnavailable)?;
        let state_sink =
            fs::File::create(results_dir.join("output_state.txt")).map_err(|_| RunnerError::SinkUnavailable)?;
        let messages_sink = fs::File::create(results_dir.join("output_messages.txt"))
            .map_err(|_| RunnerError::SinkUnavailable)?;
        let mut runner = Self::new(model, schedule);
        runner.state_sink = Some(state_sink);
        runner.messages_sink = Some(messages_sink);
        Ok(runner)
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn outputs(&self) -> &[(SimTime, Event)] {
        &self.outputs
    }

    /// Runs until the model passivates and no scheduled inputs remain.
    pub fn run_until_passivate(&mut self) {
        self.log_state(SimTime::ZERO);
        loop {
            let next_input = self.schedule.front().map_or(SimTime::INFINITY, |(t, _)| *t);
            let t = self.t_next.min(next_input);
            if t.is_infinite() {
                break;
            }

            let mut inputs = Bag::new();
            while self.schedule.front().is_some_and(|(st, _)| *st == t) {
                let (_, ev) = self.schedule.pop_front().unwrap();
                inputs.push(ev);
            }

            if t == self.t_next {
                let mut out = Bag::new();
                self.model.output(&mut out);
                self.log_messages(t, &out);
                for ev in out {
                    self.outputs.push((t, ev));
                }
                if inputs.is_empty() {
                    self.model.internal();
                } else {
                    let e = t - self.t_last;
                    self.model.confluent(e, &inputs);
                }
            } else {
                self.model.external(t - self.t_last, &inputs);
            }

            self.t_last = t;
            self.t_next = t + self.model.time_advance();
            self.log_state(t);
        }
        log!("Simulation passivated at {}", self.t_last);
    }

    fn log_state(&mut self, t: SimTime) {
        let mut lines = Vec::new();
        self.model.state_lines("supervisor", &mut lines);
        if let Some(sink) = self.state_sink.as_mut() {
            let _ = writeln!(sink, "{t}");
            for line in &lines {
                let _ = writeln!(sink, "{line}");
            }
        }
    }

    fn log_messages(&mut self, t: SimTime, out: &Bag) {
        if out.is_empty() {
            return;
        }
        for ev in out {
            event!("{t} {ev:?}");
        }
        if let Some(sink) = self.messages_sink.as_mut() {
            let _ = writeln!(sink, "{t}");
            for ev in out {
                let _ = writeln!(sink, "{ev:?}");
            }
        }
    }
}
