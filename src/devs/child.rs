use super::atomic::Atomic;
use super::event::Bag;
use super::time::SimTime;

/// Scheduling envelope a composition keeps around each of its children:
/// the time of the child's last transition and of its next internal one,
/// both in the composition's time frame.
pub struct Child<M: Atomic> {
    pub model: M,
    t_last: SimTime,
    t_next: SimTime,
}

impl<M: Atomic> Child<M> {
    pub fn new(model: M) -> Self {
        let t_next = model.time_advance();
        Self {
            model,
            t_last: SimTime::ZERO,
            t_next,
        }
    }

    pub fn t_next(&self) -> SimTime {
        self.t_next
    }

    pub fn imminent(&self, t: SimTime) -> bool {
        self.t_next == t
    }

    /// Collects the child's output. Only valid when the child is imminent.
    pub fn emit(&mut self, sink: &mut Bag) {
        self.model.output(sink);
    }

    /// Applies the transition owed at time `t` given the routed input bag.
    pub fn deliver(&mut self, t: SimTime, inputs: &Bag) {
        if inputs.is_empty() {
            if self.imminent(t) {
                self.model.internal();
                self.reschedule(t);
            }
        } else if self.imminent(t) {
            let e = t - self.t_last;
            self.model.confluent(e, inputs);
            self.reschedule(t);
        } else {
            let e = t - self.t_last;
            self.model.external(e, inputs);
            self.reschedule(t);
        }
    }

    fn reschedule(&mut self, t: SimTime) {
        self.t_last = t;
        self.t_next = t + self.model.time_advance();
    }
}
