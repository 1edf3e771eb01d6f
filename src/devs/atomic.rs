use super::event::Bag;
use super::time::SimTime;

/// Interface every model in the hierarchy exposes to its coordinator.
///
/// The host calls `output` exactly once, immediately before `internal` (or
/// `confluent`) whenever the model is imminent. Output implementations must
/// not change the model state; all state changes happen in the transition
/// functions.
pub trait Atomic {
    /// Spontaneous transition taken when the time advance elapses.
    fn internal(&mut self);

    /// Transition taken on input events, `e` being the time elapsed since
    /// the last transition.
    fn external(&mut self, e: SimTime, inputs: &Bag);

    /// Tie-break when an internal and an external transition coincide.
    fn confluent(&mut self, _e: SimTime, inputs: &Bag) {
        self.internal();
        self.external(SimTime::ZERO, inputs);
    }

    /// Emits the output bag computed from the current state.
    fn output(&mut self, bag: &mut Bag);

    /// Delay until the next spontaneous transition; infinity passivates.
    fn time_advance(&self) -> SimTime;

    /// Name of the current state for the state trace.
    fn state_name(&self) -> String;

    /// State trace lines, one per atomic model. Compositions override this
    /// to recurse with qualified names.
    fn state_lines(&self, name: &str, lines: &mut Vec<String>) {
        lines.push(format!("[{name}] State: {}", self.state_name()));
    }
}
