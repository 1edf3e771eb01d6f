use strum_macros::Display;

use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum State {
    Idle,
    SendCached,
}

/// Latest-value cache for the perception status: stores every
/// `PerceptionStatus` input and answers `RequestPerceptionStatus` demands
/// with the cached value.
pub struct CacheInput {
    state: State,
    cached: bool,
}

impl CacheInput {
    pub fn new(initial: bool) -> Self {
        Self {
            state: State::Idle,
            cached: initial,
        }
    }

    pub fn cached(&self) -> bool {
        self.cached
    }
}

impl Atomic for CacheInput {
    fn internal(&mut self) {
        if self.state == State::SendCached {
            self.state = State::Idle;
        }
    }

    fn external(&mut self, _e: SimTime, inputs: &Bag) {
        if let Some(status) = inputs.iter().rev().find_map(|ev| match ev {
            Event::PerceptionStatus(status) => Some(*status),
            _ => None,
        }) {
            self.cached = status;
        }
        if inputs.iter().any(|ev| matches!(ev, Event::RequestPerceptionStatus)) {
            self.state = State::SendCached;
        }
    }

    fn output(&mut self, bag: &mut Bag) {
        if self.state == State::SendCached {
            bag.push(Event::CachedPerceptionStatus(self.cached));
        }
    }

    fn time_advance(&self) -> SimTime {
        match self.state {
            State::Idle => SimTime::INFINITY,
            State::SendCached => SimTime::ZERO,
        }
    }

    fn state_name(&self) -> String {
        self.state.to_string()
    }
}
