use serde::{Deserialize, Serialize};

/// Mission kickoff record received from the mission manager.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartSupervisor {
    pub mission_id: i32,
}

impl StartSupervisor {
    pub fn new(mission_id: i32) -> Self {
        Self { mission_id }
    }
}
