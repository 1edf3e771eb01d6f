use serde::{Deserialize, Serialize};

/// MAVLink STATUSTEXT severities used by the supervisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum MavSeverity {
    Alert = 1,
    Info = 6,
}

/// Short status text shown on the ground control station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GcsUpdate {
    pub text: String,
    pub severity: MavSeverity,
}

impl GcsUpdate {
    pub fn new(text: impl Into<String>, severity: MavSeverity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, MavSeverity::Info)
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self::new(text, MavSeverity::Alert)
    }
}
