use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use strum_macros::Display;

/// Simulation time as a count of milliseconds since mission start.
///
/// The maximum representable value is reserved as the infinity sentinel used
/// by passivated models: a model whose time advance is [`SimTime::INFINITY`]
/// never transitions spontaneously.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const INFINITY: SimTime = SimTime(u64::MAX);

    pub const fn from_millis(millis: u64) -> Self {
        SimTime(millis)
    }

    /// Converts a duration in seconds onto the millisecond lattice.
    pub fn from_secs_f64(secs: f64) -> Self {
        let hours = (secs / 3600.0).floor();
        let minutes = ((secs - hours * 3600.0) / 60.0).floor();
        let seconds = secs - hours * 3600.0 - minutes * 60.0;
        let millis = (seconds.fract() * 1000.0).round();
        SimTime(
            (hours as u64) * 3_600_000
                + (minutes as u64) * 60_000
                + (seconds.trunc() as u64) * 1000
                + millis as u64,
        )
    }

    pub const fn is_infinite(self) -> bool {
        self.0 == u64::MAX
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    /// Whole seconds, used when a remaining timer is reported to the GCS.
    pub const fn as_secs(self) -> u64 {
        self.0 / 1000
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        if self.is_infinite() || rhs.is_infinite() {
            SimTime::INFINITY
        } else {
            SimTime(self.0.saturating_add(rhs.0))
        }
    }
}

impl AddAssign for SimTime {
    fn add_assign(&mut self, rhs: SimTime) {
        *self = *self + rhs;
    }
}

impl Sub for SimTime {
    type Output = SimTime;

    /// Decrementing timers clamp at zero rather than going negative.
    fn sub(self, rhs: SimTime) -> SimTime {
        if self.is_infinite() {
            SimTime::INFINITY
        } else {
            SimTime(self.0.saturating_sub(rhs.0))
        }
    }
}

impl SubAssign for SimTime {
    fn sub_assign(&mut self, rhs: SimTime) {
        *self = *self - rhs;
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinite() {
            return write!(f, "inf");
        }
        let millis = self.0 % 1000;
        let seconds = (self.0 / 1000) % 60;
        let minutes = (self.0 / 60_000) % 60;
        let hours = self.0 / 3_600_000;
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}:{millis:03}")
    }
}

#[derive(Debug, Display, PartialEq, Eq)]
pub enum TimeParseError {
    MissingField,
    InvalidField,
}

impl FromStr for SimTime {
    type Err = TimeParseError;

    /// Parses the `HH:MM:SS:mmm` stamps used by input scripts and logs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "inf" {
            return Ok(SimTime::INFINITY);
        }
        let mut fields = s.split(':');
        let mut take = || {
            fields
                .next()
                .ok_or(TimeParseError::MissingField)?
                .parse::<u64>()
                .map_err(|_| TimeParseError::InvalidField)
        };
        let hours = take()?;
        let minutes = take()?;
        let seconds = take()?;
        let millis = take()?;
        Ok(SimTime(
            hours * 3_600_000 + minutes * 60_000 + seconds * 1000 + millis,
        ))
    }
}
