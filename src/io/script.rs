//! Timed input scripts: the file-mode host replays one of these against the
//! landing composition. Each line is `HH:MM:SS:mmm <port> <payload…>`;
//! blank lines and `#` comments are skipped.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use itertools::Itertools;
use regex::Regex;
use strum_macros::Display;

use crate::devs::event::Event;
use crate::devs::time::SimTime;
use crate::messages::{AircraftState, FccCommand, LandingPoint, StartSupervisor};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum ScriptError {
    FileUnreadable,
    MalformedLine,
    UnknownPort,
    BadPayload,
}

/// Parses a script file into a time-sorted event schedule.
pub fn read_script(path: &Path) -> Result<Vec<(SimTime, Event)>, ScriptError> {
    let text = fs::read_to_string(path).map_err(|_| ScriptError::FileUnreadable)?;
    parse_script(&text)
}

pub fn parse_script(text: &str) -> Result<Vec<(SimTime, Event)>, ScriptError> {
    let line_re = Regex::new(r"^(\d+:\d+:\d+:\d+)\s+([a-z_]+)\s*(.*)$").expect("[FATAL] Bad script regex!");
    let mut events = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let captures = line_re.captures(line).ok_or(ScriptError::MalformedLine)?;
        let stamp = SimTime::from_str(&captures[1]).map_err(|_| ScriptError::MalformedLine)?;
        let event = parse_payload(&captures[2], &captures[3])?;
        events.push((stamp, event));
    }
    Ok(events.into_iter().sorted_by_key(|(t, _)| *t).collect())
}

/// Decodes one port payload. The same text encoding arrives in UDP
/// datagrams, so the real-time input drivers share this parser.
pub fn parse_payload(port: &str, payload: &str) -> Result<Event, ScriptError> {
    let fields: Vec<&str> = payload.split_whitespace().collect();
    match port {
        "start_mission" => Ok(Event::StartMission(parse_field(&fields, 0)?)),
        "start_supervisor" => Ok(Event::StartSupervisor(StartSupervisor::new(parse_field(
            &fields, 0,
        )?))),
        "perception_status" => {
            let flag: i32 = parse_field(&fields, 0)?;
            Ok(Event::PerceptionStatus(flag != 0))
        }
        "pilot_takeover" => Ok(Event::PilotTakeover),
        "control_yielded" => Ok(Event::ControlYielded),
        "landing_achieved" => Ok(Event::LandingAchieved),
        "hover_criteria_met" => Ok(Event::HoverCriteriaMet),
        "cancel_hover" => Ok(Event::CancelHover),
        "lp_recv" => Ok(Event::LpRecv(parse_landing_point(&fields)?)),
        "plp_ach" => Ok(Event::PlpAch(parse_landing_point(&fields)?)),
        "aircraft_state" => Ok(Event::AircraftState(AircraftState {
            gps_time: parse_field(&fields, 0)?,
            lat: parse_field(&fields, 1)?,
            lon: parse_field(&fields, 2)?,
            alt_agl: parse_field(&fields, 3)?,
            alt_msl: parse_field(&fields, 4)?,
            hdg_deg: parse_field(&fields, 5)?,
            vel_kts: parse_field(&fields, 6)?,
        })),
        "waypoint" => {
            let command = FccCommand {
                latitude: parse_field(&fields, 0)?,
                longitude: parse_field(&fields, 1)?,
                altitude_msl: parse_field(&fields, 2)?,
                ..FccCommand::default()
            };
            Ok(Event::Waypoint(command))
        }
        _ => Err(ScriptError::UnknownPort),
    }
}

fn parse_landing_point(fields: &[&str]) -> Result<LandingPoint, ScriptError> {
    Ok(LandingPoint::new(
        parse_field(fields, 0)?,
        parse_field(fields, 1)?,
        parse_field(fields, 2)?,
        parse_field(fields, 3)?,
        parse_field(fields, 4)?,
        parse_field(fields, 5)?,
    ))
}

fn parse_field<T: FromStr>(fields: &[&str], index: usize) -> Result<T, ScriptError> {
    fields
        .get(index)
        .ok_or(ScriptError::BadPayload)?
        .parse::<T>()
        .map_err(|_| ScriptError::BadPayload)
}
