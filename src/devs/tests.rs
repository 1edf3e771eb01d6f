use std::str::FromStr;

use super::event::Event;
use super::runner::Runner;
use super::time::SimTime;
use crate::messages::FccCommand;
use crate::models::handle_waypoint::HandleWaypoint;

#[test]
fn time_lattice_round_trip() {
    let stamps = ["00:00:00:000", "00:02:00:000", "01:02:03:004", "27:59:59:999"];
    for stamp in stamps {
        let parsed = SimTime::from_str(stamp).unwrap();
        assert_eq!(parsed.to_string(), stamp);
    }
    assert_eq!(SimTime::from_str("00:02:00:000").unwrap(), SimTime::from_millis(120_000));
    assert_eq!(SimTime::from_str("inf").unwrap(), SimTime::INFINITY);
    assert_eq!(SimTime::INFINITY.to_string(), "inf");
}

#[test]
fn time_parse_rejects_garbage() {
    assert!(SimTime::from_str("00:02:00").is_err());
    assert!(SimTime::from_str("a:b:c:d").is_err());
}

#[test]
fn seconds_conversion_matches_lattice() {
    assert_eq!(SimTime::from_secs_f64(120.0), SimTime::from_millis(120_000));
    assert_eq!(SimTime::from_secs_f64(3.5), SimTime::from_millis(3_500));
    assert_eq!(SimTime::from_secs_f64(3661.25), SimTime::from_millis(3_661_250));
    assert_eq!(SimTime::from_secs_f64(0.1), SimTime::from_millis(100));
}

#[test]
fn decrementing_clamps_at_zero() {
    let short = SimTime::from_millis(5);
    let long = SimTime::from_millis(10);
    assert_eq!(short - long, SimTime::ZERO);
    assert_eq!(long - short, SimTime::from_millis(5));
}

#[test]
fn infinity_is_absorbing() {
    let t = SimTime::from_millis(42);
    assert_eq!(t + SimTime::INFINITY, SimTime::INFINITY);
    assert_eq!(SimTime::INFINITY - t, SimTime::INFINITY);
    assert!(SimTime::INFINITY.is_infinite());
    assert!(!t.is_infinite());
}

#[test]
fn runner_delivers_inputs_and_collects_outputs() {
    let waypoint = FccCommand {
        latitude: 450_000_000,
        longitude: -750_000_000,
        altitude_msl: 120.0,
        ..FccCommand::default()
    };
    let schedule = vec![
        (SimTime::from_millis(1_000), Event::StartMission(1)),
        (SimTime::from_millis(2_000), Event::Waypoint(waypoint)),
    ];
    let mut runner = Runner::new(HandleWaypoint::new(), schedule);
    runner.run_until_passivate();

    let outputs = runner.outputs();
    assert_eq!(outputs.len(), 1);
    let (t, ev) = &outputs[0];
    assert_eq!(*t, SimTime::from_millis(2_000));
    match ev {
        Event::FccWaypointUpdate(forwarded) => {
            assert_eq!(forwarded.latitude, 450_000_000);
            // ready bit plus MAV_COMMAND bit
            assert_eq!(forwarded.supervisor_status, 0b10_0001);
        }
        other => panic!("Unexpected output {other:?}"),
    }
}
