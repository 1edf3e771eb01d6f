use super::landing::{Landing, LandingTimers};
use super::lp_reposition::LpReposition;
use super::supervisor::Supervisor;
use crate::devs::event::Event;
use crate::devs::runner::Runner;
use crate::devs::time::SimTime;
use crate::models::{command_reposition, handle_waypoint, handover_control, landing_routine, lp_manager, mission_initialization, reposition_timer};
use crate::messages::{AircraftState, LandingPoint, MavCommand, StartSupervisor};

const LAT_METERS_PER_DEG: f64 = 111_132.0;

fn ms(millis: u64) -> SimTime {
    SimTime::from_millis(millis)
}

fn secs(s: f64) -> SimTime {
    SimTime::from_secs_f64(s)
}

fn north_of(lat: f64, meters: f64) -> f64 {
    lat + meters / LAT_METERS_PER_DEG
}

fn lp(id: i32, lat: f64, lon: f64, alt: f32, hdg: f32, item: i32) -> LandingPoint {
    LandingPoint::new(id, lat, lon, alt, hdg, item)
}

fn aircraft(lat: f64, lon: f64, alt_agl: f32, alt_msl: f32, hdg_deg: f32, vel_kts: f32) -> AircraftState {
    AircraftState {
        gps_time: 1_234.5,
        lat,
        lon,
        alt_agl,
        alt_msl,
        hdg_deg,
        vel_kts,
    }
}

fn default_timers() -> LandingTimers {
    LandingTimers {
        lp_accept_time: secs(120.0),
        orbit_time: secs(120.0),
        repo_time: secs(60.0),
        upd_time: secs(20.0),
        stabilize_polling_rate: ms(100),
    }
}

fn emitted_at<'a>(
    outputs: &'a [(SimTime, Event)],
    t: SimTime,
    pred: impl Fn(&Event) -> bool + 'a,
) -> bool {
    outputs.iter().any(|(at, ev)| *at == t && pred(ev))
}

#[test]
fn nominal_landing_runs_to_mission_complete() {
    let target_lat = north_of(45.0, 100.0);
    let cruise = aircraft(45.0, -75.0, 50.0, 300.0, 90.0, 10.0);
    let hover = aircraft(target_lat, -75.0, 20.0, 300.0, 90.0, 1.0);

    let mut schedule = vec![
        (ms(0), Event::StartMission(7)),
        (ms(1_000), Event::PlpAch(lp(0, 45.0, -75.0, 0.0, 90.0, 3))),
        (ms(1_100), Event::AircraftState(cruise)),
        (ms(70_000), Event::LpRecv(lp(0, target_lat, -75.0, 0.0, 90.0, 3))),
        (ms(70_100), Event::AircraftState(cruise)),
        (ms(91_000), Event::AircraftState(cruise)),
        (ms(91_200), Event::AircraftState(hover)),
        (ms(98_000), Event::LandingAchieved),
    ];
    // Stabilize polls at 10 Hz; answer every second request while it dwells.
    for poll in 0..15_u64 {
        schedule.push((ms(91_400 + poll * 200), Event::AircraftState(hover)));
    }

    let mut runner = Runner::new(Landing::new(default_timers()), schedule);
    runner.run_until_passivate();
    let outputs = runner.outputs();

    assert!(emitted_at(outputs, ms(1_100), |ev| matches!(ev, Event::FccCommandOrbit(_))));
    assert!(emitted_at(outputs, ms(70_100), |ev| {
        matches!(ev, Event::LpNew(point) if point.id == 1)
    }));
    assert!(emitted_at(outputs, ms(91_000), |ev| {
        matches!(ev, Event::FccCommandVelocity(fcc) if fcc.command == MavCommand::DoChangeSpeed as u16)
    }));
    assert!(emitted_at(outputs, ms(91_200), |ev| {
        matches!(ev, Event::FccCommandHover(fcc) if fcc.command == MavCommand::DoReposition as u16)
    }));
    assert!(emitted_at(outputs, ms(94_300), |ev| matches!(ev, Event::FccCommandLand(_))));
    assert!(emitted_at(outputs, ms(98_000), |ev| matches!(ev, Event::MissionComplete)));

    let landing = runner.model();
    assert_eq!(landing.lp_manager().state(), lp_manager::State::LpAcceptExp);
    assert_eq!(
        landing.lp_reposition().landing_routine().state(),
        landing_routine::State::Landed
    );
    assert_eq!(
        landing.lp_reposition().reposition_timer().state(),
        reposition_timer::State::LandingRoutine
    );
}

#[test]
fn empty_landing_zone_ends_in_pilot_control() {
    let cruise = aircraft(45.0, -75.0, 50.0, 300.0, 90.0, 10.0);
    let hover = aircraft(45.0, -75.0, 20.0, 300.0, 90.0, 1.0);

    let mut schedule = vec![
        (ms(0), Event::StartMission(1)),
        (ms(1_000), Event::PlpAch(lp(0, 45.0, -75.0, 0.0, 90.0, 3))),
        (ms(1_100), Event::AircraftState(cruise)),
        // Orbit runs its full 120 s without a single landing point.
        (ms(121_200), Event::AircraftState(hover)),
        (ms(125_000), Event::PilotTakeover),
    ];
    for poll in 0..15_u64 {
        schedule.push((ms(121_400 + poll * 200), Event::AircraftState(hover)));
    }

    let mut runner = Runner::new(Landing::new(default_timers()), schedule);
    runner.run_until_passivate();
    let outputs = runner.outputs();

    // The handover hover is commanded over the planned landing point.
    assert!(emitted_at(outputs, ms(121_200), |ev| {
        matches!(ev, Event::FccCommandHover(fcc) if fcc.latitude == 450_000_000)
    }));
    assert!(emitted_at(outputs, ms(124_300), |ev| matches!(ev, Event::NotifyPilot)));
    assert!(emitted_at(outputs, ms(125_000), |ev| matches!(ev, Event::ControlYielded)));
    assert!(!outputs.iter().any(|(t, _)| *t > ms(125_000)));

    let landing = runner.model();
    assert_eq!(landing.lp_manager().state(), lp_manager::State::PilotControl);
    assert_eq!(
        landing.handover_control().state(),
        handover_control::State::PilotControl
    );
}

#[test]
fn takeover_mid_stabilize_silences_the_reposition_group() {
    let schedule = vec![
        (ms(0), Event::StartMission(1)),
        (ms(1_000), Event::LpNew(lp(1, north_of(45.0, 80.0), -75.0, 300.0, 90.0, 4))),
        // Patience expires at 21 s and the aircraft state request is served.
        (ms(22_000), Event::AircraftState(aircraft(45.0, -75.0, 50.0, 300.0, 90.0, 10.0))),
        (ms(25_000), Event::PilotTakeover),
    ];

    let mut runner = Runner::new(LpReposition::new(secs(60.0), secs(20.0)), schedule);
    runner.run_until_passivate();
    let outputs = runner.outputs();

    assert!(emitted_at(outputs, ms(22_000), |ev| matches!(ev, Event::FccCommandVelocity(_))));
    assert!(emitted_at(outputs, ms(22_000), |ev| matches!(ev, Event::StabilizeAt(_))));
    assert!(!outputs.iter().any(|(t, _)| *t > ms(25_000)));

    let group = runner.model();
    assert_eq!(
        group.reposition_timer().state(),
        reposition_timer::State::PilotControl
    );
    assert_eq!(
        group.command_reposition().state(),
        command_reposition::State::PilotControl
    );
    assert_eq!(
        group.landing_routine().state(),
        landing_routine::State::PilotControl
    );
}

#[test]
fn supervisor_arms_the_phases_and_forwards_waypoints() {
    let schedule = vec![
        (ms(500), Event::PerceptionStatus(true)),
        (ms(1_000), Event::StartSupervisor(StartSupervisor::new(9))),
        (ms(2_000), Event::AircraftState(aircraft(45.0, -75.0, 0.0, 250.0, 0.0, 0.0))),
        (
            ms(3_000),
            Event::Waypoint(crate::messages::FccCommand {
                latitude: 451_000_000,
                longitude: -751_000_000,
                altitude_msl: 150.0,
                ..crate::messages::FccCommand::default()
            }),
        ),
    ];

    let mut runner = Runner::new(Supervisor::new(default_timers()), schedule);
    runner.run_until_passivate();
    let outputs = runner.outputs();

    assert!(emitted_at(outputs, ms(1_000), |ev| matches!(ev, Event::RequestAircraftState)));
    assert!(emitted_at(outputs, ms(2_000), |ev| matches!(ev, Event::StartMission(9))));
    assert!(emitted_at(outputs, ms(3_000), |ev| {
        matches!(ev, Event::FccWaypointUpdate(fcc) if fcc.latitude == 451_000_000 && fcc.supervisor_status == 0b10_0001)
    }));

    let supervisor = runner.model();
    assert_eq!(
        supervisor.takeoff().mission_initialization().state(),
        mission_initialization::State::MissionStarted
    );
    assert_eq!(
        supervisor.on_route().handle_waypoint().state(),
        handle_waypoint::State::WaitForWaypoint
    );
    // The landing phase was armed by the relayed start_mission.
    assert_eq!(
        supervisor.landing().lp_manager().state(),
        lp_manager::State::WaitLpPlp
    );
}
