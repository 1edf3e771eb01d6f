use std::str::FromStr;

use super::packets::{boss_packet, fcc_packet, gcs_packet, landing_point_packet, signal_packet};
use super::script::{parse_payload, parse_script, ScriptError};
use crate::constants::SIG_ID_LANDING_POINT;
use crate::devs::event::Event;
use crate::devs::time::SimTime;
use crate::messages::{BossUpdate, FccCommand, GcsUpdate, LandingPoint};

#[test]
fn fcc_packet_is_word_swapped_to_network_order() {
    let command = FccCommand::change_velocity(2.5, 1_234.5);
    let packet = fcc_packet(&command);
    assert_eq!(packet.len(), 44);
    // The GPS time leaves as a full big-endian double.
    assert_eq!(&packet[0..8], &1_234.5_f64.to_be_bytes());
    // Ready + MAV_COMMAND status bits.
    assert_eq!(&packet[8..12], &33_u32.to_be_bytes());
    // The 16-bit command rides in a padded, byte-swapped 32-bit word.
    assert_eq!(&packet[12..16], &[0, 0, 0, 178]);
    assert_eq!(&packet[20..24], &2.5_f32.to_be_bytes());
}

#[test]
fn fcc_reposition_packet_carries_scaled_coordinates() {
    let command = FccCommand::reposition(7.0, 450_000_000, -750_000_000, 91.44);
    let packet = fcc_packet(&command);
    assert_eq!(&packet[32..36], &450_000_000_i32.to_be_bytes());
    assert_eq!(&packet[36..40], &(-750_000_000_i32).to_be_bytes());
    assert_eq!(&packet[40..44], &91.44_f32.to_be_bytes());
}

#[test]
fn boss_packet_has_the_aligned_layout() {
    let update = BossUpdate::mission_item(2, 5, 45.0, -75.0, 92.0, 180.0, 0.1, 10.0, 0.0, "LZ SCAN");
    let packet = boss_packet(&update);
    assert_eq!(packet.len(), 136);
    assert_eq!(&packet[20..24], &2_i32.to_le_bytes());
    assert_eq!(&packet[24..28], &5_i32.to_le_bytes());
    assert_eq!(&packet[36..44], &45.0_f64.to_le_bytes());
    assert_eq!(&packet[124..131], b"LZ SCAN");
    assert_eq!(&packet[131..134], &[0, 0, 0]);
}

#[test]
fn boss_description_is_truncated_to_ten_bytes() {
    let update = BossUpdate::scan(1, 92.0, "A DESCRIPTION THAT RUNS LONG");
    let packet = boss_packet(&update);
    assert_eq!(packet.len(), 136);
    assert_eq!(&packet[124..134], b"A DESCRIPT");
}

#[test]
fn gcs_packet_is_a_statustext_frame() {
    let update = GcsUpdate::info("Came to hover!");
    let packet = gcs_packet(&update, 4);
    // severity byte + text, framed with a 10-byte header and 2-byte CRC.
    let payload_len = 1 + "Came to hover!".len();
    assert_eq!(packet.len(), 12 + payload_len);
    assert_eq!(packet[0], 0xFD);
    assert_eq!(packet[1] as usize, payload_len);
    assert_eq!(packet[4], 4);
    assert_eq!(&packet[7..10], &[253, 0, 0]);
    assert_eq!(packet[10], 6);
    assert_eq!(&packet[11..11 + 14], b"Came to hover!");

    // Same text, same frame: the CRC is deterministic.
    assert_eq!(packet, gcs_packet(&update, 4));
    // A different sequence number changes the checksum.
    let other = gcs_packet(&update, 5);
    assert_ne!(packet[packet.len() - 2..], other[other.len() - 2..]);
}

#[test]
fn signal_packets_prefix_the_id() {
    assert_eq!(signal_packet(1, 0), vec![1, 0]);
    let lp = LandingPoint::new(3, 45.0, -75.0, 300.0, 90.0, 4);
    let packet = landing_point_packet(&lp);
    assert_eq!(packet[0], SIG_ID_LANDING_POINT);
    assert_eq!(packet.len(), 33);
    assert_eq!(&packet[1..5], &3_i32.to_le_bytes());
}

#[test]
fn scripts_parse_and_sort_by_time() {
    let text = "\n\
        # mission kickoff\n\
        00:00:01:000 start_mission 7\n\
        00:00:00:500 perception_status 1\n\
        00:01:10:000 lp_recv 0 45.0 -75.0 100.0 90.0 3\n";
    let events = parse_script(text).unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0].0, SimTime::from_millis(500));
    assert!(matches!(events[0].1, Event::PerceptionStatus(true)));
    assert!(matches!(events[1].1, Event::StartMission(7)));
    assert_eq!(events[2].0, SimTime::from_str("00:01:10:000").unwrap());
    match &events[2].1 {
        Event::LpRecv(lp) => {
            assert_eq!(lp.mission_item_no, 3);
            assert!((lp.lat - 45.0).abs() < f64::EPSILON);
        }
        other => panic!("Unexpected event {other:?}"),
    }
}

#[test]
fn malformed_scripts_are_rejected() {
    assert_eq!(parse_script("nonsense\n").unwrap_err(), ScriptError::MalformedLine);
    assert_eq!(
        parse_script("00:00:01:000 bogus 1\n").unwrap_err(),
        ScriptError::UnknownPort
    );
    assert_eq!(
        parse_script("00:00:01:000 lp_recv 1\n").unwrap_err(),
        ScriptError::BadPayload
    );
}

#[test]
fn datagram_payloads_share_the_script_encoding() {
    let ev = parse_payload("aircraft_state", "1234.5 45.0 -75.0 50.0 300.0 90.0 10.0").unwrap();
    match ev {
        Event::AircraftState(state) => {
            assert!((state.gps_time - 1_234.5).abs() < f64::EPSILON);
            assert!((state.alt_msl - 300.0).abs() < f32::EPSILON);
        }
        other => panic!("Unexpected event {other:?}"),
    }
    assert!(matches!(parse_payload("pilot_takeover", ""), Ok(Event::PilotTakeover)));
}
