//! Wire encodings for the records leaving the supervisor.
//!
//! The FCC bridge expects every 32-bit word in network byte order with the
//! leading GPS-time double word-swapped on top; BOSS consumes the raw
//! 4-byte-aligned record in host order; the GCS takes MAVLink v2
//! STATUSTEXT frames.

use crate::constants::{
    MAVLINK_CORE_HEADER_LEN, MAVLINK_MSG_ID_STATUSTEXT, MAVLINK_MSG_ID_STATUSTEXT_CRC,
    MAVLINK_STATUSTEXT_TEXT_LEN, MAVLINK_STX, MY_MAV_COMP_ID, MY_MAV_SYS_ID, SIG_ID_LANDING_POINT,
};
use crate::messages::{BossUpdate, FccCommand, GcsUpdate, LandingPoint};

/// FCC command, 44 bytes, every 32-bit word big-endian and the GPS time
/// emitted as a full big-endian double.
pub fn fcc_packet(command: &FccCommand) -> Vec<u8> {
    let mut packet = Vec::with_capacity(44);
    packet.extend_from_slice(&command.supervisor_gps_time.to_be_bytes());
    packet.extend_from_slice(&command.supervisor_status.to_be_bytes());
    // The u16 command occupies a padded 32-bit word before byte swapping.
    packet.extend_from_slice(&u32::from(command.command).to_be_bytes());
    packet.extend_from_slice(&command.param1.to_be_bytes());
    packet.extend_from_slice(&command.param2.to_be_bytes());
    packet.extend_from_slice(&command.param3.to_be_bytes());
    packet.extend_from_slice(&command.param4.to_be_bytes());
    packet.extend_from_slice(&command.latitude.to_be_bytes());
    packet.extend_from_slice(&command.longitude.to_be_bytes());
    packet.extend_from_slice(&command.altitude_msl.to_be_bytes());
    packet
}

/// BOSS mission update in its in-memory layout: 4-byte aligned fields,
/// host byte order, ten description bytes, padded to a word multiple.
pub fn boss_packet(update: &BossUpdate) -> Vec<u8> {
    let mut packet = Vec::with_capacity(136);
    packet.extend_from_slice(&update.lp_no.to_le_bytes());
    packet.extend_from_slice(&update.lp_lat.to_le_bytes());
    packet.extend_from_slice(&update.lp_lon.to_le_bytes());
    packet.extend_from_slice(&update.mission_no.to_le_bytes());
    packet.extend_from_slice(&update.mission_item_no.to_le_bytes());
    packet.extend_from_slice(&update.is_mission_started.to_le_bytes());
    packet.extend_from_slice(&update.is_landing_leg.to_le_bytes());
    packet.extend_from_slice(&update.lat.to_le_bytes());
    packet.extend_from_slice(&update.lon.to_le_bytes());
    packet.extend_from_slice(&update.alt.to_le_bytes());
    packet.extend_from_slice(&update.yaw.to_le_bytes());
    packet.extend_from_slice(&update.speed.to_le_bytes());
    packet.extend_from_slice(&update.horz_accept_radius_m.to_le_bytes());
    packet.extend_from_slice(&update.vert_accept_radius_m.to_le_bytes());
    packet.extend_from_slice(&update.preview_length.to_le_bytes());
    for lat in &update.lat_next {
        packet.extend_from_slice(&lat.to_le_bytes());
    }
    for lon in &update.lon_next {
        packet.extend_from_slice(&lon.to_le_bytes());
    }
    let mut description = [0_u8; 10];
    let text = update.description.as_bytes();
    let len = text.len().min(10);
    description[..len].copy_from_slice(&text[..len]);
    packet.extend_from_slice(&description);
    packet.extend_from_slice(&[0_u8; 2]);
    packet
}

/// MAVLink v2 STATUSTEXT frame carrying a GCS status message.
pub fn gcs_packet(update: &GcsUpdate, sequence: u8) -> Vec<u8> {
    let mut payload = Vec::with_capacity(MAVLINK_STATUSTEXT_TEXT_LEN + 1);
    payload.push(update.severity as u8);
    let text = update.text.as_bytes();
    let len = text.len().min(MAVLINK_STATUSTEXT_TEXT_LEN - 1);
    payload.extend_from_slice(&text[..len]);

    let mut packet = vec![0_u8; MAVLINK_CORE_HEADER_LEN + payload.len() + 3];
    packet[0] = MAVLINK_STX;
    packet[1] = payload.len() as u8;
    packet[2] = 0; // incompat flags
    packet[3] = 0; // compat flags
    packet[4] = sequence;
    packet[5] = MY_MAV_SYS_ID;
    packet[6] = MY_MAV_COMP_ID;
    packet[7] = (MAVLINK_MSG_ID_STATUSTEXT & 0xFF) as u8;
    packet[8] = ((MAVLINK_MSG_ID_STATUSTEXT >> 8) & 0xFF) as u8;
    packet[9] = ((MAVLINK_MSG_ID_STATUSTEXT >> 16) & 0xFF) as u8;
    packet[10..10 + payload.len()].copy_from_slice(&payload);

    let mut checksum = 0xFFFF_u16;
    for &byte in &packet[1..=MAVLINK_CORE_HEADER_LEN] {
        checksum = crc_accumulate(byte, checksum);
    }
    for &byte in &payload {
        checksum = crc_accumulate(byte, checksum);
    }
    checksum = crc_accumulate(MAVLINK_MSG_ID_STATUSTEXT_CRC, checksum);

    let crc_at = MAVLINK_CORE_HEADER_LEN + payload.len() + 1;
    packet[crc_at] = (checksum & 0xFF) as u8;
    packet[crc_at + 1] = (checksum >> 8) as u8;
    packet
}

/// Single-value packet: a signal id byte followed by the payload byte.
pub fn signal_packet(signal_id: u8, value: u8) -> Vec<u8> {
    vec![signal_id, value]
}

/// Landing point forwarded to the mission monitor, signal-id prefixed.
pub fn landing_point_packet(lp: &LandingPoint) -> Vec<u8> {
    let mut packet = Vec::with_capacity(33);
    packet.push(SIG_ID_LANDING_POINT);
    packet.extend_from_slice(&lp.id.to_le_bytes());
    packet.extend_from_slice(&lp.lat.to_le_bytes());
    packet.extend_from_slice(&lp.lon.to_le_bytes());
    packet.extend_from_slice(&lp.alt.to_le_bytes());
    packet.extend_from_slice(&lp.hdg.to_le_bytes());
    packet.extend_from_slice(&lp.mission_item_no.to_le_bytes());
    packet
}

/// CRC-16/MCRF4XX accumulate step used by the MAVLink checksum.
fn crc_accumulate(data: u8, crc: u16) -> u16 {
    let tmp = data ^ (crc & 0xFF) as u8;
    let tmp = tmp ^ tmp.wrapping_shl(4);
    (crc >> 8)
        ^ u16::from(tmp).wrapping_shl(8)
        ^ u16::from(tmp).wrapping_shl(3)
        ^ u16::from(tmp).wrapping_shr(4)
}
