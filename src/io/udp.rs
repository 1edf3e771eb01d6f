//! Asynchronous UDP collaborators of the real-time host. Input drivers
//! parse the same text payload encoding as the input scripts and forward
//! events into the simulation loop; the sender fans finished packets out to
//! the FCC, BOSS, the GCS and the mission monitor.

use async_trait::async_trait;
use strum_macros::Display;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::config::NetworkConfig;
use crate::constants::{
    SIG_ID_MISSION_COMPLETE, SIG_ID_MISSION_ITEM_REACHED, SIG_ID_SET_MISSION_MONITOR_STATUS,
};
use crate::devs::event::Event;
use crate::io::packets;
use crate::io::script::parse_payload;
use crate::{error, event, log, warn};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum UdpError {
    BindFailed,
}

/// A collaborator task feeding external events into the simulation.
#[async_trait]
pub trait AsyncInputDriver: Send {
    fn name(&self) -> &'static str;

    /// Runs until cancelled, forwarding parsed events through `tx`.
    async fn run(self: Box<Self>, tx: mpsc::Sender<Event>, cancel: CancellationToken);
}

/// Listens on one UDP port for text-encoded payloads of a fixed port kind.
/// With `ack_required` every datagram is answered with a single ACK byte,
/// the reliability handshake expected by the perception sender.
pub struct UdpInput {
    socket: UdpSocket,
    port_kind: &'static str,
    ack_required: bool,
}

impl UdpInput {
    pub async fn bind(port: u16, port_kind: &'static str, ack_required: bool) -> Result<Self, UdpError> {
        let socket = UdpSocket::bind(("0.0.0.0", port))
            .await
            .map_err(|_| UdpError::BindFailed)?;
        log!("Listening for {port_kind} on udp/{port}");
        Ok(Self {
            socket,
            port_kind,
            ack_required,
        })
    }
}

#[async_trait]
impl AsyncInputDriver for UdpInput {
    fn name(&self) -> &'static str {
        self.port_kind
    }

    async fn run(self: Box<Self>, tx: mpsc::Sender<Event>, cancel: CancellationToken) {
        let mut buffer = [0_u8; 1024];
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                received = self.socket.recv_from(&mut buffer) => {
                    let (length, peer) = match received {
                        Ok(ok) => ok,
                        Err(err) => {
                            error!("{} receive error: {err}", self.port_kind);
                            continue;
                        }
                    };
                    if self.ack_required {
                        if let Err(err) = self.socket.send_to(b"ACK", peer).await {
                            warn!("{} ack to {peer} failed: {err}", self.port_kind);
                        }
                    }
                    let text = String::from_utf8_lossy(&buffer[..length]);
                    match parse_payload(self.port_kind, text.trim()) {
                        Ok(ev) => {
                            event!("{} <- {peer}: {ev:?}", self.port_kind);
                            if tx.send(ev).await.is_err() {
                                break;
                            }
                        }
                        Err(err) => warn!("{} dropped malformed datagram: {err}", self.port_kind),
                    }
                }
            }
        }
    }
}

/// Outbound fan-out toward the deployed consumers. Send failures are
/// logged and the packet is dropped; the core observes no error channel.
pub struct UdpSender {
    socket: UdpSocket,
    network: NetworkConfig,
    gcs_sequence: u8,
}

impl UdpSender {
    pub async fn bind(network: NetworkConfig) -> Result<Self, UdpError> {
        let socket = UdpSocket::bind(("0.0.0.0", 0))
            .await
            .map_err(|_| UdpError::BindFailed)?;
        Ok(Self {
            socket,
            network,
            gcs_sequence: 0,
        })
    }

    pub async fn publish(&mut self, ev: &Event) {
        let outbound = match ev {
            Event::FccCommandOrbit(command)
            | Event::FccCommandVelocity(command)
            | Event::FccCommandHover(command)
            | Event::FccCommandLand(command)
            | Event::FccWaypointUpdate(command) => {
                Some((packets::fcc_packet(command), &self.network.fcc_addr))
            }
            Event::UpdateBoss(update) => {
                Some((packets::boss_packet(update), &self.network.boss_addr))
            }
            Event::UpdateGcs(update) => {
                let packet = packets::gcs_packet(update, self.gcs_sequence);
                self.gcs_sequence = self.gcs_sequence.wrapping_add(1);
                Some((packet, &self.network.gcs_addr))
            }
            Event::SetMissionMonitorStatus(status) => Some((
                packets::signal_packet(SIG_ID_SET_MISSION_MONITOR_STATUS, *status),
                &self.network.mission_monitor_addr,
            )),
            Event::MissionComplete => Some((
                packets::signal_packet(SIG_ID_MISSION_COMPLETE, 1),
                &self.network.mission_monitor_addr,
            )),
            Event::UpdateMissionItem => Some((
                packets::signal_packet(SIG_ID_MISSION_ITEM_REACHED, 1),
                &self.network.mission_monitor_addr,
            )),
            Event::LpNew(lp) | Event::LpExpired(lp) => Some((
                packets::landing_point_packet(lp),
                &self.network.mission_monitor_addr,
            )),
            _ => None,
        };
        if let Some((packet, addr)) = outbound {
            if let Err(err) = self.socket.send_to(&packet, addr.as_str()).await {
                error!("Send to {addr} failed: {err}");
            }
        }
    }

}
