//! Real-time host: the engine sleeps wall-clock between internal events
//! while asynchronous collaborators inject external events and finished
//! packets leave toward the deployed consumers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use strum_macros::Display;
use tokio::sync::{mpsc, watch};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::SupervisorConfig;
use crate::constants::{DEFAULT_LAND_CRITERIA_VERT_DIST_FT, DEFAULT_SHARED_MEMORY_NAME};
use crate::coupled::supervisor::Supervisor;
use crate::devs::atomic::Atomic;
use crate::devs::event::{Bag, Event};
use crate::devs::time::SimTime;
use crate::io::shared_mem::SharedMemoryReader;
use crate::io::udp::{AsyncInputDriver, UdpInput, UdpSender};
use crate::{error, info, log};

#[derive(Debug, Display, PartialEq, Eq)]
pub enum HostError {
    SharedMemoryUnavailable,
    SocketBindFailed,
}

/// Polls the blended height out of the shared segment once a landing has
/// been requested and reports the touchdown.
struct LandingAchievedPoller {
    shared: Arc<SharedMemoryReader>,
    armed: watch::Receiver<bool>,
    threshold_ft: f32,
    polling_rate: Duration,
}

#[async_trait]
impl AsyncInputDriver for LandingAchievedPoller {
    fn name(&self) -> &'static str {
        "landing_achieved"
    }

    async fn run(mut self: Box<Self>, tx: mpsc::Sender<Event>, cancel: CancellationToken) {
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                changed = self.armed.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if !*self.armed.borrow_and_update() {
                        continue;
                    }
                    log!("Landing requested, watching blended height");
                    loop {
                        if cancel.is_cancelled() {
                            return;
                        }
                        if self.shared.mixedhgt_ft() < self.threshold_ft {
                            let _ = tx.send(Event::LandingAchieved).await;
                            break;
                        }
                        tokio::time::sleep(self.polling_rate).await;
                    }
                }
            }
        }
    }
}

/// Runs the supervisor against the live collaborators until the mission
/// completes or a fatal input-side error occurs.
pub async fn run(config: SupervisorConfig) -> Result<(), HostError> {
    let shared = Arc::new(
        SharedMemoryReader::connect(DEFAULT_SHARED_MEMORY_NAME)
            .map_err(|_| HostError::SharedMemoryUnavailable)?,
    );
    let mut sender = UdpSender::bind(config.network.clone())
        .await
        .map_err(|_| HostError::SocketBindFailed)?;

    let (tx, mut rx) = mpsc::channel::<Event>(64);
    let (arm_tx, arm_rx) = watch::channel(false);
    let cancel = CancellationToken::new();

    let ports = config.network.listen;
    let drivers: Vec<Box<dyn AsyncInputDriver>> = vec![
        Box::new(bind(ports.lp_recv, "lp_recv", true).await?),
        Box::new(bind(ports.plp_ach, "plp_ach", true).await?),
        Box::new(bind(ports.pilot_takeover, "pilot_takeover", false).await?),
        Box::new(bind(ports.start_supervisor, "start_supervisor", false).await?),
        Box::new(bind(ports.waypoint, "waypoint", false).await?),
        Box::new(bind(ports.perception_status, "perception_status", false).await?),
        Box::new(LandingAchievedPoller {
            shared: Arc::clone(&shared),
            armed: arm_rx,
            threshold_ft: DEFAULT_LAND_CRITERIA_VERT_DIST_FT as f32,
            polling_rate: Duration::from_millis(config.timers.aircraft_state_polling_ms),
        }),
    ];
    for driver in drivers {
        log!("Starting input driver {}", driver.name());
        tokio::spawn(driver.run(tx.clone(), cancel.clone()));
    }

    let mut model = Supervisor::new(config.landing_timers());
    let start = Instant::now();
    let mut t_last = SimTime::ZERO;
    let mut t_next = model.time_advance();
    info!("Real-time supervisor running");

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            received = rx.recv() => {
                let Some(first) = received else { break };
                let mut inputs: Bag = vec![first];
                while let Ok(more) = rx.try_recv() {
                    inputs.push(more);
                }
                // Inputs that race a due internal event are treated as
                // simultaneous with it and resolved by the confluent rule.
                let now = SimTime::from_millis(start.elapsed().as_millis() as u64)
                    .max(t_last)
                    .min(t_next);
                if now == t_next {
                    let mut out = Bag::new();
                    model.output(&mut out);
                    dispatch(&mut sender, &tx, &arm_tx, &shared, &cancel, &out).await;
                    model.confluent(now - t_last, &inputs);
                } else {
                    model.external(now - t_last, &inputs);
                }
                t_last = now;
                t_next = t_last + model.time_advance();
            }
            () = sleep_until_mark(start, t_next), if !t_next.is_infinite() => {
                let mut out = Bag::new();
                model.output(&mut out);
                dispatch(&mut sender, &tx, &arm_tx, &shared, &cancel, &out).await;
                model.internal();
                t_last = t_next;
                t_next = t_last + model.time_advance();
            }
        }
    }
    info!("Real-time supervisor stopped at {t_last}");
    Ok(())
}

async fn bind(port: u16, port_kind: &'static str, ack_required: bool) -> Result<UdpInput, HostError> {
    UdpInput::bind(port, port_kind, ack_required)
        .await
        .map_err(|_| HostError::SocketBindFailed)
}

async fn sleep_until_mark(start: Instant, t: SimTime) {
    tokio::time::sleep_until(start + Duration::from_millis(t.as_millis())).await;
}

/// Publishes an output bag and services the demands the core addressed to
/// its collaborators.
async fn dispatch(
    sender: &mut UdpSender,
    tx: &mpsc::Sender<Event>,
    arm_tx: &watch::Sender<bool>,
    shared: &SharedMemoryReader,
    cancel: &CancellationToken,
    out: &Bag,
) {
    for ev in out {
        sender.publish(ev).await;
        match ev {
            Event::RequestAircraftState => {
                let state = shared.aircraft_state();
                if tx.try_send(Event::AircraftState(state)).is_err() {
                    error!("Aircraft-state demand dropped, input queue full");
                }
            }
            Event::FccCommandLand(_) => {
                let _ = arm_tx.send(true);
            }
            Event::MissionComplete => {
                info!("Mission complete, shutting the host down");
                cancel.cancel();
            }
            _ => {}
        }
    }
}
