//! Outbound mission events.
//!
//! The [`MissionService`](super::service::MissionService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them — today that is the serial log.

use crate::error::MissionFault;
use crate::fsm::StateId;
use crate::fsm::context::{AimPosition, FireState, FireZone};

/// Structured events emitted by the mission sequencer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MissionEvent {
    /// The service has started (carries initial state).
    Started(StateId),

    /// The FSM transitioned between states.
    StateChanged { from: StateId, to: StateId },

    /// The horizontal search found a fire.
    FireAcquired { zone: FireZone, pan: u16 },

    /// Vertical correction centered the fire on the MID sensor.
    AimCentered { tilt: u16, steps: u32 },

    /// MID dropped below threshold and the pump was switched off.
    Extinguished { polls: u32 },

    /// The cycle fell back to RESET without putting a fire out.
    CycleAborted(MissionFault),

    /// A mission cycle returned to RESET (carries the cycle count).
    CycleComplete(u64),

    /// Periodic telemetry snapshot.
    Telemetry(MissionTelemetry),
}

/// A point-in-time telemetry snapshot suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionTelemetry {
    pub state: StateId,
    pub fire: FireState,
    pub aim: AimPosition,
    pub cycles: u64,
    pub extinguished: u64,
    pub last_fault: Option<MissionFault>,
}
