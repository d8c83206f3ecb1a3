//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing mission events to the ESP-IDF
//! logger (UART / USB-CDC on the robot).  One line per event, prefixed
//! with a fixed tag so the serial stream can be grepped.

use log::{info, warn};

use crate::app::events::MissionEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`MissionEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events written since construction.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &MissionEvent) {
        self.emitted += 1;
        match event {
            MissionEvent::Telemetry(t) => {
                info!(
                    "TELEM | state={:?} | fire={} zone={:?} on_aim={} | \
                     pan={} tilt={} | cycles={} extinguished={} | last_fault={:?}",
                    t.state,
                    t.fire.detected,
                    t.fire.zone,
                    t.fire.on_aim,
                    t.aim.pan,
                    t.aim.tilt,
                    t.cycles,
                    t.extinguished,
                    t.last_fault,
                );
            }
            MissionEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
            }
            MissionEvent::FireAcquired { zone, pan } => {
                info!("FIRE | acquired zone={:?} pan={}", zone, pan);
            }
            MissionEvent::AimCentered { tilt, steps } => {
                info!("FIRE | centered tilt={} after {} steps", tilt, steps);
            }
            MissionEvent::Extinguished { polls } => {
                info!("FIRE | extinguished after {} polls", polls);
            }
            MissionEvent::CycleAborted(fault) => {
                warn!("CYCLE | aborted: {}", fault);
            }
            MissionEvent::CycleComplete(n) => {
                info!("CYCLE | #{} complete", n);
            }
            MissionEvent::Started(state) => {
                info!("START | initial_state={:?}", state);
            }
        }
    }
}
