//! Port traits — the hexagonal boundary between mission logic and the robot.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MissionService / controllers (domain)
//! ```
//!
//! Driven adapters (sensor array, servos, pump, indicators, drive motors,
//! event sinks) implement these traits.  The controllers and the
//! [`MissionService`](super::service::MissionService) consume them via
//! generics, so the domain core never touches a register.
//!
//! Waiting is not a port of its own: every rig also implements
//! [`embedded_hal::delay::DelayNs`], which lets tests run sweeps on
//! simulated time.

use embedded_hal::delay::DelayNs;

use crate::control::line_follow::DriveCommand;
use crate::error::SensorError;
use crate::fsm::context::{CHANNEL_COUNT, SampleSet};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the domain calls this to obtain sensor data.
pub trait SensorPort {
    /// Blocking single-channel conversion, scaled to the 10-bit range.
    fn read_channel(&mut self, channel: usize) -> Result<u16, SensorError>;

    /// Read every channel in index order into one snapshot.
    ///
    /// The first failing channel aborts the whole snapshot; a partially
    /// filled `SampleSet` is never returned.
    fn sample_all(&mut self) -> Result<SampleSet, SensorError> {
        let mut raw = [0u16; CHANNEL_COUNT];
        for (channel, slot) in raw.iter_mut().enumerate() {
            *slot = self.read_channel(channel)?;
        }
        Ok(SampleSet::new(raw))
    }
}

// ───────────────────────────────────────────────────────────────
// Aim port (driven adapter: domain → servos)
// ───────────────────────────────────────────────────────────────

/// Open-loop servo positioning, in servo ticks.  No feedback.
pub trait AimPort {
    fn set_pan(&mut self, ticks: u16);
    fn set_tilt(&mut self, ticks: u16);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (driven adapter: domain → outputs)
// ───────────────────────────────────────────────────────────────

/// Discrete status indicators on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Indicator {
    Searching,
    AimLow,
    AimHigh,
    Suppressing,
}

impl Indicator {
    pub const ALL: [Indicator; 4] = [
        Indicator::Searching,
        Indicator::AimLow,
        Indicator::AimHigh,
        Indicator::Suppressing,
    ];
}

/// Write-side port for on/off outputs.
pub trait ActuatorPort {
    fn set_indicator(&mut self, indicator: Indicator, on: bool);

    /// Switch the suppression pump.
    fn set_pump(&mut self, on: bool);

    /// Pump off, every indicator off — safe state.
    fn all_off(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Drive port (driven adapter: domain → wheel motors)
// ───────────────────────────────────────────────────────────────

/// Wheel motors of the line-following variant.
pub trait DrivePort {
    fn drive(&mut self, command: DriveCommand);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`MissionEvent`](super::events::MissionEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::MissionEvent);
}

// ───────────────────────────────────────────────────────────────
// Whole-robot bundle
// ───────────────────────────────────────────────────────────────

/// Everything the mission sequencer drives.  Blanket-implemented, so any
/// type providing the individual ports qualifies.
pub trait RobotPort: SensorPort + AimPort + ActuatorPort + DrivePort + DelayNs {}

impl<T> RobotPort for T where T: SensorPort + AimPort + ActuatorPort + DrivePort + DelayNs {}
