//! Unified error types for the Firebot firmware.
//!
//! A single `Error` enum that every runtime failure converts into, so the
//! mission sequencer handles failures uniformly: record, fall back to RESET,
//! retry.  All variants are `Copy` so they can be stored in the FSM context
//! and carried inside events without allocation.  A rejected configuration
//! is a [`ConfigError`] and stops the service from being built at all.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A sensor channel could not be sampled.
    Sensor(SensorError),
    /// A mission phase ended without reaching its goal.
    Mission(MissionFault),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Mission(e) => write!(f, "mission: {e}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// The ADC conversion did not complete within its hardware bound.
    ReadTimeout,
    /// The ADC driver reported a failure other than a timeout.
    AdcReadFailed,
    /// A channel index outside the sensor array was requested.
    InvalidChannel(u8),
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadTimeout => write!(f, "ADC read timed out"),
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::InvalidChannel(ch) => write!(f, "invalid channel {ch}"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Mission faults
// ---------------------------------------------------------------------------

/// Reasons a mission cycle returned to RESET without extinguishing a fire.
///
/// None of these are fatal: the sequencer records the fault, emits
/// [`MissionEvent::CycleAborted`](crate::app::events::MissionEvent) and
/// starts the next cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissionFault {
    /// The horizontal search hit its pass limit without a detection.
    SweepExhausted,
    /// Vertical correction reached its bound before MID crossed threshold.
    AimAbort,
    /// The suppression poll limit elapsed while MID was still lit.
    SuppressionTimeout,
    /// Sampling failed twice in a row.
    Hardware(SensorError),
}

impl fmt::Display for MissionFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SweepExhausted => write!(f, "search sweep exhausted"),
            Self::AimAbort => write!(f, "aim correction aborted"),
            Self::SuppressionTimeout => write!(f, "suppression timed out"),
            Self::Hardware(e) => write!(f, "hardware fault ({e})"),
        }
    }
}

impl From<MissionFault> for Error {
    fn from(e: MissionFault) -> Self {
        Self::Mission(e)
    }
}

impl Error {
    /// Collapse an error into the fault recorded against a mission cycle.
    pub fn as_mission_fault(self) -> MissionFault {
        match self {
            Self::Mission(fault) => fault,
            Self::Sensor(e) => MissionFault::Hardware(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// A [`SystemConfig`](crate::config::SystemConfig) the control loop cannot
/// run with.  Raised before the mission starts, never during a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError(pub &'static str);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
