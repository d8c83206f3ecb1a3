//! System configuration parameters
//!
//! All tunable parameters for the Firebot control loop. The defaults are
//! the calibration the robot ships with; nothing is persisted, so a new
//! calibration means a new build.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Full-scale value of a 10-bit sensor reading.
pub const SENSOR_FULL_SCALE: u16 = 1023;

/// Servo pulse calibration, in servo ticks (16 µs each).
///
/// One calibration is shared by the pan and tilt servos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoCalibration {
    /// 0° position (≈ 1.0 ms pulse).
    pub min: u16,
    /// 90° position (≈ 1.5 ms pulse).
    pub center: u16,
    /// 180° position (≈ 2.0 ms pulse).
    pub max: u16,
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            min: 62,
            center: 94,
            max: 125,
        }
    }
}

impl ServoCalibration {
    /// Clamp a commanded position into `[min, max]`.
    ///
    /// Never panics; an inverted calibration resolves to `max`.
    pub fn clamp(&self, ticks: u16) -> u16 {
        ticks.max(self.min).min(self.max)
    }

    /// Number of single-tick steps across the full range (0 when inverted).
    pub fn span(&self) -> u16 {
        self.max.saturating_sub(self.min)
    }
}

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Thresholds ---
    /// Flame channel reading above which fire is considered present.
    pub fire_threshold: u16,
    /// Line channel reading above which the track is considered under the sensor.
    pub line_threshold: u16,

    // --- Servos ---
    pub servo: ServoCalibration,

    // --- Timing ---
    /// Pause after every servo step before sampling (milliseconds).
    pub settle_delay_ms: u32,
    /// Poll interval while the pump is running (milliseconds).
    pub suppression_poll_ms: u32,
    /// Poll interval of the line-following pre-phase (milliseconds).
    pub line_follow_poll_ms: u32,

    // --- Mission shape ---
    /// Run the line-following pre-phase before every search.
    pub line_following_enabled: bool,
    /// Empty search passes before the cycle is abandoned (0 = search forever).
    pub search_pass_limit: u32,
    /// Suppression polls before the pump is cut (0 = no cutoff).
    pub suppression_poll_limit: u32,

    // --- Telemetry ---
    /// Control ticks between telemetry records.
    pub telemetry_interval_ticks: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            // Thresholds
            fire_threshold: 500,
            line_threshold: 500,

            servo: ServoCalibration::default(),

            // Timing
            settle_delay_ms: 30,
            suppression_poll_ms: 100,
            line_follow_poll_ms: 50,

            // Mission shape
            line_following_enabled: false,
            search_pass_limit: 0,
            suppression_poll_limit: 600, // 60 s of pumping

            telemetry_interval_ticks: 20,
        }
    }
}

impl SystemConfig {
    /// Default calibration with the line-following pre-phase switched on.
    pub fn line_follower() -> Self {
        Self {
            line_following_enabled: true,
            ..Self::default()
        }
    }

    /// Reject configurations the control loop cannot run safely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.servo;
        if !(s.min < s.center && s.center < s.max) {
            return Err(ConfigError("servo calibration must satisfy min < center < max"));
        }
        if self.fire_threshold >= SENSOR_FULL_SCALE {
            return Err(ConfigError("fire_threshold above sensor full scale"));
        }
        if self.line_threshold >= SENSOR_FULL_SCALE {
            return Err(ConfigError("line_threshold above sensor full scale"));
        }
        if self.settle_delay_ms == 0 {
            return Err(ConfigError("settle_delay_ms must be non-zero"));
        }
        if self.suppression_poll_ms <= self.settle_delay_ms {
            return Err(ConfigError(
                "suppression_poll_ms must be coarser than settle_delay_ms",
            ));
        }
        if self.line_follow_poll_ms == 0 {
            return Err(ConfigError("line_follow_poll_ms must be non-zero"));
        }
        Ok(())
    }
}
