//! Analog sensor array — three line sensors and three stacked flame sensors.
//!
//! [`SensorArray`] reads the ADC1 channels listed in
//! [`pins::SENSOR_ADC1_CHANNELS`] in index order and scales the 12-bit
//! conversions down to the 10-bit range every threshold is expressed in.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 via the oneshot API (initialised by hw_init).
//! On host/test: reads from static `AtomicU16`s for injection.

#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::{AtomicU16, Ordering};

use crate::app::ports::SensorPort;
use crate::config::SENSOR_FULL_SCALE;
use crate::error::SensorError;
use crate::fsm::context::CHANNEL_COUNT;
use crate::pins;

/// Full-scale value of a raw 12-bit conversion.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Scale a raw 12-bit conversion to the 10-bit contract.
pub const fn scale_to_10bit(raw: u16) -> u16 {
    let raw = if raw > ADC_FULL_SCALE { ADC_FULL_SCALE } else { raw };
    raw >> 2
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
static SIM_CHANNELS: [AtomicU16; CHANNEL_COUNT] = [const { AtomicU16::new(0) }; CHANNEL_COUNT];

/// Set the raw 12-bit value a channel will report.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_channel(channel: usize, raw: u16) {
    if let Some(slot) = SIM_CHANNELS.get(channel) {
        slot.store(raw, Ordering::Relaxed);
    }
}

// ── SensorArray ───────────────────────────────────────────────

pub struct SensorArray {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    adc_channels: [u32; CHANNEL_COUNT],
    /// Conversions that returned an error since boot.
    read_errors: u32,
}

impl Default for SensorArray {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorArray {
    pub fn new() -> Self {
        Self {
            adc_channels: pins::SENSOR_ADC1_CHANNELS,
            read_errors: 0,
        }
    }

    #[cfg(target_os = "espidf")]
    fn read_raw(&self, slot: usize) -> Result<u16, SensorError> {
        crate::drivers::hw_init::adc1_read(self.adc_channels[slot])
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_raw(&self, slot: usize) -> Result<u16, SensorError> {
        Ok(SIM_CHANNELS[slot].load(Ordering::Relaxed))
    }
}

impl SensorPort for SensorArray {
    fn read_channel(&mut self, channel: usize) -> Result<u16, SensorError> {
        if channel >= CHANNEL_COUNT {
            return Err(SensorError::InvalidChannel(channel as u8));
        }
        match self.read_raw(channel) {
            Ok(raw) => {
                let value = scale_to_10bit(raw);
                debug_assert!(value <= SENSOR_FULL_SCALE);
                Ok(value)
            }
            Err(e) => {
                self.read_errors = self.read_errors.saturating_add(1);
                log::error!(
                    "sensor: channel {} read failed: {} ({} failures since boot)",
                    channel,
                    e,
                    self.read_errors
                );
                Err(e)
            }
        }
    }
}
