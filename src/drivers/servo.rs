//! Hobby-servo driver for the pan and tilt axes.
//!
//! Positions are expressed in servo ticks of 16 µs, the resolution of the
//! timer the mechanism was first calibrated on: 62/94/125 ticks give
//! roughly 1.0/1.5/2.0 ms pulses.  Each tick count is converted to a duty
//! value for the shared 50 Hz, 14-bit LEDC timer.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: writes the LEDC channel via hw_init.
//! On host/test: tracks the commanded position in-memory only.

use crate::drivers::hw_init;
use crate::pins;

/// Pulse width of one servo tick.
pub const TICK_US: u32 = 16;

/// LEDC frame period at the servo frame rate.
const PERIOD_US: u32 = 1_000_000 / pins::SERVO_PWM_FREQ_HZ;

/// Pulse width for a tick count.
pub const fn ticks_to_pulse_us(ticks: u16) -> u32 {
    ticks as u32 * TICK_US
}

/// LEDC duty for a pulse width, rounded down.
pub const fn pulse_us_to_duty(pulse_us: u32) -> u32 {
    let full_scale = 1u32 << pins::SERVO_PWM_RESOLUTION_BITS;
    let pulse_us = if pulse_us > PERIOD_US { PERIOD_US } else { pulse_us };
    pulse_us * full_scale / PERIOD_US
}

pub struct Servo {
    channel: u32,
    position: Option<u16>,
}

impl Servo {
    pub fn pan() -> Self {
        Self::new(hw_init::LEDC_CH_PAN)
    }

    pub fn tilt() -> Self {
        Self::new(hw_init::LEDC_CH_TILT)
    }

    fn new(channel: u32) -> Self {
        Self {
            channel,
            position: None,
        }
    }

    /// Command a position.  Open loop: there is no feedback that the horn
    /// actually got there.
    pub fn set(&mut self, ticks: u16) {
        let duty = pulse_us_to_duty(ticks_to_pulse_us(ticks));
        hw_init::ledc_set(self.channel, duty);
        self.position = Some(ticks);
    }

    /// Last commanded position; `None` until the first `set`.
    pub fn position(&self) -> Option<u16> {
        self.position
    }
}
