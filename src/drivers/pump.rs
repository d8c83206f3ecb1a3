//! Suppression pump driver (logic-level MOSFET, on/off only).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the enable GPIO via hw_init.
//! On host/test: tracks state in-memory only.

use log::debug;

use crate::drivers::hw_init;
use crate::pins;

pub struct PumpDriver {
    running: bool,
    /// Off→on edges since boot.
    starts: u32,
}

impl Default for PumpDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl PumpDriver {
    pub fn new() -> Self {
        Self {
            running: false,
            starts: 0,
        }
    }

    pub fn set(&mut self, on: bool) {
        if on && !self.running {
            self.starts = self.starts.saturating_add(1);
            debug!("pump: start #{}", self.starts);
        }
        hw_init::gpio_write(pins::PUMP_GPIO, on);
        self.running = on;
    }

    pub fn stop(&mut self) {
        self.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }
}
