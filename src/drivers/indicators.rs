//! Discrete status LEDs: searching, aim-low, aim-high, suppressing.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: one GPIO per LED via hw_init.
//! On host/test: tracks state in-memory only.

use crate::app::ports::Indicator;
use crate::drivers::hw_init;
use crate::pins;

const fn gpio_for(indicator: Indicator) -> i32 {
    match indicator {
        Indicator::Searching => pins::SEARCHING_LED_GPIO,
        Indicator::AimLow => pins::AIM_LOW_LED_GPIO,
        Indicator::AimHigh => pins::AIM_HIGH_LED_GPIO,
        Indicator::Suppressing => pins::SUPPRESSING_LED_GPIO,
    }
}

const fn slot(indicator: Indicator) -> usize {
    match indicator {
        Indicator::Searching => 0,
        Indicator::AimLow => 1,
        Indicator::AimHigh => 2,
        Indicator::Suppressing => 3,
    }
}

pub struct IndicatorBank {
    lit: [bool; Indicator::ALL.len()],
}

impl Default for IndicatorBank {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorBank {
    pub fn new() -> Self {
        Self {
            lit: [false; Indicator::ALL.len()],
        }
    }

    pub fn set(&mut self, indicator: Indicator, on: bool) {
        hw_init::gpio_write(gpio_for(indicator), on);
        self.lit[slot(indicator)] = on;
    }

    pub fn off(&mut self) {
        for indicator in Indicator::ALL {
            self.set(indicator, false);
        }
    }

    pub fn is_lit(&self, indicator: Indicator) -> bool {
        self.lit[slot(indicator)]
    }
}
