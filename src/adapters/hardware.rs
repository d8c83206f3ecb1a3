//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the [`SensorArray`] and every actuator driver, exposing them
//! through [`SensorPort`], [`AimPort`], [`ActuatorPort`] and [`DrivePort`],
//! plus the blocking [`DelayNs`] every controller waits on.  This is the
//! only module in the system that touches actual hardware.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{ActuatorPort, AimPort, DrivePort, Indicator, SensorPort};
use crate::control::line_follow::DriveCommand;
use crate::drivers::drive::DriveMotors;
use crate::drivers::indicators::IndicatorBank;
use crate::drivers::pump::PumpDriver;
use crate::drivers::servo::Servo;
use crate::drivers::watchdog::Watchdog;
use crate::error::SensorError;
use crate::sensors::SensorArray;

/// Longest single sleep between watchdog feeds.
const FEED_SLICE_MS: u32 = 100;

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter {
    sensors: SensorArray,
    pan: Servo,
    tilt: Servo,
    pump: PumpDriver,
    indicators: IndicatorBank,
    drive: DriveMotors,
    watchdog: Watchdog,
    /// Total time spent in `delay_ns`.
    slept_ns: u64,
}

impl HardwareAdapter {
    pub fn new(sensors: SensorArray, watchdog: Watchdog) -> Self {
        Self {
            sensors,
            pan: Servo::pan(),
            tilt: Servo::tilt(),
            pump: PumpDriver::new(),
            indicators: IndicatorBank::new(),
            drive: DriveMotors::new(),
            watchdog,
            slept_ns: 0,
        }
    }

    pub fn feed_watchdog(&self) {
        self.watchdog.feed();
    }

    pub fn pump_running(&self) -> bool {
        self.pump.is_running()
    }

    pub fn indicator_lit(&self, indicator: Indicator) -> bool {
        self.indicators.is_lit(indicator)
    }

    /// Last commanded (pan, tilt).
    pub fn servo_positions(&self) -> (Option<u16>, Option<u16>) {
        (self.pan.position(), self.tilt.position())
    }

    pub fn drive_command(&self) -> DriveCommand {
        self.drive.current()
    }

    pub fn slept_ms(&self) -> u64 {
        self.slept_ns / 1_000_000
    }

    #[cfg(target_os = "espidf")]
    fn sleep_slice(&mut self, ns: u32) {
        esp_idf_svc::hal::delay::FreeRtos.delay_ns(ns);
    }

    #[cfg(not(target_os = "espidf"))]
    fn sleep_slice(&mut self, _ns: u32) {}
}

// ── SensorPort implementation ─────────────────────────────────

impl SensorPort for HardwareAdapter {
    fn read_channel(&mut self, channel: usize) -> Result<u16, SensorError> {
        self.sensors.read_channel(channel)
    }
}

// ── AimPort implementation ────────────────────────────────────

impl AimPort for HardwareAdapter {
    fn set_pan(&mut self, ticks: u16) {
        self.pan.set(ticks);
    }

    fn set_tilt(&mut self, ticks: u16) {
        self.tilt.set(ticks);
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_indicator(&mut self, indicator: Indicator, on: bool) {
        self.indicators.set(indicator, on);
    }

    fn set_pump(&mut self, on: bool) {
        self.pump.set(on);
    }

    fn all_off(&mut self) {
        self.pump.stop();
        self.indicators.off();
    }
}

// ── DrivePort implementation ──────────────────────────────────

impl DrivePort for HardwareAdapter {
    fn drive(&mut self, command: DriveCommand) {
        self.drive.apply(command);
    }
}

// ── Delay ─────────────────────────────────────────────────────

impl DelayNs for HardwareAdapter {
    /// Sleep in slices, feeding the watchdog between them, so a long
    /// sweep or suppression run never trips it.
    fn delay_ns(&mut self, ns: u32) {
        const SLICE_NS: u32 = FEED_SLICE_MS * 1_000_000;
        let mut remaining = ns;
        while remaining > 0 {
            let slice = remaining.min(SLICE_NS);
            self.sleep_slice(slice);
            self.watchdog.feed();
            remaining -= slice;
        }
        self.slept_ns += u64::from(ns);
    }
}
