//! Firebot Firmware — Main Entry Point
//!
//! Hexagonal architecture around a blocking mission loop.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter                          LogEventSink         │
//! │  (Sensor+Aim+Actuator+Drive+Delay)        (EventSink)          │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            MissionService (pure logic)                 │    │
//! │  │  FSM · search · aim · suppress · line follow           │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::{Context, Result};
use log::info;

use firebot::adapters::hardware::HardwareAdapter;
use firebot::adapters::log_sink::LogEventSink;
use firebot::app::service::MissionService;
use firebot::config::SystemConfig;
use firebot::drivers;
use firebot::sensors::SensorArray;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Firebot v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = SystemConfig::default();
    info!("Config: {}", serde_json::to_string(&config)?);

    // ── 3. Peripherals ────────────────────────────────────────
    drivers::hw_init::init_peripherals().context("peripheral init failed")?;
    let watchdog = drivers::watchdog::Watchdog::new(drivers::watchdog::DEFAULT_TIMEOUT_MS);

    // ── 4. Adapters ───────────────────────────────────────────
    let mut hw = HardwareAdapter::new(SensorArray::new(), watchdog);
    let mut log_sink = LogEventSink::new();

    // ── 5. Mission service ────────────────────────────────────
    let mut mission =
        MissionService::new(config).context("built-in configuration rejected")?;
    mission.start(&mut hw, &mut log_sink);

    info!("System ready. Entering mission loop.");

    // ── 6. Mission loop ───────────────────────────────────────
    // Each tick may block for a full sweep or suppression run; the adapter
    // feeds the watchdog from inside every delay.
    loop {
        mission.tick(&mut hw, &mut log_sink);
        hw.feed_watchdog();
    }
}
