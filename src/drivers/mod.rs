//! Actuator drivers, hardware initialisation, and the watchdog.

pub mod drive;
pub mod hw_init;
pub mod indicators;
pub mod pump;
pub mod servo;
pub mod watchdog;
