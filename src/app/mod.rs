//! Application core — mission logic, zero I/O.
//!
//! This module contains the business rules of the fire-fighting robot:
//! mission sequencing and the events it reports.  All interaction with
//! hardware happens through **port traits** defined in [`ports`], keeping
//! this layer fully testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
