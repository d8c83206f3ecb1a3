//! Wheel motor pair of the line-following variant.
//!
//! Each side has a single enable line; steering is done by switching one
//! side off.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the two enable GPIOs via hw_init.
//! On host/test: tracks the last command in-memory only.

use crate::control::line_follow::DriveCommand;
use crate::drivers::hw_init;
use crate::pins;

/// Left/right motor enables for a command.
pub const fn motor_levels(command: DriveCommand) -> (bool, bool) {
    match command {
        DriveCommand::Forward => (true, true),
        DriveCommand::Left => (false, true),
        DriveCommand::Right => (true, false),
        DriveCommand::Stop => (false, false),
    }
}

#[derive(Default)]
pub struct DriveMotors {
    current: DriveCommand,
}

impl DriveMotors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, command: DriveCommand) {
        let (left, right) = motor_levels(command);
        hw_init::gpio_write(pins::DRIVE_LEFT_GPIO, left);
        hw_init::gpio_write(pins::DRIVE_RIGHT_GPIO, right);
        self.current = command;
    }

    pub fn current(&self) -> DriveCommand {
        self.current
    }
}
