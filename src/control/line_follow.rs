//! Line-following pre-phase.
//!
//! Three downward-facing reflectance sensors steer the robot along a track.
//! The center sensor takes priority, then left, then right; when none of
//! them sees the line the robot has reached a junction and stops, which
//! hands control to the fire search.

use embedded_hal::delay::DelayNs;
use log::debug;

use crate::app::ports::{DrivePort, SensorPort};
use crate::config::SystemConfig;
use crate::error::Result;
use crate::fsm::context::{Channel, SampleSet};

use super::sample;

/// Wheel-motor command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DriveCommand {
    Forward,
    /// Left motor off, right motor on.
    Left,
    /// Left motor on, right motor off.
    Right,
    #[default]
    Stop,
}

/// Map a snapshot to a drive command.
pub fn steer(samples: &SampleSet, threshold: u16) -> DriveCommand {
    if samples.get(Channel::LineCenter) > threshold {
        DriveCommand::Forward
    } else if samples.get(Channel::LineLeft) > threshold {
        DriveCommand::Left
    } else if samples.get(Channel::LineRight) > threshold {
        DriveCommand::Right
    } else {
        DriveCommand::Stop
    }
}

/// One follower poll: sample, steer, command the motors, wait.
pub fn follow_step(
    hw: &mut (impl SensorPort + DrivePort + DelayNs),
    config: &SystemConfig,
) -> Result<DriveCommand> {
    let samples = sample(hw)?;
    let command = steer(&samples, config.line_threshold);
    hw.drive(command);
    debug!("line: {:?}", command);
    hw.delay_ms(config.line_follow_poll_ms);
    Ok(command)
}
