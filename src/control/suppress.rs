//! Suppression: run the pump while the flame stays centered.
//!
//! The pump and the suppressing indicator come on together, then the MID
//! channel is polled at the coarse suppression interval.  The first poll
//! with MID below threshold ends the run.  The pump is switched off on every
//! exit path, including a sensor fault, so its on/off edges bracket the
//! on-aim interval exactly once.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::{ActuatorPort, Indicator, SensorPort};
use crate::config::SystemConfig;
use crate::error::Result;
use crate::fsm::context::FireState;

use super::{classifier, sample};

/// Result of a suppression run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuppressionOutcome {
    /// Polls taken while the pump was on.
    pub polls: u32,
    /// MID dropped below threshold; `false` means the poll limit cut the run.
    pub extinguished: bool,
}

/// Pump until MID drops below threshold.
///
/// Expects `fire.zone == Mid` and `fire.on_aim`; clears `on_aim` when the
/// flame is gone.  `suppression_poll_limit` (when non-zero) caps the run.
pub fn suppress_while_on_aim(
    hw: &mut (impl SensorPort + ActuatorPort + DelayNs),
    config: &SystemConfig,
    fire: &mut FireState,
) -> Result<SuppressionOutcome> {
    hw.set_pump(true);
    hw.set_indicator(Indicator::Suppressing, true);
    info!("suppress: pump on");

    let result = poll_until_lost(hw, config, fire);

    hw.set_pump(false);
    hw.set_indicator(Indicator::Suppressing, false);

    match &result {
        Ok(outcome) if outcome.extinguished => {
            info!("suppress: flame lost after {} polls, pump off", outcome.polls);
        }
        Ok(outcome) => {
            warn!("suppress: poll limit reached after {} polls, pump off", outcome.polls);
        }
        Err(e) => warn!("suppress: aborted by {e}, pump off"),
    }
    result
}

fn poll_until_lost(
    hw: &mut (impl SensorPort + DelayNs),
    config: &SystemConfig,
    fire: &mut FireState,
) -> Result<SuppressionOutcome> {
    let limit = config.suppression_poll_limit;
    let mut outcome = SuppressionOutcome {
        polls: 0,
        extinguished: !fire.on_aim,
    };

    while fire.on_aim {
        if limit != 0 && outcome.polls >= limit {
            return Ok(outcome);
        }
        hw.delay_ms(config.suppression_poll_ms);
        let samples = sample(hw)?;
        outcome.polls += 1;

        if classifier::mid_lost(&samples, config.fire_threshold) {
            fire.on_aim = false;
            outcome.extinguished = true;
        }
    }
    Ok(outcome)
}
