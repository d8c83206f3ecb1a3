//! Vertical aim correction.
//!
//! Entered with the zone the search reported.  BOTTOM tilts the nozzle down
//! from center, TOP tilts it up, one tick per step.  After each step's
//! settle delay only the MID channel is checked; the correction is done
//! when MID crosses threshold, and gives up at the servo bound.

use embedded_hal::delay::DelayNs;
use log::{info, warn};

use crate::app::ports::{AimPort, SensorPort};
use crate::config::SystemConfig;
use crate::error::Result;
use crate::fsm::context::{AimPosition, FireZone};

use super::{classifier, sample};

/// Result of a vertical correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimOutcome {
    /// `Mid` when centered, otherwise the zone the correction started from.
    pub zone: FireZone,
    /// MID crossed threshold during the sweep.
    pub on_aim: bool,
    /// Servo steps taken.
    pub steps: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tilt {
    Down,
    Up,
}

/// Sweep the tilt servo from center until MID lights up or the bound is hit.
///
/// `aim.tilt` tracks the commanded position throughout.  A `Mid` zone is
/// already centered and returns without moving.
pub fn correct(
    hw: &mut (impl SensorPort + AimPort + DelayNs),
    config: &SystemConfig,
    zone: FireZone,
    aim: &mut AimPosition,
) -> Result<AimOutcome> {
    let servo = &config.servo;
    let mut outcome = AimOutcome {
        zone,
        on_aim: false,
        steps: 0,
    };

    let direction = match zone {
        FireZone::Mid => {
            outcome.on_aim = true;
            return Ok(outcome);
        }
        FireZone::Bottom => Tilt::Down,
        FireZone::Top => Tilt::Up,
    };

    let mut tilt = servo.center;
    aim.tilt = tilt;

    loop {
        tilt = match direction {
            Tilt::Down if tilt > servo.min => tilt - 1,
            Tilt::Up if tilt < servo.max => tilt + 1,
            _ => break,
        };

        hw.set_tilt(tilt);
        aim.tilt = tilt;
        hw.delay_ms(config.settle_delay_ms);
        let samples = sample(hw)?;
        outcome.steps += 1;

        if classifier::mid_on_target(&samples, config.fire_threshold) {
            outcome.on_aim = true;
            outcome.zone = FireZone::Mid;
            info!(
                "aim: centered from {:?} at tilt={} after {} steps",
                zone, tilt, outcome.steps
            );
            return Ok(outcome);
        }
    }

    warn!(
        "aim: {:?} correction reached tilt={} without centering",
        zone, aim.tilt
    );
    Ok(outcome)
}
