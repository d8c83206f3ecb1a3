//! Horizontal search: sweep the pan servo until a flame sensor lights.
//!
//! One pass is two sweeps.  The first climbs from the start position to
//! `max` one tick at a time.  Only if it comes up empty does the second run,
//! from the original start position down to `min`.  A start already at
//! `min` has nothing below it, so the second sweep then comes back down
//! from `max`.  Every step commands the servo, waits the settle delay,
//! samples, and classifies.  An empty pass always ends at `min`.
//!
//! ```text
//!   min ◀────── second sweep ────── start ────── first sweep ──────▶ max
//! ```

use log::{debug, info};

use crate::app::ports::{AimPort, SensorPort};
use crate::config::SystemConfig;
use crate::error::{MissionFault, Result};
use crate::fsm::context::FireZone;
use embedded_hal::delay::DelayNs;

use super::{classifier, sample};

/// Result of one search pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Last commanded pan position: the detection angle, or `min` after an
    /// empty pass.
    pub angle: u16,
    /// Zone reported at the detection step.
    pub zone: Option<FireZone>,
    /// Servo steps taken across both sweeps.
    pub steps: u32,
}

impl SearchOutcome {
    pub fn detected(&self) -> bool {
        self.zone.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    Up,
    Down,
}

/// Run one bidirectional search pass starting at `start`.
///
/// `start` is clamped into the servo range first.  A start on `max` skips
/// the upward sweep; a start on `min` sweeps all the way up and back.
pub fn search(
    hw: &mut (impl SensorPort + AimPort + DelayNs),
    config: &SystemConfig,
    start: u16,
) -> Result<SearchOutcome> {
    let start = config.servo.clamp(start);
    let mut outcome = SearchOutcome {
        angle: start,
        zone: None,
        steps: 0,
    };

    sweep(hw, config, start, Sweep::Up, &mut outcome)?;
    if outcome.detected() {
        info!(
            "search: {:?} fire at pan={} on the upward sweep ({} steps)",
            outcome.zone, outcome.angle, outcome.steps
        );
        return Ok(outcome);
    }

    let down_from = if start == config.servo.min {
        outcome.angle
    } else {
        start
    };
    sweep(hw, config, down_from, Sweep::Down, &mut outcome)?;
    if outcome.detected() {
        info!(
            "search: {:?} fire at pan={} on the downward sweep ({} steps)",
            outcome.zone, outcome.angle, outcome.steps
        );
    } else {
        debug!(
            "search: pass empty after {} steps, pan={}",
            outcome.steps, outcome.angle
        );
    }
    Ok(outcome)
}

/// Repeat search passes until a fire is found or `max_passes` passes came
/// up empty.  Each pass resumes from where the previous one ended.
pub fn search_until_found(
    hw: &mut (impl SensorPort + AimPort + DelayNs),
    config: &SystemConfig,
    start: u16,
    max_passes: u32,
) -> Result<SearchOutcome> {
    let mut angle = start;
    for pass in 1..=max_passes {
        let outcome = search(hw, config, angle)?;
        if outcome.detected() {
            return Ok(outcome);
        }
        debug!("search: pass {pass}/{max_passes} empty");
        angle = outcome.angle;
    }
    Err(MissionFault::SweepExhausted.into())
}

fn sweep(
    hw: &mut (impl SensorPort + AimPort + DelayNs),
    config: &SystemConfig,
    start: u16,
    direction: Sweep,
    outcome: &mut SearchOutcome,
) -> Result<()> {
    let servo = &config.servo;
    let mut angle = start;

    loop {
        angle = match direction {
            Sweep::Up if angle < servo.max => angle + 1,
            Sweep::Down if angle > servo.min => angle - 1,
            _ => return Ok(()),
        };

        hw.set_pan(angle);
        hw.delay_ms(config.settle_delay_ms);
        let samples = sample(hw)?;
        outcome.steps += 1;
        outcome.angle = angle;

        if let Some(zone) = classifier::classify(&samples, config.fire_threshold) {
            outcome.zone = Some(zone);
            return Ok(());
        }
    }
}
