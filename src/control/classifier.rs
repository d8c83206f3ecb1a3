//! Flame-sensor classification.
//!
//! The three flame sensors are stacked vertically behind the nozzle.  The
//! classifier reports the first one above threshold in the fixed order
//! MID → BOTTOM → TOP, so at most one zone comes out of a call even when
//! several sensors are lit.

use crate::fsm::context::{Channel, FireZone, SampleSet};

const PRECEDENCE: [FireZone; 3] = [FireZone::Mid, FireZone::Bottom, FireZone::Top];

/// Classify a snapshot.  `Some(zone)` means fire detected.
pub fn classify(samples: &SampleSet, threshold: u16) -> Option<FireZone> {
    PRECEDENCE
        .into_iter()
        .find(|zone| samples.get(zone.channel()) > threshold)
}

/// MID channel above threshold: the nozzle is on target.
pub fn mid_on_target(samples: &SampleSet, threshold: u16) -> bool {
    samples.get(Channel::FlameMid) > threshold
}

/// MID channel strictly below threshold: the flame is gone.
///
/// A reading exactly at threshold is neither on target nor lost.
pub fn mid_lost(samples: &SampleSet, threshold: u16) -> bool {
    samples.get(Channel::FlameMid) < threshold
}
