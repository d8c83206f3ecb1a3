//! Control algorithms: fire classification, the three aiming sweeps, and the
//! line-following pre-phase.
//!
//! Every controller is a plain function over port traits plus an explicit
//! state argument.  They block for their whole run (settle delays and polls
//! go through the rig's `DelayNs`) and return a typed outcome, so each can
//! be driven in isolation by a test rig.

pub mod aim;
pub mod classifier;
pub mod line_follow;
pub mod search;
pub mod suppress;

use log::warn;

use crate::app::ports::SensorPort;
use crate::error::Result;
use crate::fsm::context::SampleSet;

/// Take one snapshot, retrying once on failure.
///
/// A second consecutive failure is treated as a hardware fault and
/// propagated to the caller.
pub fn sample(hw: &mut impl SensorPort) -> Result<SampleSet> {
    match hw.sample_all() {
        Ok(samples) => Ok(samples),
        Err(first) => {
            warn!("sensor sample failed ({first}), retrying once");
            Ok(hw.sample_all()?)
        }
    }
}
