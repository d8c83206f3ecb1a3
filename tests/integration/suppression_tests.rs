//! Suppression controller: pump edges and the poll loop.

use crate::mock_hw::{MockRig, lit};

use firebot::app::ports::Indicator;
use firebot::config::SystemConfig;
use firebot::control::suppress::suppress_while_on_aim;
use firebot::error::{Error, SensorError};
use firebot::fsm::context::{Channel, FireState, FireZone, SampleSet};

fn on_aim() -> FireState {
    FireState {
        detected: true,
        zone: FireZone::Mid,
        on_aim: true,
    }
}

/// MID lit for the first `n` snapshots, dark after.
fn burns_for(n: u32) -> MockRig {
    MockRig::with_scene(move |s| {
        if s.samples <= n {
            lit(Channel::FlameMid)
        } else {
            SampleSet::default()
        }
    })
}

#[test]
fn stops_on_first_low_sample() {
    let cfg = SystemConfig::default();
    let mut rig = burns_for(2);
    let mut fire = on_aim();

    let outcome = suppress_while_on_aim(&mut rig, &cfg, &mut fire).unwrap();

    assert!(outcome.extinguished);
    assert_eq!(outcome.polls, 3);
    assert!(!fire.on_aim);
    assert_eq!(rig.pump_edges(), vec![true, false]);
    assert_eq!(rig.now_ms(), 3 * u64::from(cfg.suppression_poll_ms));
}

#[test]
fn pump_brackets_the_polls_exactly() {
    let cfg = SystemConfig::default();
    let mut rig = burns_for(4);
    let mut fire = on_aim();

    suppress_while_on_aim(&mut rig, &cfg, &mut fire).unwrap();

    let calls = &rig.calls;
    let first_sample = calls.iter().position(|c| *c == crate::mock_hw::RigCall::Sample).unwrap();
    let last_sample = calls.iter().rposition(|c| *c == crate::mock_hw::RigCall::Sample).unwrap();
    let pump_on = calls.iter().position(|c| *c == crate::mock_hw::RigCall::Pump(true)).unwrap();
    let pump_off = calls.iter().position(|c| *c == crate::mock_hw::RigCall::Pump(false)).unwrap();
    assert!(pump_on < first_sample);
    assert!(pump_off > last_sample);
    assert!(!rig.indicator_lit(Indicator::Suppressing));
}

#[test]
fn reading_at_threshold_keeps_pumping() {
    let cfg = SystemConfig::default();
    let threshold = cfg.fire_threshold;
    let mut rig = MockRig::with_scene(move |s| {
        if s.samples == 1 {
            SampleSet::default().with(Channel::FlameMid, threshold)
        } else {
            SampleSet::default()
        }
    });
    let mut fire = on_aim();

    let outcome = suppress_while_on_aim(&mut rig, &cfg, &mut fire).unwrap();

    assert_eq!(outcome.polls, 2);
}

#[test]
fn poll_limit_cuts_the_pump() {
    let cfg = SystemConfig {
        suppression_poll_limit: 5,
        ..SystemConfig::default()
    };
    let mut rig = MockRig::with_scene(|_| lit(Channel::FlameMid));
    let mut fire = on_aim();

    let outcome = suppress_while_on_aim(&mut rig, &cfg, &mut fire).unwrap();

    assert!(!outcome.extinguished);
    assert_eq!(outcome.polls, 5);
    assert!(fire.on_aim);
    assert_eq!(rig.pump_edges(), vec![true, false]);
}

#[test]
fn sensor_fault_still_switches_the_pump_off() {
    let cfg = SystemConfig::default();
    let mut rig = MockRig::with_scene(|_| lit(Channel::FlameMid));
    rig.fail_next_samples(2);
    let mut fire = on_aim();

    let err = suppress_while_on_aim(&mut rig, &cfg, &mut fire).unwrap_err();

    assert_eq!(err, Error::Sensor(SensorError::ReadTimeout));
    assert_eq!(rig.pump_edges(), vec![true, false]);
}
