//! Vertical aim correction.

use crate::mock_hw::{MockRig, dark, lit};

use firebot::config::SystemConfig;
use firebot::control::aim::correct;
use firebot::fsm::context::{AimPosition, Channel, FireZone, SampleSet};

#[test]
fn bottom_fire_centers_after_k_steps_down() {
    let cfg = SystemConfig::default();
    let k = 4;
    let target = cfg.servo.center - k;
    let mut rig = MockRig::with_scene(move |s| {
        if s.tilt <= target {
            lit(Channel::FlameMid)
        } else {
            lit(Channel::FlameBottom)
        }
    });
    let mut aim = AimPosition::centered(&cfg);

    let outcome = correct(&mut rig, &cfg, FireZone::Bottom, &mut aim).unwrap();

    assert!(outcome.on_aim);
    assert_eq!(outcome.zone, FireZone::Mid);
    assert_eq!(outcome.steps, u32::from(k));
    assert_eq!(aim.tilt, target);
    assert_eq!(rig.tilt_commands(), vec![93, 92, 91, 90]);
}

#[test]
fn top_fire_steps_up() {
    let cfg = SystemConfig::default();
    let mut rig = MockRig::with_scene(|s| {
        if s.tilt >= 100 {
            lit(Channel::FlameMid)
        } else {
            SampleSet::default()
        }
    });
    let mut aim = AimPosition::centered(&cfg);

    let outcome = correct(&mut rig, &cfg, FireZone::Top, &mut aim).unwrap();

    assert!(outcome.on_aim);
    assert_eq!(outcome.steps, 6);
    assert_eq!(aim.tilt, 100);
}

#[test]
fn correction_restarts_from_center() {
    let cfg = SystemConfig::default();
    let mut rig = MockRig::with_scene(|_| lit(Channel::FlameMid));
    let mut aim = AimPosition {
        pan: 80,
        tilt: cfg.servo.min,
    };

    let outcome = correct(&mut rig, &cfg, FireZone::Top, &mut aim).unwrap();

    assert_eq!(rig.tilt_commands(), vec![cfg.servo.center + 1]);
    assert_eq!(outcome.steps, 1);
    // Pan is not the aim controller's business.
    assert_eq!(aim.pan, 80);
}

#[test]
fn unreached_bound_aborts_without_centering() {
    let cfg = SystemConfig::default();
    let mut rig = MockRig::new(dark());
    let mut aim = AimPosition::centered(&cfg);

    let outcome = correct(&mut rig, &cfg, FireZone::Bottom, &mut aim).unwrap();

    assert!(!outcome.on_aim);
    assert_eq!(outcome.zone, FireZone::Bottom);
    assert_eq!(outcome.steps, u32::from(cfg.servo.center - cfg.servo.min));
    assert_eq!(aim.tilt, cfg.servo.min);
}

#[test]
fn mid_zone_needs_no_correction() {
    let cfg = SystemConfig::default();
    let mut rig = MockRig::new(dark());
    let mut aim = AimPosition::centered(&cfg);

    let outcome = correct(&mut rig, &cfg, FireZone::Mid, &mut aim).unwrap();

    assert!(outcome.on_aim);
    assert_eq!(outcome.steps, 0);
    assert!(rig.calls.is_empty());
}

#[test]
fn bottom_and_top_channels_are_ignored_while_correcting() {
    let cfg = SystemConfig::default();
    // TOP stays lit the whole time; only MID ends the correction.
    let mut rig = MockRig::with_scene(|s| {
        let base = lit(Channel::FlameTop);
        if s.tilt >= 97 { base.with(Channel::FlameMid, 900) } else { base }
    });
    let mut aim = AimPosition::centered(&cfg);

    let outcome = correct(&mut rig, &cfg, FireZone::Top, &mut aim).unwrap();

    assert_eq!(outcome.steps, 3);
    assert_eq!(aim.tilt, 97);
}
