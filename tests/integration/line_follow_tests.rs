//! Line-following poll step.

use crate::mock_hw::{MockRig, RigCall};

use firebot::config::SystemConfig;
use firebot::control::line_follow::{DriveCommand, follow_step};
use firebot::fsm::context::{Channel, SampleSet};

#[test]
fn step_drives_then_waits_the_poll_interval() {
    let cfg = SystemConfig::line_follower();
    let mut rig = MockRig::with_scene(|_| SampleSet::default().with(Channel::LineLeft, 800));

    let command = follow_step(&mut rig, &cfg).unwrap();

    assert_eq!(command, DriveCommand::Left);
    assert_eq!(rig.calls, vec![RigCall::Sample, RigCall::Drive(DriveCommand::Left)]);
    assert_eq!(rig.now_ms(), u64::from(cfg.line_follow_poll_ms));
}

#[test]
fn losing_the_line_stops_the_motors() {
    let cfg = SystemConfig::line_follower();
    let mut rig = MockRig::with_scene(|s| {
        if s.samples == 1 {
            SampleSet::default().with(Channel::LineRight, 800)
        } else {
            SampleSet::default()
        }
    });

    assert_eq!(follow_step(&mut rig, &cfg).unwrap(), DriveCommand::Right);
    assert_eq!(follow_step(&mut rig, &cfg).unwrap(), DriveCommand::Stop);
    assert_eq!(rig.drive_commands(), vec![DriveCommand::Right, DriveCommand::Stop]);
}

#[test]
fn sensor_fault_leaves_the_motors_alone() {
    let cfg = SystemConfig::line_follower();
    let mut rig = MockRig::with_scene(|_| SampleSet::default().with(Channel::LineCenter, 800));
    rig.fail_next_samples(2);

    assert!(follow_step(&mut rig, &cfg).is_err());
    assert!(rig.drive_commands().is_empty());
}
