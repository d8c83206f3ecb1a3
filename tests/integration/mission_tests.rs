//! End-to-end mission cycles through `MissionService` on the mock rig.

use crate::mock_hw::{MockRig, RecordingSink, RigCall, dark, lit};

use firebot::app::events::MissionEvent;
use firebot::app::ports::Indicator;
use firebot::app::service::MissionService;
use firebot::config::SystemConfig;
use firebot::control::line_follow::DriveCommand;
use firebot::error::{ConfigError, MissionFault, SensorError};
use firebot::fsm::StateId;
use firebot::fsm::context::{Channel, FireState, FireZone, SampleSet};

fn started(config: SystemConfig, rig: &mut MockRig) -> (MissionService<MockRig>, RecordingSink) {
    let mut mission = MissionService::new(config).unwrap();
    let mut sink = RecordingSink::new();
    mission.start(rig, &mut sink);
    (mission, sink)
}

/// Fire up and to the right of center: TOP lights once the pan reaches
/// 99, MID once the tilt reaches 99 too.  Goes out on the third poll with
/// the pump running.
fn top_fire_scene() -> impl FnMut(&crate::mock_hw::RigState) -> SampleSet {
    let mut pumped = 0;
    move |s| {
        if s.pump {
            pumped += 1;
        }
        if s.pan < 99 || pumped >= 3 {
            SampleSet::default()
        } else if s.tilt >= 99 {
            lit(Channel::FlameMid)
        } else {
            lit(Channel::FlameTop)
        }
    }
}

#[test]
fn inverted_servo_calibration_is_rejected_at_construction() {
    let mut config = SystemConfig::default();
    config.servo.min = 130;

    let result = MissionService::<MockRig>::new(config);

    assert!(matches!(result, Err(ConfigError(_))));
}

#[test]
fn start_enters_reset_with_outputs_cleared() {
    let mut rig = MockRig::new(dark());
    let (mission, sink) = started(SystemConfig::default(), &mut rig);

    assert_eq!(mission.state(), StateId::Reset);
    assert_eq!(rig.calls[0], RigCall::AllOff);
    assert_eq!(rig.tilt_commands(), vec![94]);
    assert_eq!(sink.events.last(), Some(&MissionEvent::Started(StateId::Reset)));
}

#[test]
fn scripted_top_fire_runs_one_full_cycle() {
    let mut rig = MockRig::with_scene(top_fire_scene());
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 10);

    assert!(report.completed);
    assert_eq!(report.fault, None);
    assert_eq!(
        report.visited.as_slice(),
        &[
            StateId::Reset,
            StateId::Searching,
            StateId::Aiming,
            StateId::Suppressing,
            StateId::Reset,
        ]
    );

    assert!(sink.events.contains(&MissionEvent::FireAcquired {
        zone: FireZone::Top,
        pan: 99,
    }));
    assert!(sink.events.contains(&MissionEvent::AimCentered { tilt: 99, steps: 5 }));
    assert!(sink.events.contains(&MissionEvent::Extinguished { polls: 3 }));
    assert!(sink.events.contains(&MissionEvent::CycleComplete(1)));

    assert_eq!(rig.pump_edges(), vec![true, false]);
    assert_eq!(mission.cycles(), 1);
    assert_eq!(mission.extinguished(), 1);
    assert_eq!(mission.fire(), FireState::default());
    // RESET re-centered the tilt servo.
    assert_eq!(rig.tilt_commands().last(), Some(&94));
    assert_eq!(mission.aim().pan, 99);
}

#[test]
fn aim_indicator_stays_lit_until_reset() {
    let mut rig = MockRig::with_scene(top_fire_scene());
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    mission.tick(&mut rig, &mut sink); // -> Searching
    assert!(rig.indicator_lit(Indicator::Searching));
    mission.tick(&mut rig, &mut sink); // -> Aiming
    assert!(!rig.indicator_lit(Indicator::Searching));
    assert!(rig.indicator_lit(Indicator::AimHigh));
    mission.tick(&mut rig, &mut sink); // -> Suppressing
    assert!(rig.indicator_lit(Indicator::AimHigh));
    mission.tick(&mut rig, &mut sink); // -> Reset
    assert!(Indicator::ALL.iter().all(|&i| !rig.indicator_lit(i)));
}

#[test]
fn mid_at_acquisition_skips_aiming() {
    let mut pumped = false;
    let mut rig = MockRig::with_scene(move |s| {
        pumped |= s.pump;
        if s.pan >= 96 && !pumped {
            lit(Channel::FlameMid)
        } else {
            SampleSet::default()
        }
    });
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 10);

    assert_eq!(
        report.visited.as_slice(),
        &[StateId::Reset, StateId::Searching, StateId::Suppressing, StateId::Reset]
    );
    assert!(rig.tilt_commands().iter().all(|&t| t == 94));
    assert_eq!(rig.pump_edges(), vec![true, false]);
}

#[test]
fn failed_correction_aborts_the_cycle_without_pumping() {
    let mut rig = MockRig::with_scene(|_| lit(Channel::FlameBottom));
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 10);

    assert_eq!(report.fault, Some(MissionFault::AimAbort));
    assert_eq!(
        report.visited.as_slice(),
        &[StateId::Reset, StateId::Searching, StateId::Aiming, StateId::Reset]
    );
    assert!(rig.pump_edges().is_empty());
    assert_eq!(mission.last_fault(), Some(MissionFault::AimAbort));
    assert!(sink.events.contains(&MissionEvent::CycleAborted(MissionFault::AimAbort)));
}

#[test]
fn bounded_search_gives_up_after_the_pass_limit() {
    let config = SystemConfig {
        search_pass_limit: 2,
        ..SystemConfig::default()
    };
    let mut rig = MockRig::new(dark());
    let (mut mission, mut sink) = started(config, &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 10);

    assert!(report.completed);
    assert_eq!(report.fault, Some(MissionFault::SweepExhausted));
    assert_eq!(mission.state(), StateId::Reset);
}

#[test]
fn searching_runs_one_pass_per_tick() {
    let config = SystemConfig {
        search_pass_limit: 3,
        ..SystemConfig::default()
    };
    let span = usize::from(config.servo.span());
    let mut rig = MockRig::new(dark());
    let (mut mission, mut sink) = started(config, &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 10);

    assert_eq!(report.fault, Some(MissionFault::SweepExhausted));
    // One tick leaves RESET, then one tick per pass.
    assert_eq!(mission.tick_count(), 4);
    // First pass from center, then two full up-and-back passes from min.
    assert_eq!(rig.sample_count(), span + 2 * 2 * span);
    assert_eq!(mission.aim().pan, 62);
}

#[test]
fn unbounded_search_keeps_sweeping() {
    let mut rig = MockRig::new(dark());
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 5);

    assert!(!report.completed);
    assert_eq!(mission.state(), StateId::Searching);
}

#[test]
fn sensor_fault_falls_back_to_reset_and_the_next_cycle_recovers() {
    let mut rig = MockRig::with_scene(top_fire_scene());
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    mission.tick(&mut rig, &mut sink); // -> Searching
    rig.fail_next_samples(2);
    let report = mission.run_cycle(&mut rig, &mut sink, 10);
    assert_eq!(
        report.fault,
        Some(MissionFault::Hardware(SensorError::ReadTimeout))
    );

    let report = mission.run_cycle(&mut rig, &mut sink, 10);
    assert!(report.completed);
    assert_eq!(report.fault, None);
    assert_eq!(mission.cycles(), 2);
    assert_eq!(mission.extinguished(), 1);
}

#[test]
fn line_follower_drives_to_the_junction_before_searching() {
    let mut pumped = false;
    let mut rig = MockRig::with_scene(move |s| {
        pumped |= s.pump;
        let mut set = SampleSet::default();
        if s.now_ms < 150 {
            set = set.with(Channel::LineCenter, 900);
        }
        if !pumped {
            set = set.with(Channel::FlameMid, 900);
        }
        set
    });
    let (mut mission, mut sink) = started(SystemConfig::line_follower(), &mut rig);

    let report = mission.run_cycle(&mut rig, &mut sink, 20);

    assert_eq!(
        report.visited.as_slice(),
        &[
            StateId::Reset,
            StateId::LineFollowing,
            StateId::Searching,
            StateId::Suppressing,
            StateId::Reset,
        ]
    );
    let drives = rig.drive_commands();
    assert_eq!(
        &drives[..6],
        &[
            DriveCommand::Stop,
            DriveCommand::Forward,
            DriveCommand::Forward,
            DriveCommand::Forward,
            DriveCommand::Stop,
            DriveCommand::Stop,
        ]
    );
}

#[test]
fn telemetry_is_emitted_on_its_interval() {
    let config = SystemConfig {
        telemetry_interval_ticks: 2,
        ..SystemConfig::default()
    };
    let mut rig = MockRig::new(dark());
    let (mut mission, mut sink) = started(config, &mut rig);

    for _ in 0..4 {
        mission.tick(&mut rig, &mut sink);
    }

    let telemetry = sink.count(|e| matches!(e, MissionEvent::Telemetry(_)));
    assert_eq!(telemetry, 2);
    let t = mission.build_telemetry();
    assert_eq!(t.state, StateId::Searching);
    assert!(!t.fire.detected);
}

#[test]
fn state_changes_are_reported_in_order() {
    let mut rig = MockRig::with_scene(top_fire_scene());
    let (mut mission, mut sink) = started(SystemConfig::default(), &mut rig);

    mission.run_cycle(&mut rig, &mut sink, 10);

    let changes: Vec<(StateId, StateId)> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            MissionEvent::StateChanged { from, to } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        changes,
        vec![
            (StateId::Reset, StateId::Searching),
            (StateId::Searching, StateId::Aiming),
            (StateId::Aiming, StateId::Suppressing),
            (StateId::Suppressing, StateId::Reset),
        ]
    );
}
