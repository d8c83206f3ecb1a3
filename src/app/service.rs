//! Mission service — the hexagonal core.
//!
//! [`MissionService`] owns the FSM and its shared context.  It exposes a
//! hardware-agnostic API; the robot is lent to every call through the
//! [`RobotPort`] bundle and events leave through an [`EventSink`], so the
//! whole mission loop runs against mock adapters in host tests.
//!
//! ```text
//!  SensorPort ──▶ ┌────────────────────────┐ ──▶ EventSink
//!     AimPort ◀── │     MissionService     │
//! ActuatorPort ◀──│  FSM · controllers     │
//!   DrivePort ◀── └────────────────────────┘
//! ```

use heapless::Vec;
use log::{info, warn};

use crate::config::SystemConfig;
use crate::error::{ConfigError, MissionFault};
use crate::fsm::context::{AimPosition, FireState, FsmContext};
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, StateId};

use super::events::{MissionEvent, MissionTelemetry};
use super::ports::{EventSink, RobotPort};

/// Most states a single cycle can pass through:
/// Reset, LineFollowing, Searching, Aiming, Suppressing, Reset.
pub const CYCLE_TRACE_CAP: usize = 8;

/// What one [`MissionService::run_cycle`] call observed.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// States entered during the cycle, in order, starting with the state
    /// the cycle began in.
    pub visited: Vec<StateId, CYCLE_TRACE_CAP>,
    /// Fault recorded by this cycle, if it aborted.
    pub fault: Option<MissionFault>,
    /// `false` when the tick budget ran out before the FSM returned to RESET.
    pub completed: bool,
}

// ───────────────────────────────────────────────────────────────
// MissionService
// ───────────────────────────────────────────────────────────────

/// Orchestrates the mission sequencer over any [`RobotPort`].
pub struct MissionService<H: RobotPort> {
    fsm: Fsm<H>,
    ctx: FsmContext,
    tick_count: u64,
}

impl<H: RobotPort> MissionService<H> {
    /// Construct the service from configuration.
    ///
    /// The configuration is validated first.  Does **not** start the FSM —
    /// call [`start`](Self::start) next.
    pub fn new(config: SystemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let ctx = FsmContext::new(config);
        let fsm = Fsm::new(build_state_table::<H>(), StateId::Reset);
        Ok(Self {
            fsm,
            ctx,
            tick_count: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter RESET: outputs off, tilt centered.
    pub fn start(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        self.fsm.start(&mut self.ctx, hw);
        self.drain_events(sink);
        sink.emit(&MissionEvent::Started(self.fsm.current_state()));
        info!("MissionService started in {:?}", self.fsm.current_state());
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one FSM tick.  Controllers block inside it for as long as their
    /// sweep or poll loop takes.
    pub fn tick(&mut self, hw: &mut H, sink: &mut impl EventSink) {
        self.tick_count += 1;
        let prev_state = self.fsm.current_state();

        self.fsm.tick(&mut self.ctx, hw);
        self.drain_events(sink);

        let new_state = self.fsm.current_state();
        if new_state != prev_state {
            sink.emit(&MissionEvent::StateChanged {
                from: prev_state,
                to: new_state,
            });
        }

        let interval = u64::from(self.ctx.config.telemetry_interval_ticks);
        if interval != 0 && self.tick_count % interval == 0 {
            sink.emit(&MissionEvent::Telemetry(self.build_telemetry()));
        }
    }

    /// Tick until the FSM leaves its current state and comes back to RESET,
    /// or until `max_ticks` ticks have run.
    pub fn run_cycle(&mut self, hw: &mut H, sink: &mut impl EventSink, max_ticks: u32) -> CycleReport {
        let start_cycles = self.ctx.cycles;
        let start_aborted = self.ctx.aborted;
        let mut report = CycleReport {
            visited: Vec::new(),
            fault: None,
            completed: false,
        };
        let _ = report.visited.push(self.fsm.current_state());

        for _ in 0..max_ticks {
            let prev = self.fsm.current_state();
            self.tick(hw, sink);
            let now = self.fsm.current_state();
            if now != prev && report.visited.push(now).is_err() {
                warn!("cycle trace full, {:?} not recorded", now);
            }
            if self.ctx.cycles > start_cycles {
                report.completed = true;
                if self.ctx.aborted > start_aborted {
                    report.fault = self.ctx.last_fault;
                }
                break;
            }
        }
        report
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current context.
    pub fn build_telemetry(&self) -> MissionTelemetry {
        MissionTelemetry {
            state: self.fsm.current_state(),
            fire: self.ctx.fire,
            aim: self.ctx.aim,
            cycles: self.ctx.cycles,
            extinguished: self.ctx.extinguished,
            last_fault: self.ctx.last_fault,
        }
    }

    /// Current FSM state.
    pub fn state(&self) -> StateId {
        self.fsm.current_state()
    }

    pub fn fire(&self) -> FireState {
        self.ctx.fire
    }

    pub fn aim(&self) -> AimPosition {
        self.ctx.aim
    }

    /// Completed mission cycles since startup.
    pub fn cycles(&self) -> u64 {
        self.ctx.cycles
    }

    /// Cycles that ended with the fire out.
    pub fn extinguished(&self) -> u64 {
        self.ctx.extinguished
    }

    /// Fault that ended the most recent aborted cycle.
    pub fn last_fault(&self) -> Option<MissionFault> {
        self.ctx.last_fault
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn config(&self) -> &SystemConfig {
        &self.ctx.config
    }

    // ── Internal ──────────────────────────────────────────────

    fn drain_events(&mut self, sink: &mut impl EventSink) {
        for event in self.ctx.events.iter() {
            sink.emit(event);
        }
        self.ctx.events.clear();
    }
}
