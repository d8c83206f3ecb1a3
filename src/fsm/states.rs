//! Concrete state handler functions and table builder.
//!
//! Each state is defined by plain `fn` pointers — no closures, no dynamic
//! dispatch, no heap.  Updates hand the blocking work to the controllers in
//! [`crate::control`] and turn their outcomes into transitions.
//!
//! SEARCHING runs a single [`search::search`] pass per tick and counts empty
//! passes in `ctx.search_passes` instead of calling
//! [`search::search_until_found`].  Returning between passes lets the
//! service emit telemetry and the main loop feed the watchdog, and an
//! unlimited pass count never blocks inside one tick.
//!
//! ```text
//!  RESET ──[line variant]──▶ LINE_FOLLOWING ──[junction]──┐
//!    │                                                    ▼
//!    └───────────────────────────────────────────────▶ SEARCHING
//!    ▲                                      [BOTTOM/TOP]   │   [MID]
//!    │                                         ▼           │
//!    │◀────────────[aim abort]──────────── AIMING          │
//!    │                                         │[centered] │
//!    │                                         ▼           ▼
//!    └──────────────[flame lost]─────────── SUPPRESSING ◀──┘
//!
//!  Any state ──[hardware fault / limit reached]──▶ RESET
//! ```

use log::{info, warn};

use super::context::FsmContext;
use super::{StateDescriptor, StateId};
use crate::app::events::MissionEvent;
use crate::app::ports::{Indicator, RobotPort};
use crate::control::line_follow::{self, DriveCommand};
use crate::control::{aim, search, suppress};
use crate::error::{Error, MissionFault};
use crate::fsm::context::FireZone;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table<H: RobotPort>() -> [StateDescriptor<H>; StateId::COUNT] {
    [
        // Index 0 — Reset
        StateDescriptor {
            id: StateId::Reset,
            name: "Reset",
            on_enter: Some(reset_enter::<H>),
            on_exit: None,
            on_update: reset_update::<H>,
        },
        // Index 1 — LineFollowing
        StateDescriptor {
            id: StateId::LineFollowing,
            name: "LineFollowing",
            on_enter: Some(line_enter::<H>),
            on_exit: Some(line_exit::<H>),
            on_update: line_update::<H>,
        },
        // Index 2 — Searching
        StateDescriptor {
            id: StateId::Searching,
            name: "Searching",
            on_enter: Some(searching_enter::<H>),
            on_exit: Some(searching_exit::<H>),
            on_update: searching_update::<H>,
        },
        // Index 3 — Aiming
        StateDescriptor {
            id: StateId::Aiming,
            name: "Aiming",
            on_enter: Some(aiming_enter::<H>),
            on_exit: None,
            on_update: aiming_update::<H>,
        },
        // Index 4 — Suppressing
        StateDescriptor {
            id: StateId::Suppressing,
            name: "Suppressing",
            on_enter: None,
            on_exit: Some(suppressing_exit::<H>),
            on_update: suppressing_update::<H>,
        },
    ]
}

/// Close the current cycle and head back to RESET.
fn end_cycle(ctx: &mut FsmContext) -> Option<StateId> {
    ctx.cycles += 1;
    ctx.raise(MissionEvent::CycleComplete(ctx.cycles));
    Some(StateId::Reset)
}

/// Record a controller error against the cycle and head back to RESET.
fn fail_cycle(ctx: &mut FsmContext, err: Error) -> Option<StateId> {
    let fault = err.as_mission_fault();
    warn!("cycle {} aborted: {}", ctx.cycles + 1, fault);
    ctx.abort_cycle(fault);
    end_cycle(ctx)
}

// ═══════════════════════════════════════════════════════════════════════════
//  RESET state
// ═══════════════════════════════════════════════════════════════════════════

fn reset_enter<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) {
    hw.all_off();
    hw.drive(DriveCommand::Stop);

    let center = ctx.config.servo.center;
    hw.set_tilt(center);
    ctx.aim.tilt = center;

    ctx.fire = Default::default();
    ctx.search_passes = 0;
    ctx.line_polls = 0;
    info!("RESET: outputs cleared, tilt centered at {}", center);
}

fn reset_update<H: RobotPort>(ctx: &mut FsmContext, _hw: &mut H) -> Option<StateId> {
    if ctx.config.line_following_enabled {
        Some(StateId::LineFollowing)
    } else {
        Some(StateId::Searching)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  LINE_FOLLOWING state — drive to the next junction
// ═══════════════════════════════════════════════════════════════════════════

fn line_enter<H: RobotPort>(_ctx: &mut FsmContext, _hw: &mut H) {
    info!("LINE: following track to the next junction");
}

fn line_exit<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) {
    hw.drive(DriveCommand::Stop);
    info!("LINE: stopped after {} polls", ctx.line_polls);
}

fn line_update<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) -> Option<StateId> {
    match line_follow::follow_step(hw, &ctx.config) {
        Ok(DriveCommand::Stop) => {
            ctx.line_polls += 1;
            Some(StateId::Searching)
        }
        Ok(_) => {
            ctx.line_polls += 1;
            None
        }
        Err(e) => fail_cycle(ctx, e),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SEARCHING state — one bidirectional pan pass per tick
// ═══════════════════════════════════════════════════════════════════════════

fn searching_enter<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) {
    hw.set_indicator(Indicator::Searching, true);
    info!("SEARCHING: scanning from pan={}", ctx.aim.pan);
}

fn searching_exit<H: RobotPort>(_ctx: &mut FsmContext, hw: &mut H) {
    hw.set_indicator(Indicator::Searching, false);
}

fn searching_update<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) -> Option<StateId> {
    let outcome = match search::search(hw, &ctx.config, ctx.aim.pan) {
        Ok(outcome) => outcome,
        Err(e) => return fail_cycle(ctx, e),
    };

    ctx.aim.pan = outcome.angle;
    ctx.fire.record(outcome.zone);

    match outcome.zone {
        Some(zone) => {
            ctx.raise(MissionEvent::FireAcquired {
                zone,
                pan: outcome.angle,
            });
            if zone == FireZone::Mid {
                // MID lit at acquisition: already centered.
                ctx.fire.on_aim = true;
                Some(StateId::Suppressing)
            } else {
                Some(StateId::Aiming)
            }
        }
        None => {
            ctx.search_passes += 1;
            let limit = ctx.config.search_pass_limit;
            if limit != 0 && ctx.search_passes >= limit {
                warn!("SEARCHING: {} empty passes, giving up", ctx.search_passes);
                fail_cycle(ctx, MissionFault::SweepExhausted.into())
            } else {
                None
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  AIMING state — tilt until the flame sits on the MID sensor
// ═══════════════════════════════════════════════════════════════════════════

fn aiming_enter<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) {
    let indicator = match ctx.fire.zone {
        FireZone::Bottom => Indicator::AimLow,
        FireZone::Top | FireZone::Mid => Indicator::AimHigh,
    };
    hw.set_indicator(indicator, true);
    info!("AIMING: fire in {:?} zone", ctx.fire.zone);
}

fn aiming_update<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) -> Option<StateId> {
    let outcome = match aim::correct(hw, &ctx.config, ctx.fire.zone, &mut ctx.aim) {
        Ok(outcome) => outcome,
        Err(e) => return fail_cycle(ctx, e),
    };

    ctx.fire.zone = outcome.zone;
    ctx.fire.on_aim = outcome.on_aim;

    if outcome.on_aim {
        ctx.raise(MissionEvent::AimCentered {
            tilt: ctx.aim.tilt,
            steps: outcome.steps,
        });
        Some(StateId::Suppressing)
    } else {
        fail_cycle(ctx, MissionFault::AimAbort.into())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  SUPPRESSING state — pump while the flame stays centered
// ═══════════════════════════════════════════════════════════════════════════

fn suppressing_exit<H: RobotPort>(ctx: &mut FsmContext, _hw: &mut H) {
    ctx.fire.detected = false;
}

fn suppressing_update<H: RobotPort>(ctx: &mut FsmContext, hw: &mut H) -> Option<StateId> {
    match suppress::suppress_while_on_aim(hw, &ctx.config, &mut ctx.fire) {
        Ok(outcome) if outcome.extinguished => {
            ctx.extinguished += 1;
            ctx.raise(MissionEvent::Extinguished {
                polls: outcome.polls,
            });
            end_cycle(ctx)
        }
        Ok(_) => fail_cycle(ctx, MissionFault::SuppressionTimeout.into()),
        Err(e) => fail_cycle(ctx, e),
    }
}
