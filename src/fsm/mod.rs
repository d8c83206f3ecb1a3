//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern ported to Rust:
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │  StateTable                                                   │
//! │  ┌───────────────┬──────────────┬──────────────┬─────────────┐│
//! │  │ StateId       │ on_enter     │ on_exit      │ on_update   ││
//! │  ├───────────────┼──────────────┼──────────────┼─────────────┤│
//! │  │ Reset         │ fn(ctx, hw)  │ —            │ fn -> Option││
//! │  │ LineFollowing │ fn(ctx, hw)  │ fn(ctx, hw)  │ fn -> Option││
//! │  │ Searching     │ fn(ctx, hw)  │ fn(ctx, hw)  │ fn -> Option││
//! │  │ Aiming        │ fn(ctx, hw)  │ —            │ fn -> Option││
//! │  │ Suppressing   │ —            │ fn(ctx, hw)  │ fn -> Option││
//! │  └───────────────┴──────────────┴──────────────┴─────────────┘│
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each tick the engine calls `on_update` for the **current** state.
//! If it returns `Some(next_id)`, the engine runs `on_exit` for the
//! current state, then `on_enter` for the next, and updates the
//! current pointer.  Handlers receive `&mut FsmContext` (fire state, aim,
//! config, counters) and `&mut H`, the robot hardware behind its ports.
//! The hardware is lent per call, never stored.

pub mod context;
pub mod states;

use context::FsmContext;
use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Enumeration of all mission states.
/// Must stay in sync with the state table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StateId {
    Reset = 0,
    LineFollowing = 1,
    Searching = 2,
    Aiming = 3,
    Suppressing = 4,
}

impl StateId {
    /// Total number of states — used to size the table array.
    pub const COUNT: usize = 5;

    /// Convert a `u8` index back to `StateId`.  Panics on out-of-range in
    /// debug builds; returns `Reset` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Reset,
            1 => Self::LineFollowing,
            2 => Self::Searching,
            3 => Self::Aiming,
            4 => Self::Suppressing,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Reset
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` and `on_exit` actions.
/// These run exactly once on each state transition.
pub type StateActionFn<H> = fn(&mut FsmContext, &mut H);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to trigger a transition, or `None` to stay.
pub type StateUpdateFn<H> = fn(&mut FsmContext, &mut H) -> Option<StateId>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// Static descriptor for a single FSM state.
/// Stored in a fixed-size array — no heap, no `dyn`.
pub struct StateDescriptor<H> {
    pub id: StateId,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn<H>>,
    pub on_exit: Option<StateActionFn<H>>,
    pub on_update: StateUpdateFn<H>,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
///
/// Owns the state table (array of [`StateDescriptor`]); the [`FsmContext`]
/// and hardware are threaded through every handler call by the owner.
pub struct Fsm<H> {
    /// Fixed-size table indexed by `StateId as usize`.
    table: [StateDescriptor<H>; StateId::COUNT],
    /// Index of the currently active state.
    current: usize,
    /// Monotonically increasing tick counter.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl<H> Fsm<H> {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor<H>; StateId::COUNT], initial: StateId) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Run the initial `on_enter` for the starting state.
    /// Call once after construction, before the first `tick()`.
    pub fn start(&mut self, ctx: &mut FsmContext, hw: &mut H) {
        info!("FSM starting in state: {}", self.table[self.current].name);
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, hw);
        }
    }

    /// Advance the FSM by one tick.
    ///
    /// 1. Call `on_update` for the current state.
    /// 2. If it returns `Some(next)`, execute the transition:
    ///    `on_exit(current)` → update pointer → `on_enter(next)`.
    pub fn tick(&mut self, ctx: &mut FsmContext, hw: &mut H) {
        self.tick_count += 1;
        ctx.ticks_in_state = self.tick_count - self.state_entry_tick;
        ctx.total_ticks = self.tick_count;

        let next = (self.table[self.current].on_update)(ctx, hw);

        if let Some(next_id) = next {
            self.transition(next_id, ctx, hw);
        }
    }

    /// Force an immediate transition, running exit and enter actions.
    pub fn force_transition(&mut self, next: StateId, ctx: &mut FsmContext, hw: &mut H) {
        if next as usize != self.current {
            self.transition(next, ctx, hw);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> StateId {
        StateId::from_index(self.current)
    }

    /// How many ticks the FSM has been in the current state.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count - self.state_entry_tick
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next_id: StateId, ctx: &mut FsmContext, hw: &mut H) {
        let next_idx = next_id as usize;

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        // Exit current state
        if let Some(exit) = self.table[self.current].on_exit {
            exit(ctx, hw);
        }

        // Update pointer and timing
        self.current = next_idx;
        self.state_entry_tick = self.tick_count;
        ctx.ticks_in_state = 0;

        // Enter new state
        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx, hw);
        }
    }
}
