//! Shared mutable context threaded through every FSM handler.
//!
//! `FsmContext` is the single struct that state handlers read from and
//! write to.  It holds the fire state and aim position of the running
//! mission cycle, configuration, counters, and the queue of events waiting
//! to be drained by the service.  Nothing in here is
//! global; the service owns the only instance.

use heapless::Vec;

use crate::app::events::MissionEvent;
use crate::config::SystemConfig;
use crate::error::MissionFault;

/// Number of analog channels in the sensor array.
pub const CHANNEL_COUNT: usize = 6;

/// Capacity of the per-tick event queue.
pub const EVENT_QUEUE_CAP: usize = 8;

// ---------------------------------------------------------------------------
// Sensor snapshot
// ---------------------------------------------------------------------------

/// Named slots of the sensor array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Channel {
    LineLeft = 0,
    LineCenter = 1,
    LineRight = 2,
    FlameMid = 3,
    FlameBottom = 4,
    FlameTop = 5,
}

impl Channel {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// One atomic read of every channel, in index order.
///
/// A control decision compares values from a single `SampleSet` only;
/// fresh readings mean a fresh snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleSet {
    raw: [u16; CHANNEL_COUNT],
}

impl SampleSet {
    pub const fn new(raw: [u16; CHANNEL_COUNT]) -> Self {
        Self { raw }
    }

    /// Reading of a named channel.
    pub fn get(&self, channel: Channel) -> u16 {
        self.raw[channel.index()]
    }

    /// Builder used by simulations: replace one channel's reading.
    #[must_use]
    pub fn with(mut self, channel: Channel, value: u16) -> Self {
        self.raw[channel.index()] = value;
        self
    }

    pub fn raw(&self) -> &[u16; CHANNEL_COUNT] {
        &self.raw
    }
}

// ---------------------------------------------------------------------------
// Fire state
// ---------------------------------------------------------------------------

/// Which of the three stacked flame sensors sees the fire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FireZone {
    #[default]
    Mid,
    Bottom,
    Top,
}

impl FireZone {
    /// The flame channel that reports this zone.
    pub const fn channel(self) -> Channel {
        match self {
            Self::Mid => Channel::FlameMid,
            Self::Bottom => Channel::FlameBottom,
            Self::Top => Channel::FlameTop,
        }
    }
}

/// Detection state of the current mission cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FireState {
    /// Latched on the first classification that reports a zone.
    pub detected: bool,
    pub zone: FireZone,
    /// MID is above threshold: the pump may run.
    pub on_aim: bool,
}

impl FireState {
    /// Fold a classifier result into the state.  `None` leaves it untouched.
    pub fn record(&mut self, zone: Option<FireZone>) {
        if let Some(zone) = zone {
            self.detected = true;
            self.zone = zone;
        }
    }
}

// ---------------------------------------------------------------------------
// Aim position
// ---------------------------------------------------------------------------

/// Commanded servo positions, in servo ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AimPosition {
    pub pan: u16,
    pub tilt: u16,
}

impl AimPosition {
    pub fn centered(config: &SystemConfig) -> Self {
        Self {
            pan: config.servo.center,
            tilt: config.servo.center,
        }
    }
}

// ---------------------------------------------------------------------------
// FsmContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct FsmContext {
    // -- Timing --
    /// Ticks elapsed since the current state was entered.
    pub ticks_in_state: u64,
    /// Monotonic total tick count.
    pub total_ticks: u64,

    // -- Mission data --
    pub fire: FireState,
    pub aim: AimPosition,

    // -- Counters --
    /// Empty search passes in the current cycle.
    pub search_passes: u32,
    /// Line-following polls in the current cycle.
    pub line_polls: u32,
    /// Completed mission cycles (every return to RESET).
    pub cycles: u64,
    /// Cycles that put a fire out.
    pub extinguished: u64,
    /// Cycles that ended on a fault.
    pub aborted: u64,
    /// Fault that ended the most recent aborted cycle.
    pub last_fault: Option<MissionFault>,

    // -- Configuration --
    pub config: SystemConfig,

    // -- Outbound --
    /// Events raised by handlers, drained by the service after each tick.
    pub events: Vec<MissionEvent, EVENT_QUEUE_CAP>,
}

impl FsmContext {
    /// Create a new context with the given configuration.
    pub fn new(config: SystemConfig) -> Self {
        Self {
            ticks_in_state: 0,
            total_ticks: 0,
            fire: FireState::default(),
            aim: AimPosition::centered(&config),
            search_passes: 0,
            line_polls: 0,
            cycles: 0,
            extinguished: 0,
            aborted: 0,
            last_fault: None,
            config,
            events: Vec::new(),
        }
    }

    /// Queue an event for the sink.  Overflow drops the event with a warning.
    pub fn raise(&mut self, event: MissionEvent) {
        if let Err(dropped) = self.events.push(event) {
            log::warn!("event queue full, dropping {:?}", dropped);
        }
    }

    /// Record a fault against the current cycle and raise it.
    pub fn abort_cycle(&mut self, fault: MissionFault) {
        self.last_fault = Some(fault);
        self.aborted += 1;
        self.raise(MissionEvent::CycleAborted(fault));
    }
}
