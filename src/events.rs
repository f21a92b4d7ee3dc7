//! Hand-off from interrupt handlers to the main loop
//!
//! Interrupt handlers only record what happened: a timer tick, a finished conversion, a tilt
//! edge. The main loop collects everything recorded since its last pass with [`EventLatch::take`]
//! and does the actual work. A main loop that only runs on a tick uses
//! [`EventLatch::take_if`], so results that arrive between ticks wait for the next one. All
//! access goes through a critical section.

use bitflags::bitflags;
use core::cell::Cell;
use critical_section::Mutex;

bitflags! {
    /// Kinds of event raised by interrupt handlers
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Events: u8 {
        /// Sample timer fired
        const TICK = 1 << 0;
        /// An ADC conversion finished
        const SAMPLE = 1 << 1;
        /// The tilt switch changed
        const TILT = 1 << 2;
    }
}

/// Everything recorded since the last [`EventLatch::take`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pending {
    /// Which events were raised
    pub events: Events,
    /// Latest conversion result, valid when `events` contains `SAMPLE`
    pub sample: u16,
    /// Number of tilt edges, saturating
    pub tilt_edges: u8,
}

impl Pending {
    const NONE: Pending = Pending {
        events: Events::empty(),
        sample: 0,
        tilt_edges: 0,
    };

    /// The conversion result, if one finished
    pub fn sample(&self) -> Option<u16> {
        self.events.contains(Events::SAMPLE).then_some(self.sample)
    }
}

/// Interrupt-safe event store, meant to live in a `static`
pub struct EventLatch {
    pending: Mutex<Cell<Pending>>,
}

impl EventLatch {
    /// Create an empty latch
    pub const fn new() -> Self {
        EventLatch {
            pending: Mutex::new(Cell::new(Pending::NONE)),
        }
    }

    fn update(&self, f: impl FnOnce(&mut Pending)) {
        critical_section::with(|cs| {
            let cell = self.pending.borrow(cs);
            let mut pending = cell.get();
            f(&mut pending);
            cell.set(pending);
        });
    }

    /// Raise one or more events
    pub fn raise(&self, events: Events) {
        self.update(|p| p.events |= events);
    }

    /// Store a conversion result and raise `SAMPLE`. A result not yet taken is overwritten.
    pub fn record_sample(&self, sample: u16) {
        self.update(|p| {
            p.events |= Events::SAMPLE;
            p.sample = sample;
        });
    }

    /// Count a tilt edge and raise `TILT`
    pub fn record_tilt_edge(&self) {
        self.update(|p| {
            p.events |= Events::TILT;
            p.tilt_edges = p.tilt_edges.saturating_add(1);
        });
    }

    /// Take everything recorded so far, leaving the latch empty
    pub fn take(&self) -> Pending {
        critical_section::with(|cs| self.pending.borrow(cs).replace(Pending::NONE))
    }

    /// Take everything recorded so far, but only once `events` have all been raised. Until then
    /// the latch keeps accumulating and nothing is lost.
    pub fn take_if(&self, events: Events) -> Option<Pending> {
        critical_section::with(|cs| {
            let cell = self.pending.borrow(cs);
            cell.get()
                .events
                .contains(events)
                .then(|| cell.replace(Pending::NONE))
        })
    }
}

impl Default for EventLatch {
    fn default() -> Self {
        EventLatch::new()
    }
}
