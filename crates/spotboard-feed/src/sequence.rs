//! Tick sequencer: orders poll completions that may resolve out of order.

use std::fmt;

/// Monotonic number of one poll tick. The first tick is 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick(u64);

impl Tick {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues tick numbers and remembers the newest one whose result was applied.
///
/// A completion is current only if its tick is newer than the last applied
/// tick; anything older would overwrite a more recent render with stale data.
#[derive(Debug, Clone, Default)]
pub struct TickSequencer {
    issued: u64,
    last_applied: Option<Tick>,
}

impl TickSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number the next tick.
    pub fn begin(&mut self) -> Tick {
        self.issued += 1;
        Tick(self.issued)
    }

    pub fn is_current(&self, tick: Tick) -> bool {
        self.last_applied.is_none_or(|last| tick > last)
    }

    /// Record that `tick`'s result is now on display. Returns `false` (and
    /// changes nothing) if a newer tick was already applied.
    pub fn mark_applied(&mut self, tick: Tick) -> bool {
        if !self.is_current(tick) {
            return false;
        }
        self.last_applied = Some(tick);
        true
    }

    pub fn last_applied(&self) -> Option<Tick> {
        self.last_applied
    }

    /// How many ticks have been numbered so far.
    pub fn issued(&self) -> u64 {
        self.issued
    }
}
