//! Id generators for record stores.
//!
//! # Invariants
//! - `next_id(floor)` is strictly greater than `floor` and than every id the
//!   same generator returned before.

use crate::clock::Clock;
use std::rc::Rc;

/// Source of new record ids.
///
/// `floor` is the largest id currently present in the target collection.
pub trait IdGenerator {
    fn next_id(&mut self, floor: i64) -> i64;
}

/// Deterministic counter: `floor + 1`, never repeating.
#[derive(Debug, Clone, Default)]
pub struct SequentialIds {
    last: i64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, floor: i64) -> i64 {
        self.last = self.last.max(floor) + 1;
        self.last
    }
}

/// Millisecond timestamps from a clock, bumped when two calls share a tick.
pub struct TimestampIds {
    clock: Rc<dyn Clock>,
    last: i64,
}

impl TimestampIds {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self { clock, last: 0 }
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self, floor: i64) -> i64 {
        let candidate = self.clock.now_millis();
        self.last = candidate.max(self.last.max(floor) + 1);
        self.last
    }
}
