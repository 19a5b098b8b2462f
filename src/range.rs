use crate::{Instant, prelude::*};

/// An open interval between two instants: both endpoints are excluded.
///
/// No ordering is enforced between `start` and `end`; a reversed interval
/// simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "({start}, {end})")]
pub struct OpenRange {
    start: Instant,
    end:   Instant,
}

impl OpenRange {
    pub const fn new(start: Instant, end: Instant) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> Instant {
        self.start
    }

    pub const fn end(&self) -> Instant {
        self.end
    }

    /// True iff `start < instant < end`
    pub fn contains(&self, instant: Instant) -> bool {
        self.start < instant && instant < self.end
    }
}
