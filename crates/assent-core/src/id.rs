//! Strongly-typed step and participant identifiers.

use std::fmt;

/// Identifies one simulation tick in the authoritative step sequence.
///
/// Step ids are 32-bit and advance by one per applied tick. The engine
/// compares them for exact equality and increments with wrapping
/// arithmetic, so a session that runs past `u32::MAX` continues at 0.
/// Ordering across the wrap point uses [`is_after`](StepId::is_after)
/// (serial-number comparison), never the derived `Ord`, which is only
/// meant for sorting within a window far from the wrap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u32);

impl StepId {
    /// The step id that follows this one, wrapping at `u32::MAX`.
    #[inline]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    /// Number of steps from `earlier` to `self`, modulo 2^32.
    #[inline]
    pub fn distance_from(self, earlier: StepId) -> u32 {
        self.0.wrapping_sub(earlier.0)
    }

    /// Serial-number comparison: `true` if `self` comes strictly after
    /// `other` within half the id space (2^31 steps).
    ///
    /// Equal ids are not "after" each other. Ids exactly 2^31 apart are
    /// ambiguous and report `false` in both directions.
    #[inline]
    pub fn is_after(self, other: StepId) -> bool {
        let delta = self.distance_from(other);
        delta != 0 && delta < (1 << 31)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08X}", self.0)
    }
}

impl From<u32> for StepId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a participant within one tick.
///
/// Unique among the participants of a single tick. The combined-record
/// wire format stores it as a single octet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(pub u8);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for ParticipantId {
    fn from(v: u8) -> Self {
        Self(v)
    }
}
