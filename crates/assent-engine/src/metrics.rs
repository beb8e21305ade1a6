//! Replay counters and per-update outcomes.
//!
//! [`AssentMetrics`] accumulates over the lifetime of an engine;
//! [`UpdateOutcome`] describes a single successful
//! [`update()`](crate::Assent::update) call.

use assent_core::StepId;

/// Cumulative counters maintained by the engine.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssentMetrics {
    /// Successful `update()` calls.
    pub updates: u64,
    /// Ticks applied to the simulation.
    pub ticks_applied: u64,
    /// Records accepted into the step log.
    pub steps_ingested: u64,
    /// Octets of all accepted records.
    pub octets_ingested: u64,
    /// Updates that stopped on a desync.
    pub desync_events: u64,
    /// Updates that stopped on a participant-count overflow.
    pub overflow_events: u64,
    /// Updates that stopped on a record that does not decode.
    pub malformed_events: u64,
    /// Ingestion calls rejected by the codec or the step log.
    pub encoding_rejections: u64,
}

/// Result of a successful [`update()`](crate::Assent::update) call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateOutcome {
    /// Ticks applied during this call.
    pub applied: usize,
    /// The replay cursor after this call.
    pub next_step_id: StepId,
    /// Records still pending in the step log.
    pub remaining: usize,
}

impl UpdateOutcome {
    /// Whether the step log was fully drained.
    pub fn is_caught_up(&self) -> bool {
        self.remaining == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = AssentMetrics::default();
        assert_eq!(m.updates, 0);
        assert_eq!(m.ticks_applied, 0);
        assert_eq!(m.steps_ingested, 0);
        assert_eq!(m.octets_ingested, 0);
        assert_eq!(m.desync_events, 0);
        assert_eq!(m.overflow_events, 0);
        assert_eq!(m.malformed_events, 0);
        assert_eq!(m.encoding_rejections, 0);
    }

    #[test]
    fn caught_up_means_nothing_remaining() {
        let done = UpdateOutcome {
            applied: 3,
            next_step_id: StepId(4),
            remaining: 0,
        };
        assert!(done.is_caught_up());
        let behind = UpdateOutcome {
            remaining: 2,
            ..done
        };
        assert!(!behind.is_caught_up());
    }
}
