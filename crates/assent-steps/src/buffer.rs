//! Bounded in-memory step log.

use std::collections::VecDeque;

use assent_core::StepId;
use tracing::trace;

use crate::error::StepLogError;
use crate::log::StepLog;

/// One stored record.
struct StoredStep {
    step_id: StepId,
    record: Box<[u8]>,
}

/// Bounded in-memory [`StepLog`].
///
/// Holds at most `capacity` records of at most `max_record_octets`
/// each. Written ids must be strictly increasing in serial-number order
/// ([`StepId::is_after`]), so gaps are allowed but rewinds and
/// duplicates are not. Whether a gap is acceptable is decided by the
/// reader, not the log.
///
/// # Examples
///
/// ```
/// use assent_core::StepId;
/// use assent_steps::{StepBuffer, StepLog};
///
/// let mut log = StepBuffer::new(8, 64);
/// log.write(StepId(100), &[0]).unwrap();
/// log.write(StepId(101), &[0]).unwrap();
///
/// assert_eq!(log.peek().map(|(id, _)| id), Some(StepId(100)));
/// assert_eq!(log.pop(), Some(StepId(100)));
/// assert_eq!(log.remaining(), 1);
/// ```
pub struct StepBuffer {
    steps: VecDeque<StoredStep>,
    capacity: usize,
    max_record_octets: usize,
    last_written: Option<StepId>,
    stored_octets: usize,
}

impl StepBuffer {
    /// Create an empty log.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` or `max_record_octets` is zero.
    pub fn new(capacity: usize, max_record_octets: usize) -> Self {
        assert!(capacity > 0, "StepBuffer capacity must be at least 1");
        assert!(
            max_record_octets > 0,
            "StepBuffer max_record_octets must be at least 1"
        );
        Self {
            steps: VecDeque::with_capacity(capacity),
            capacity,
            max_record_octets,
            last_written: None,
            stored_octets: 0,
        }
    }

    /// Maximum number of records this log can hold.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest record this log accepts.
    pub fn max_record_octets(&self) -> usize {
        self.max_record_octets
    }

    /// The most recently written id, if any.
    pub fn last_written(&self) -> Option<StepId> {
        self.last_written
    }

    /// Total octets of all stored records.
    pub fn stored_octets(&self) -> usize {
        self.stored_octets
    }

    /// Ids of all stored records, oldest first.
    pub fn step_ids(&self) -> impl Iterator<Item = StepId> + '_ {
        self.steps.iter().map(|s| s.step_id)
    }

    /// Drop every stored record and forget the last written id.
    pub fn clear(&mut self) {
        self.steps.clear();
        self.stored_octets = 0;
        self.last_written = None;
    }
}

impl StepLog for StepBuffer {
    fn write(&mut self, step_id: StepId, record: &[u8]) -> Result<(), StepLogError> {
        if record.is_empty() {
            return Err(StepLogError::EmptyRecord { step_id });
        }
        if record.len() > self.max_record_octets {
            return Err(StepLogError::RecordTooLarge {
                step_id,
                size: record.len(),
                max: self.max_record_octets,
            });
        }
        if let Some(last) = self.last_written {
            if !step_id.is_after(last) {
                return Err(StepLogError::OutOfOrder {
                    last,
                    received: step_id,
                });
            }
        }
        if self.steps.len() >= self.capacity {
            return Err(StepLogError::Full {
                capacity: self.capacity,
            });
        }

        self.steps.push_back(StoredStep {
            step_id,
            record: record.into(),
        });
        self.stored_octets += record.len();
        self.last_written = Some(step_id);
        trace!(%step_id, octets = record.len(), pending = self.steps.len(), "step stored");
        Ok(())
    }

    fn peek(&self) -> Option<(StepId, &[u8])> {
        self.steps.front().map(|s| (s.step_id, &*s.record))
    }

    fn pop(&mut self) -> Option<StepId> {
        let step = self.steps.pop_front()?;
        self.stored_octets -= step.record.len();
        Some(step.step_id)
    }

    fn remaining(&self) -> usize {
        self.steps.len()
    }

    /// Drops stale records. If that empties the log, the last written id
    /// is forgotten too, so writing can resume at any id after a state
    /// import that moved the cursor backwards.
    fn discard_before(&mut self, step_id: StepId) -> usize {
        let mut dropped = 0;
        while let Some(front) = self.steps.front() {
            if !step_id.is_after(front.step_id) {
                break;
            }
            self.pop();
            dropped += 1;
        }
        if self.steps.is_empty() {
            self.last_written = None;
        }
        dropped
    }
}

impl std::fmt::Debug for StepBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepBuffer")
            .field("pending", &self.steps.len())
            .field("capacity", &self.capacity)
            .field("max_record_octets", &self.max_record_octets)
            .field("last_written", &self.last_written)
            .field("stored_octets", &self.stored_octets)
            .finish()
    }
}
