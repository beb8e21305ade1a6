//! The step log abstraction the engine reads from.

use assent_core::StepId;

use crate::error::StepLogError;

/// Append-only, key-ordered store of combined-step records.
///
/// Reads are strictly sequential. [`peek`](StepLog::peek) exposes the
/// head without consuming it so a reader can validate a record and leave
/// it in place if validation fails; [`pop`](StepLog::pop) commits the
/// read. The log owns the record bytes for as long as they are stored.
pub trait StepLog {
    /// Append `record` under `step_id`.
    ///
    /// Implementations may reject ids that do not come after the last
    /// written id, oversized records, or writes to a full log.
    fn write(&mut self, step_id: StepId, record: &[u8]) -> Result<(), StepLogError>;

    /// The oldest stored record and its id, without consuming it.
    fn peek(&self) -> Option<(StepId, &[u8])>;

    /// Consume the oldest stored record, returning its id.
    fn pop(&mut self) -> Option<StepId>;

    /// Number of stored records not yet consumed.
    fn remaining(&self) -> usize;

    /// Drop every stored record whose id comes before `step_id`.
    ///
    /// Used when the reader's cursor is moved by a state import. Returns
    /// the number of records dropped.
    fn discard_before(&mut self, step_id: StepId) -> usize;

    /// Whether no records are waiting.
    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}
