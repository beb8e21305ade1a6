//! Error types for step logs.

use assent_core::StepId;
use thiserror::Error;

/// Errors from writing to a step log or handing a step across threads.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StepLogError {
    /// The step id does not come after the last id written.
    #[error("step {received} is not after last written step {last}")]
    OutOfOrder {
        /// The most recently written step id.
        last: StepId,
        /// The rejected step id.
        received: StepId,
    },
    /// The record is larger than the log accepts.
    #[error("step {step_id}: record of {size} octets exceeds maximum of {max}")]
    RecordTooLarge {
        /// The rejected step id.
        step_id: StepId,
        /// Size of the rejected record.
        size: usize,
        /// Configured maximum record size.
        max: usize,
    },
    /// Zero-length records are never valid combined steps.
    #[error("step {step_id}: empty record")]
    EmptyRecord {
        /// The rejected step id.
        step_id: StepId,
    },
    /// The log (or hand-off channel) already holds its maximum number of steps.
    #[error("step log full ({capacity} steps pending)")]
    Full {
        /// Maximum number of pending steps.
        capacity: usize,
    },
    /// The receiving side of a hand-off channel has been dropped.
    #[error("step channel disconnected")]
    Disconnected,
}
