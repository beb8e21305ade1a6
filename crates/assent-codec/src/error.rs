//! Error types for the combined-step codec.

use assent_core::ParticipantId;
use thiserror::Error;

use crate::types::StepType;

/// Errors from encoding or decoding a combined step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The encoded step does not fit in the destination buffer.
    #[error("combined step needs {required} octets but the buffer holds {capacity}")]
    BufferTooSmall {
        /// Octets the encoded step requires.
        required: usize,
        /// Octets available.
        capacity: usize,
    },
    /// More participants than the one-octet count can express.
    #[error("{count} participants exceed the wire limit of 255")]
    TooManyParticipants {
        /// The participant count supplied.
        count: usize,
    },
    /// A payload longer than the two-octet length prefix can express.
    #[error("participant {participant_id}: payload of {size} octets exceeds 65535")]
    PayloadTooLarge {
        /// The offending participant.
        participant_id: ParticipantId,
        /// The payload size supplied.
        size: usize,
    },
    /// Payload presence disagrees with the step type.
    #[error("participant {participant_id}: {step_type:?} step with {size}-octet payload")]
    PayloadMismatch {
        /// The offending participant.
        participant_id: ParticipantId,
        /// Its step type.
        step_type: StepType,
        /// Its payload size.
        size: usize,
    },
    /// The same participant appears twice in one step.
    #[error("participant {participant_id} appears more than once")]
    DuplicateParticipant {
        /// The repeated participant.
        participant_id: ParticipantId,
    },
    /// The record ended before a field was complete.
    #[error("truncated combined step: needed {needed} octets at offset {offset}, {available} left")]
    Truncated {
        /// Offset at which the read started.
        offset: usize,
        /// Octets the read required.
        needed: usize,
        /// Octets remaining in the record.
        available: usize,
    },
    /// A step type octet is not recognized.
    #[error("participant {participant_id}: unknown step type octet {octet}")]
    UnknownStepType {
        /// The participant whose entry held the octet.
        participant_id: ParticipantId,
        /// The unrecognized octet.
        octet: u8,
    },
    /// Bytes remain after the last participant entry.
    #[error("{count} trailing octets after the last participant")]
    TrailingOctets {
        /// Number of unread octets.
        count: usize,
    },
}
