//! Errors reported by the engine's entry points.

use assent_codec::CodecError;
use assent_core::StepId;
use assent_steps::StepLogError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors from [`Assent`](crate::Assent) operations.
///
/// Every error is reported synchronously to the caller of the entry
/// point that detected it; the engine never retries. Errors from
/// [`update`](crate::Assent::update) leave the replay cursor exactly
/// where the last successfully applied tick put it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AssentError {
    /// The step log delivered a step other than the one the cursor
    /// expects. Replay has lost synchrony with the log.
    #[error("desync: expected step {expected}, log delivered {received}")]
    Desync {
        /// The replay cursor.
        expected: StepId,
        /// The id at the head of the log.
        received: StepId,
    },
    /// A step decodes to more participants than the engine accepts.
    #[error("step {step_id}: {participant_count} participants exceed the maximum of {max_participants}")]
    Overflow {
        /// The offending step.
        step_id: StepId,
        /// Participants in the step.
        participant_count: usize,
        /// Configured maximum.
        max_participants: usize,
    },
    /// A step offered for ingestion could not be encoded, or exceeds the
    /// scratch buffer. Only that ingestion call is rejected.
    #[error("encoding failed: {0}")]
    Encoding(#[from] CodecError),
    /// The step at the head of the log does not fit the scratch buffer
    /// or does not decode.
    #[error("step {step_id}: malformed combined step")]
    MalformedRecord {
        /// The offending step.
        step_id: StepId,
        /// Why decoding failed.
        #[source]
        source: CodecError,
    },
    /// Invalid configuration, or state required but not yet set.
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
    /// The step log rejected a write.
    #[error("step log: {0}")]
    Log(#[from] StepLogError),
}

impl AssentError {
    /// Whether this error means the session cannot continue replaying.
    ///
    /// Desync, overflow and malformed records stay at the head of the
    /// log, so every later `update` would fail the same way.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Desync { .. } | Self::Overflow { .. } | Self::MalformedRecord { .. }
        )
    }
}
