//! Engine configuration, validation, and configuration errors.
//!
//! [`AssentConfig`] is fixed at construction. [`validate()`](AssentConfig::validate)
//! checks every limit against what the combined-step wire format can
//! express before any buffer is sized from it.

use assent_codec::{combined_capacity, MAX_PARTICIPANTS, MAX_PAYLOAD_OCTETS};
use assent_core::StepId;
use thiserror::Error;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors from configuration validation or from using an engine whose
/// configuration is incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `max_participants` is zero.
    #[error("max_participants must be at least 1")]
    NoParticipants,
    /// `max_participants` exceeds what the wire format can express.
    #[error("max_participants {configured} exceeds the wire limit of {limit}")]
    TooManyParticipants {
        /// The configured value.
        configured: usize,
        /// The wire-format limit.
        limit: usize,
    },
    /// `max_steps_per_update` is zero.
    #[error("max_steps_per_update must be at least 1")]
    ZeroStepsPerUpdate,
    /// `max_payload_octets` is zero.
    #[error("max_payload_octets must be at least 1")]
    ZeroPayload,
    /// `max_payload_octets` exceeds what the wire format can express.
    #[error("max_payload_octets {configured} exceeds the wire limit of {limit}")]
    PayloadTooLarge {
        /// The configured value.
        configured: usize,
        /// The wire-format limit.
        limit: usize,
    },
    /// `max_pending_steps` is zero.
    #[error("max_pending_steps must be at least 1")]
    ZeroPendingSteps,
    /// The operation needs simulation state, but none has been set yet.
    #[error("simulation state has not been set")]
    StateNotSet,
}

// ── AssentConfig ───────────────────────────────────────────────────

/// Construction-time limits for an [`Assent`](crate::Assent) engine.
///
/// None of these can be changed after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssentConfig {
    /// Maximum participants in one tick. Default: 16. Range: 1..=255.
    pub max_participants: usize,
    /// Maximum ticks applied per [`update`](crate::Assent::update) call.
    /// Default: 15.
    pub max_steps_per_update: usize,
    /// Maximum payload size for one participant, in octets.
    /// Default: 64. Range: 1..=65535.
    pub max_payload_octets: usize,
    /// Maximum records buffered in the step log. Default: 256.
    pub max_pending_steps: usize,
    /// Replay cursor used when the engine is built with an initial state.
    /// Default: 0.
    pub initial_step_id: StepId,
}

impl Default for AssentConfig {
    fn default() -> Self {
        Self {
            max_participants: 16,
            max_steps_per_update: 15,
            max_payload_octets: 64,
            max_pending_steps: 256,
            initial_step_id: StepId(0),
        }
    }
}

impl AssentConfig {
    /// Check every limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_participants == 0 {
            return Err(ConfigError::NoParticipants);
        }
        if self.max_participants > MAX_PARTICIPANTS {
            return Err(ConfigError::TooManyParticipants {
                configured: self.max_participants,
                limit: MAX_PARTICIPANTS,
            });
        }
        if self.max_steps_per_update == 0 {
            return Err(ConfigError::ZeroStepsPerUpdate);
        }
        if self.max_payload_octets == 0 {
            return Err(ConfigError::ZeroPayload);
        }
        if self.max_payload_octets > MAX_PAYLOAD_OCTETS {
            return Err(ConfigError::PayloadTooLarge {
                configured: self.max_payload_octets,
                limit: MAX_PAYLOAD_OCTETS,
            });
        }
        if self.max_pending_steps == 0 {
            return Err(ConfigError::ZeroPendingSteps);
        }
        Ok(())
    }

    /// Worst-case combined-step size for these limits.
    ///
    /// Sizes the engine's scratch buffer and the step log's record limit.
    pub fn combined_capacity(&self) -> usize {
        combined_capacity(self.max_participants, self.max_payload_octets)
    }
}
