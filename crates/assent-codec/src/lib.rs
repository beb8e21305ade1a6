//! Combined-step codec for Assent.
//!
//! Multiplexes the per-participant inputs of one tick into a single
//! self-contained byte record (a *combined step*) and demultiplexes it
//! back into a zero-copy view over the source bytes.
//!
//! # Architecture
//!
//! - [`encode`] writes a combined step into a caller-provided fixed buffer
//! - [`decode`] returns a [`CombinedStep`] borrowing payloads from the input
//! - [`combined_capacity`] sizes a buffer for the worst case
//! - All integers are little-endian; there is no schema or compression
//!
//! # Format
//!
//! ```text
//! [participant_count u8]
//! [participant_id u8] [step_type u8] [payload_len u16] [payload ...]   (× count)
//! ```
//!
//! `step_type` is a [`StepType`] octet. `Normal` steps carry a non-empty
//! payload; every other step type carries `payload_len == 0`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{combined_capacity, decode, encode, encoded_len, participant_count};
pub use error::CodecError;
pub use types::{CombinedStep, ParticipantStep, StepType};

/// Octets in the combined-step header (the participant count).
pub const HEADER_OCTETS: usize = 1;

/// Octets in each participant's header (id, step type, payload length).
pub const PARTICIPANT_HEADER_OCTETS: usize = 4;

/// Largest participant count the one-octet header can express.
pub const MAX_PARTICIPANTS: usize = u8::MAX as usize;

/// Largest payload the two-octet length prefix can express.
pub const MAX_PAYLOAD_OCTETS: usize = u16::MAX as usize;
