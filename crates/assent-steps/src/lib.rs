//! Ordered step log for Assent.
//!
//! A step log is an append-only, key-ordered store of combined-step
//! records keyed by [`StepId`](assent_core::StepId). Producers write at
//! a chosen id; the engine reads strictly in order, peeking at the head
//! before committing to consume it.
//!
//! - [`StepLog`] is the trait the engine is generic over
//! - [`StepBuffer`] is the bounded in-memory implementation
//! - [`step_channel`] hands records from an ingestion thread to the
//!   thread that owns the log

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod channel;
pub mod error;
pub mod log;

pub use buffer::StepBuffer;
pub use channel::{step_channel, PendingStep, StepInbox, StepSender};
pub use error::StepLogError;
pub use log::StepLog;
