//! Authoritative step-application engine for deterministic lockstep
//! simulations.
//!
//! [`Assent`] takes an ordered log of per-tick participant inputs and
//! replays it, one tick at a time, against a host-provided
//! [`DeterministicSimulation`](assent_core::DeterministicSimulation).
//! Every machine that replays the same log from the same state ends up
//! with the same state.
//!
//! Producers ingest encoded ticks with [`Assent::add_step`] or
//! [`Assent::add_step_raw`]; the simulation loop calls
//! [`Assent::update`] once per frame to apply a bounded batch of ready
//! ticks in strict step order.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod lockstep;
pub mod metrics;
pub mod translate;

pub use config::{AssentConfig, ConfigError};
pub use error::AssentError;
pub use lockstep::Assent;
pub use metrics::{AssentMetrics, UpdateOutcome};
pub use translate::{to_input_type, to_step_type};
