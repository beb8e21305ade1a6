//! Core types and traits for the Assent lockstep step engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the codec, the step log, and the engine:
//! step and participant identifiers, per-tick participant inputs,
//! opaque simulation state, and the [`DeterministicSimulation`] trait
//! that hosts implement.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod input;
pub mod state;
pub mod traits;

pub use id::{ParticipantId, StepId};
pub use input::{ParticipantInput, ParticipantInputType, TickInput, TickParticipants};
pub use state::{state_hash, SimulationState};
pub use traits::DeterministicSimulation;
