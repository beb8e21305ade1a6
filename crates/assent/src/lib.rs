//! Assent: an authoritative step-application engine for deterministic
//! lockstep simulations.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Assent sub-crates. For most users, adding `assent` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use assent::prelude::*;
//!
//! // A simulation that counts ticks in which participant 1 sent input.
//! #[derive(Default)]
//! struct Presses(u32);
//!
//! impl DeterministicSimulation for Presses {
//!     fn tick(&mut self, _step_id: StepId, input: &TickInput<'_>) {
//!         if input.get(ParticipantId(1)).is_some_and(|p| p.payload.is_some()) {
//!             self.0 += 1;
//!         }
//!     }
//!     fn state(&self) -> SimulationState {
//!         SimulationState::new(self.0.to_le_bytes().to_vec())
//!     }
//!     fn set_state(&mut self, state: &SimulationState) {
//!         let mut buf = [0u8; 4];
//!         buf.copy_from_slice(&state.as_bytes()[..4]);
//!         self.0 = u32::from_le_bytes(buf);
//!     }
//! }
//!
//! let initial = SimulationState::new(vec![0; 4]);
//! let mut assent = Assent::with_state(Presses::default(), AssentConfig::default(), &initial).unwrap();
//!
//! let pressed: TickInput<'_> = [ParticipantInput::normal(ParticipantId(1), &[1])]
//!     .into_iter()
//!     .collect();
//! let idle: TickInput<'_> = [ParticipantInput::status(ParticipantId(1), ParticipantInputType::NoInputInTime)]
//!     .into_iter()
//!     .collect();
//! assent.add_step(StepId(0), &pressed).unwrap();
//! assent.add_step(StepId(1), &idle).unwrap();
//!
//! let outcome = assent.update().unwrap();
//! assert_eq!(outcome.applied, 2);
//! assert_eq!(assent.simulation().0, 1);
//! assert_eq!(assent.state().unwrap().0, StepId(2));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `assent-core` | IDs, participant inputs, simulation state, the simulation trait |
//! | [`codec`] | `assent-codec` | Combined-step wire format |
//! | [`steps`] | `assent-steps` | Step log trait, in-memory log, cross-thread hand-off |
//! | [`engine`] | `assent-engine` | The `Assent` engine, configuration, errors, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`assent-core`).
///
/// Contains [`types::StepId`], [`types::ParticipantInput`],
/// [`types::TickInput`] and the [`types::DeterministicSimulation`] trait
/// that hosts implement.
pub use assent_core as types;

/// Combined-step codec (`assent-codec`).
///
/// [`codec::encode`] and [`codec::decode`] convert between per-participant
/// steps and the single record stored per tick.
pub use assent_codec as codec;

/// Step logs (`assent-steps`).
///
/// The [`steps::StepLog`] trait, the bounded [`steps::StepBuffer`], and
/// [`steps::step_channel`] for feeding steps from another thread.
pub use assent_steps as steps;

/// The step-application engine (`assent-engine`).
pub use assent_engine as engine;

/// Common imports for typical Assent usage.
///
/// ```rust
/// use assent::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use assent_core::{
        DeterministicSimulation, ParticipantId, ParticipantInput, ParticipantInputType,
        SimulationState, StepId, TickInput,
    };

    // Step logs
    pub use assent_steps::{step_channel, StepBuffer, StepInbox, StepLog, StepSender};

    // Engine
    pub use assent_engine::{
        Assent, AssentConfig, AssentError, AssentMetrics, ConfigError, UpdateOutcome,
    };
}
