//! Reference simulations and step builders for Assent development.
//!
//! The simulations in [`fixtures`] implement
//! [`DeterministicSimulation`](assent_core::DeterministicSimulation) with
//! small, fully inspectable state so engine tests can assert exactly
//! which ticks were applied and in what order.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{
    CounterSimulation, LobbySimulation, RecordedInput, RecordedTick, RecordingSimulation,
};

use assent_core::{ParticipantId, ParticipantInput, ParticipantInputType, SimulationState, TickInput};

/// Encode a horizontal-axis value the way [`CounterSimulation`] reads it.
pub fn horizontal_axis(value: i32) -> [u8; 4] {
    value.to_le_bytes()
}

/// Serialized [`CounterSimulation`] state.
pub fn counter_state(x: i32, time: i32) -> SimulationState {
    let mut bytes = Vec::with_capacity(8);
    bytes.extend_from_slice(&x.to_le_bytes());
    bytes.extend_from_slice(&time.to_le_bytes());
    SimulationState::new(bytes)
}

/// A tick where every listed participant sends `payload` as Normal input.
pub fn normal_tick<'a>(participants: impl IntoIterator<Item = u8>, payload: &'a [u8]) -> TickInput<'a> {
    participants
        .into_iter()
        .map(|id| ParticipantInput::normal(ParticipantId(id), payload))
        .collect()
}

/// A single-participant tick carrying only a lifecycle status.
pub fn status_tick(participant: u8, input_type: ParticipantInputType) -> TickInput<'static> {
    [ParticipantInput::status(ParticipantId(participant), input_type)]
        .into_iter()
        .collect()
}
