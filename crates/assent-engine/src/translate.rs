//! Mapping between wire-level step types and simulation input types.
//!
//! | Wire ([`StepType`])       | Simulation ([`ParticipantInputType`]) | Payload |
//! |---------------------------|---------------------------------------|---------|
//! | `Normal`                  | `Normal`                              | present |
//! | `StepNotProvidedInTime`   | `NoInputInTime`                       | absent  |
//! | `WaitingForReJoin`        | `WaitingForReJoin`                    | absent  |
//! | `Left`                    | `Left`                                | absent  |
//! | `Joined`                  | `Joined`                              | absent  |
//!
//! Both sides are closed enums; unknown wire octets are rejected by the
//! codec before they reach this table.

use assent_codec::{ParticipantStep, StepType};
use assent_core::{ParticipantInput, ParticipantInputType};

/// Wire step type → simulation input type.
pub fn to_input_type(step_type: StepType) -> ParticipantInputType {
    match step_type {
        StepType::Normal => ParticipantInputType::Normal,
        StepType::StepNotProvidedInTime => ParticipantInputType::NoInputInTime,
        StepType::WaitingForReJoin => ParticipantInputType::WaitingForReJoin,
        StepType::Left => ParticipantInputType::Left,
        StepType::Joined => ParticipantInputType::Joined,
    }
}

/// Simulation input type → wire step type.
pub fn to_step_type(input_type: ParticipantInputType) -> StepType {
    match input_type {
        ParticipantInputType::Normal => StepType::Normal,
        ParticipantInputType::NoInputInTime => StepType::StepNotProvidedInTime,
        ParticipantInputType::WaitingForReJoin => StepType::WaitingForReJoin,
        ParticipantInputType::Left => StepType::Left,
        ParticipantInputType::Joined => StepType::Joined,
    }
}

/// Decoded wire entry → simulation input, borrowing the same payload.
pub(crate) fn to_participant_input<'a>(step: &ParticipantStep<'a>) -> ParticipantInput<'a> {
    let input_type = to_input_type(step.step_type);
    ParticipantInput {
        participant_id: step.participant_id,
        input_type,
        payload: input_type.carries_payload().then_some(step.payload),
    }
}

/// Simulation input → wire entry.
///
/// # Panics
///
/// Panics if payload presence disagrees with the input type. That is a
/// broken producer, and letting it through would desync every replica
/// that decodes the record.
pub(crate) fn to_participant_step<'a>(input: &ParticipantInput<'a>) -> ParticipantStep<'a> {
    assert!(
        input.is_well_formed(),
        "participant {}: {:?} input with {} payload violates the payload presence contract",
        input.participant_id,
        input.input_type,
        match input.payload {
            Some([]) => "an empty",
            Some(_) => "a",
            None => "no",
        },
    );
    ParticipantStep::new(
        input.participant_id,
        to_step_type(input.input_type),
        input.payload.unwrap_or(&[]),
    )
}
