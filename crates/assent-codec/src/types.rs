//! Wire-level types for combined steps.

use smallvec::SmallVec;

use assent_core::ParticipantId;

/// Wire-level status of one participant within a combined step.
///
/// The discriminants are the octets written to the wire and must never
/// be renumbered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StepType {
    /// Input arrived in time; a payload follows.
    Normal = 0,
    /// The authority did not receive this participant's step in time.
    StepNotProvidedInTime = 1,
    /// The participant is disconnected and may rejoin.
    WaitingForReJoin = 2,
    /// The participant left.
    Left = 3,
    /// The participant joined.
    Joined = 4,
}

impl StepType {
    /// The wire octet for this step type.
    #[inline]
    pub fn octet(self) -> u8 {
        self as u8
    }

    /// Parse a wire octet, returning `None` for unknown values.
    pub fn from_octet(octet: u8) -> Option<Self> {
        match octet {
            0 => Some(Self::Normal),
            1 => Some(Self::StepNotProvidedInTime),
            2 => Some(Self::WaitingForReJoin),
            3 => Some(Self::Left),
            4 => Some(Self::Joined),
            _ => None,
        }
    }
}

/// One participant's entry in a combined step.
///
/// `payload` is empty for every step type except [`StepType::Normal`].
///
/// # Examples
///
/// ```
/// use assent_codec::{ParticipantStep, StepType};
/// use assent_core::ParticipantId;
///
/// let step = ParticipantStep::new(ParticipantId(1), StepType::Normal, &[24, 0, 0, 0]);
/// assert_eq!(step.payload.len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticipantStep<'a> {
    /// Participant identifier.
    pub participant_id: ParticipantId,
    /// Wire-level status.
    pub step_type: StepType,
    /// Payload bytes (empty unless `Normal`).
    pub payload: &'a [u8],
}

impl<'a> ParticipantStep<'a> {
    /// Build a participant step.
    pub fn new(participant_id: ParticipantId, step_type: StepType, payload: &'a [u8]) -> Self {
        Self {
            participant_id,
            step_type,
            payload,
        }
    }
}

/// Decoded view of one combined step.
///
/// Payload slices borrow from the bytes passed to
/// [`decode`](crate::decode); nothing is copied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombinedStep<'a> {
    /// Participant entries in wire order.
    pub participants: SmallVec<[ParticipantStep<'a>; 8]>,
}

impl<'a> CombinedStep<'a> {
    /// Number of participants in this step.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Iterate participants in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParticipantStep<'a>> {
        self.participants.iter()
    }
}
