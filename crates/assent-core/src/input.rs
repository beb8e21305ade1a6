//! Per-tick participant inputs as seen by the deterministic simulation.

use smallvec::SmallVec;

use crate::id::ParticipantId;

/// Simulation-level status of one participant for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticipantInputType {
    /// The participant provided input in time; a payload is attached.
    Normal,
    /// The participant is connected but its input did not arrive in time.
    NoInputInTime,
    /// The participant dropped and the session is holding its slot.
    WaitingForReJoin,
    /// The participant left the session this tick.
    Left,
    /// The participant joined the session this tick.
    Joined,
}

impl ParticipantInputType {
    /// Whether a payload must accompany this input type.
    #[inline]
    pub fn carries_payload(self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// One participant's contribution to a tick.
///
/// `payload` is `Some` if and only if `input_type` is
/// [`Normal`](ParticipantInputType::Normal). Producers that break this
/// are broken, so ingestion panics on a mismatch instead of returning an
/// error. Use the [`normal`](Self::normal) and [`status`](Self::status)
/// constructors to build well-formed values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParticipantInput<'a> {
    /// The participant this input belongs to.
    pub participant_id: ParticipantId,
    /// Lifecycle status for this tick.
    pub input_type: ParticipantInputType,
    /// Application-defined input bytes, present only for `Normal`.
    pub payload: Option<&'a [u8]>,
}

impl<'a> ParticipantInput<'a> {
    /// A `Normal` input carrying `payload`.
    pub fn normal(participant_id: ParticipantId, payload: &'a [u8]) -> Self {
        Self {
            participant_id,
            input_type: ParticipantInputType::Normal,
            payload: Some(payload),
        }
    }

    /// A payload-less lifecycle input (`NoInputInTime`, `Left`, ...).
    ///
    /// # Panics
    ///
    /// Panics if `input_type` is `Normal`.
    pub fn status(participant_id: ParticipantId, input_type: ParticipantInputType) -> Self {
        assert!(
            !input_type.carries_payload(),
            "participant {participant_id}: Normal input requires a payload"
        );
        Self {
            participant_id,
            input_type,
            payload: None,
        }
    }

    /// Whether payload presence agrees with the input type.
    ///
    /// A `Normal` input must carry a non-empty payload; every other type
    /// must carry none.
    pub fn is_well_formed(&self) -> bool {
        match (self.input_type, self.payload) {
            (ParticipantInputType::Normal, Some(p)) => !p.is_empty(),
            (ParticipantInputType::Normal, None) => false,
            (_, payload) => payload.is_none(),
        }
    }
}

/// Inline storage for the participants of one tick.
///
/// Eight participants fit without touching the heap.
pub type TickParticipants<'a> = SmallVec<[ParticipantInput<'a>; 8]>;

/// All participant inputs for exactly one tick, in wire order.
///
/// Built fresh for every applied tick. Payloads borrow from whatever
/// buffer the inputs were decoded from, so a `TickInput` never outlives
/// the call that delivers it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickInput<'a> {
    participants: TickParticipants<'a>,
}

impl<'a> TickInput<'a> {
    /// An empty tick (no participants).
    pub fn new() -> Self {
        Self {
            participants: SmallVec::new(),
        }
    }

    /// Append one participant's input.
    pub fn push(&mut self, input: ParticipantInput<'a>) {
        self.participants.push(input);
    }

    /// Number of participants in this tick.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    /// Whether this tick has no participants.
    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// The participant inputs, in wire order.
    pub fn participants(&self) -> &[ParticipantInput<'a>] {
        &self.participants
    }

    /// Iterate over the participant inputs, in wire order.
    pub fn iter(&self) -> std::slice::Iter<'_, ParticipantInput<'a>> {
        self.participants.iter()
    }

    /// Look up the input for a specific participant.
    pub fn get(&self, participant_id: ParticipantId) -> Option<&ParticipantInput<'a>> {
        self.participants
            .iter()
            .find(|p| p.participant_id == participant_id)
    }
}

impl<'a> FromIterator<ParticipantInput<'a>> for TickInput<'a> {
    fn from_iter<I: IntoIterator<Item = ParticipantInput<'a>>>(iter: I) -> Self {
        Self {
            participants: iter.into_iter().collect(),
        }
    }
}

impl<'a, 'b> IntoIterator for &'b TickInput<'a> {
    type Item = &'b ParticipantInput<'a>;
    type IntoIter = std::slice::Iter<'b, ParticipantInput<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}
