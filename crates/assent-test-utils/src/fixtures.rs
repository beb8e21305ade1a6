//! Reusable simulation fixtures.
//!
//! - [`CounterSimulation`] walks right when the first participant pushes
//!   a positive horizontal axis; counts every tick.
//! - [`RecordingSimulation`] keeps an owned copy of every tick it sees.
//! - [`LobbySimulation`] tracks membership from lifecycle inputs.

use assent_core::{
    DeterministicSimulation, ParticipantId, ParticipantInputType, SimulationState, StepId,
    TickInput,
};
use indexmap::IndexMap;

fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    let mut buf = [0u8; 4];
    if let Some(src) = bytes.get(offset..offset + 4) {
        buf.copy_from_slice(src);
    }
    i32::from_le_bytes(buf)
}

// ── CounterSimulation ──────────────────────────────────────────────

/// Position and clock driven by the first participant's input.
///
/// State is `x` then `time`, each an `i32` in little-endian order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CounterSimulation {
    pub x: i32,
    pub time: i32,
}

impl CounterSimulation {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DeterministicSimulation for CounterSimulation {
    fn tick(&mut self, _step_id: StepId, input: &TickInput<'_>) {
        if let Some(first) = input.participants().first() {
            if first.input_type != ParticipantInputType::Normal {
                return;
            }
            if read_i32(first.payload.unwrap_or(&[]), 0) > 0 {
                self.x += 1;
            }
        }
        self.time += 1;
    }

    fn state(&self) -> SimulationState {
        crate::counter_state(self.x, self.time)
    }

    fn set_state(&mut self, state: &SimulationState) {
        self.x = read_i32(state.as_bytes(), 0);
        self.time = read_i32(state.as_bytes(), 4);
    }
}

// ── RecordingSimulation ────────────────────────────────────────────

/// Owned copy of one participant input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedInput {
    pub participant_id: ParticipantId,
    pub input_type: ParticipantInputType,
    pub payload: Option<Vec<u8>>,
}

/// Owned copy of one applied tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedTick {
    pub step_id: StepId,
    pub participants: Vec<RecordedInput>,
}

/// Records every tick and hook invocation.
///
/// State is the number of applied ticks as a little-endian `u32`.
#[derive(Clone, Debug, Default)]
pub struct RecordingSimulation {
    pub ticks: Vec<RecordedTick>,
    pub pre_tick_calls: usize,
    pub imported: Vec<SimulationState>,
    applied: u32,
}

impl RecordingSimulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step ids of every recorded tick, in application order.
    pub fn step_ids(&self) -> Vec<StepId> {
        self.ticks.iter().map(|t| t.step_id).collect()
    }

    pub fn applied(&self) -> u32 {
        self.applied
    }
}

impl DeterministicSimulation for RecordingSimulation {
    fn tick(&mut self, step_id: StepId, input: &TickInput<'_>) {
        let participants = input
            .iter()
            .map(|p| RecordedInput {
                participant_id: p.participant_id,
                input_type: p.input_type,
                payload: p.payload.map(<[u8]>::to_vec),
            })
            .collect();
        self.ticks.push(RecordedTick {
            step_id,
            participants,
        });
        self.applied += 1;
    }

    fn state(&self) -> SimulationState {
        SimulationState::new(self.applied.to_le_bytes().to_vec())
    }

    fn set_state(&mut self, state: &SimulationState) {
        self.applied = read_i32(state.as_bytes(), 0) as u32;
        self.imported.push(state.clone());
    }

    fn pre_ticks(&mut self) {
        self.pre_tick_calls += 1;
    }
}

// ── LobbySimulation ────────────────────────────────────────────────

/// Session membership plus a per-member score.
///
/// `Joined` adds a member with score 0, `Left` removes it, `Normal`
/// adds the payload's `i32` to the sender's score. Other inputs are
/// ignored. Members keep join order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LobbySimulation {
    pub members: IndexMap<ParticipantId, i32>,
}

impl LobbySimulation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_member(&self, participant_id: ParticipantId) -> bool {
        self.members.contains_key(&participant_id)
    }
}

impl DeterministicSimulation for LobbySimulation {
    fn tick(&mut self, _step_id: StepId, input: &TickInput<'_>) {
        for p in input {
            match p.input_type {
                ParticipantInputType::Joined => {
                    self.members.entry(p.participant_id).or_insert(0);
                }
                ParticipantInputType::Left => {
                    self.members.shift_remove(&p.participant_id);
                }
                ParticipantInputType::Normal => {
                    if let Some(score) = self.members.get_mut(&p.participant_id) {
                        *score += read_i32(p.payload.unwrap_or(&[]), 0);
                    }
                }
                ParticipantInputType::NoInputInTime | ParticipantInputType::WaitingForReJoin => {}
            }
        }
    }

    fn state(&self) -> SimulationState {
        let mut bytes = Vec::with_capacity(1 + self.members.len() * 5);
        bytes.push(self.members.len() as u8);
        for (id, score) in &self.members {
            bytes.push(id.0);
            bytes.extend_from_slice(&score.to_le_bytes());
        }
        SimulationState::new(bytes)
    }

    fn set_state(&mut self, state: &SimulationState) {
        let bytes = state.as_bytes();
        self.members.clear();
        let count = bytes.first().copied().unwrap_or(0) as usize;
        for i in 0..count {
            let offset = 1 + i * 5;
            let Some(&id) = bytes.get(offset) else { break };
            self.members
                .insert(ParticipantId(id), read_i32(bytes, offset + 1));
        }
    }
}
