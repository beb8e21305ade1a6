//! Benchmark profiles and input generators for the Assent step engine.
//!
//! - [`session_profile`]: engine limits for a session of a given size
//! - [`random_records`]: seeded, pre-encoded combined steps
//! - [`ChecksumSimulation`]: a simulation whose tick cost is proportional
//!   to its input size

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use assent_codec::{encode, ParticipantStep, StepType};
use assent_core::{
    DeterministicSimulation, ParticipantId, ParticipantInputType, SimulationState, StepId,
    TickInput,
};
use assent_engine::AssentConfig;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Engine limits for `participants` racers sending `payload_octets` each.
pub fn session_profile(participants: usize, payload_octets: usize) -> AssentConfig {
    AssentConfig {
        max_participants: participants,
        max_steps_per_update: 64,
        max_payload_octets: payload_octets,
        max_pending_steps: 4096,
        initial_step_id: StepId(0),
    }
}

/// Generate `count` encoded combined steps from `seed`.
///
/// Every step carries all `participants`. Roughly one entry in sixteen
/// is a `StepNotProvidedInTime`; the rest are `Normal` with
/// `payload_octets` random octets.
///
/// # Panics
///
/// Panics if `participants` exceeds 255 or `payload_octets` is zero.
pub fn random_records(
    seed: u64,
    count: usize,
    participants: usize,
    payload_octets: usize,
) -> Vec<Vec<u8>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut payloads = vec![0u8; participants * payload_octets];
    let mut buf = vec![0u8; assent_codec::combined_capacity(participants, payload_octets)];

    (0..count)
        .map(|_| {
            rng.fill_bytes(&mut payloads);
            let steps: Vec<ParticipantStep<'_>> = payloads
                .chunks_exact(payload_octets)
                .enumerate()
                .map(|(i, payload)| {
                    let id = ParticipantId(i as u8);
                    if rng.next_u32() % 16 == 0 {
                        ParticipantStep::new(id, StepType::StepNotProvidedInTime, &[])
                    } else {
                        ParticipantStep::new(id, StepType::Normal, payload)
                    }
                })
                .collect();
            let n = encode(&steps, &mut buf)
                .expect("random_records: participants must fit the wire format");
            buf[..n].to_vec()
        })
        .collect()
}

/// Folds every payload octet into a running checksum.
#[derive(Debug, Default)]
pub struct ChecksumSimulation {
    checksum: u64,
}

impl ChecksumSimulation {
    /// The current checksum.
    pub fn checksum(&self) -> u64 {
        self.checksum
    }
}

impl DeterministicSimulation for ChecksumSimulation {
    fn tick(&mut self, step_id: StepId, input: &TickInput<'_>) {
        self.checksum = self.checksum.rotate_left(5) ^ u64::from(step_id.0);
        for p in input {
            if p.input_type == ParticipantInputType::Normal {
                for &b in p.payload.unwrap_or(&[]) {
                    self.checksum = self.checksum.wrapping_mul(31).wrapping_add(u64::from(b));
                }
            }
        }
    }

    fn state(&self) -> SimulationState {
        SimulationState::new(self.checksum.to_le_bytes().to_vec())
    }

    fn set_state(&mut self, state: &SimulationState) {
        let mut buf = [0u8; 8];
        if let Some(src) = state.as_bytes().get(..8) {
            buf.copy_from_slice(src);
        }
        self.checksum = u64::from_le_bytes(buf);
    }
}
