//! Assent quickstart: an authoritative replay loop from scratch.
//!
//! Demonstrates:
//!   1. Implementing `DeterministicSimulation` for a tiny racing game
//!   2. Building an `AssentConfig` and an engine with an initial state
//!   3. Feeding combined steps from a "network" thread over a step channel
//!   4. Running a frame loop with a bounded per-frame budget
//!   5. Exporting state and handing it to a late joiner
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example quickstart

use std::thread;

use assent_codec::{encode, CodecError, ParticipantStep, StepType};
use assent_core::{
    DeterministicSimulation, ParticipantId, ParticipantInputType, SimulationState, StepId,
    TickInput,
};
use assent_engine::{Assent, AssentConfig, AssentError};
use assent_steps::step_channel;
use tracing::info;
use tracing_subscriber::EnvFilter;

// ─── Game ───────────────────────────────────────────────────────
//
// Each racer has a position on a 1-D track. A Normal input is one
// signed octet of throttle. Racers join and leave through lifecycle
// inputs; a missing input means "coast".

const TRACK_LENGTH: i32 = 1_000;

#[derive(Default)]
struct Race {
    racers: Vec<(u8, i32)>,
}

impl DeterministicSimulation for Race {
    fn tick(&mut self, _step_id: StepId, input: &TickInput<'_>) {
        for p in input {
            let id = p.participant_id.0;
            match p.input_type {
                ParticipantInputType::Joined => self.racers.push((id, 0)),
                ParticipantInputType::Left => self.racers.retain(|(r, _)| *r != id),
                ParticipantInputType::Normal => {
                    let throttle = p.payload.and_then(|b| b.first()).copied().unwrap_or(0) as i8;
                    if let Some((_, pos)) = self.racers.iter_mut().find(|(r, _)| *r == id) {
                        *pos = (*pos + i32::from(throttle)).clamp(0, TRACK_LENGTH);
                    }
                }
                ParticipantInputType::NoInputInTime | ParticipantInputType::WaitingForReJoin => {}
            }
        }
    }

    fn state(&self) -> SimulationState {
        let mut bytes = Vec::with_capacity(self.racers.len() * 5);
        for (id, pos) in &self.racers {
            bytes.push(*id);
            bytes.extend_from_slice(&pos.to_le_bytes());
        }
        SimulationState::new(bytes)
    }

    fn set_state(&mut self, state: &SimulationState) {
        self.racers = state
            .as_bytes()
            .chunks_exact(5)
            .map(|c| (c[0], i32::from_le_bytes([c[1], c[2], c[3], c[4]])))
            .collect();
    }
}

// ─── Network side ───────────────────────────────────────────────

/// What the server decided for one racer on one step.
fn racer_step(racer: u8, step: u32) -> (StepType, Option<u8>) {
    match step {
        0 => (StepType::Joined, None),
        s if s % 7 == 3 => (StepType::StepNotProvidedInTime, None),
        _ => (StepType::Normal, Some(racer.wrapping_mul(3))),
    }
}

fn encode_step(step: u32, racers: &[u8], buf: &mut [u8]) -> Result<usize, CodecError> {
    let throttles: Vec<_> = racers.iter().map(|&r| racer_step(r, step)).collect();
    let payloads: Vec<[u8; 1]> = throttles.iter().map(|(_, t)| [t.unwrap_or(0)]).collect();
    let steps: Vec<_> = racers
        .iter()
        .zip(&throttles)
        .zip(&payloads)
        .map(|((&r, (step_type, _)), payload)| {
            let payload: &[u8] = if *step_type == StepType::Normal { payload } else { &[] };
            ParticipantStep::new(ParticipantId(r), *step_type, payload)
        })
        .collect();
    encode(&steps, buf)
}

fn main() -> Result<(), AssentError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ─── Engine ─────────────────────────────────────────────────

    let config = AssentConfig {
        max_participants: 4,
        max_steps_per_update: 8,
        max_payload_octets: 1,
        initial_step_id: StepId(0),
        ..AssentConfig::default()
    };
    let mut assent = Assent::with_state(Race::default(), config.clone(), &SimulationState::default())?;
    info!(scratch = assent.scratch_capacity(), "engine ready");

    // ─── Producer thread ────────────────────────────────────────

    let (tx, mut inbox) = step_channel(64);
    let producer = thread::spawn(move || -> Result<(), CodecError> {
        let racers = [1u8, 2, 3];
        let mut buf = [0u8; 64];
        for step in 0..40u32 {
            let n = encode_step(step, &racers, &mut buf)?;
            if tx.send(StepId(step), buf[..n].to_vec()).is_err() {
                break;
            }
        }
        Ok(())
    });
    producer.join().expect("producer thread panicked")?;

    // ─── Frame loop ─────────────────────────────────────────────

    let mut frame = 0;
    loop {
        assent.receive(&mut inbox)?;
        let outcome = assent.update()?;
        info!(frame, applied = outcome.applied, next = %outcome.next_step_id, "frame");
        frame += 1;
        if outcome.is_caught_up() && inbox.is_empty() {
            break;
        }
    }

    for (id, pos) in &assent.simulation().racers {
        info!(racer = id, position = pos, "standings");
    }

    // ─── Late joiner ────────────────────────────────────────────

    let (step_id, state) = assent.state()?;
    let mut spectator = Assent::new(Race::default(), config)?;
    spectator.set_state(&state, step_id);
    assert_eq!(spectator.state()?, assent.state()?);
    info!(%step_id, octets = state.len(), "spectator synchronized");

    let m = assent.metrics();
    info!(
        updates = m.updates,
        ticks = m.ticks_applied,
        octets = m.octets_ingested,
        "done"
    );
    Ok(())
}
