//! Property tests for replay ordering, the per-call budget, and export.

use assent_core::{ParticipantId, ParticipantInput, SimulationState, StepId, TickInput};
use assent_engine::{Assent, AssentConfig, AssentError};
use assent_test_utils::RecordingSimulation;
use proptest::prelude::*;

fn recorder(start: u32, budget: usize) -> Assent<RecordingSimulation> {
    let config = AssentConfig {
        max_participants: 8,
        max_steps_per_update: budget,
        max_payload_octets: 16,
        max_pending_steps: 512,
        initial_step_id: StepId(start),
    };
    Assent::with_state(
        RecordingSimulation::new(),
        config,
        &SimulationState::new(vec![0, 0, 0, 0]),
    )
    .unwrap()
}

proptest! {
    #[test]
    fn ticks_apply_in_order_exactly_once(
        start in any::<u32>(),
        count in 1usize..64,
        budget in 1usize..20,
    ) {
        let mut assent = recorder(start, budget);
        let mut id = StepId(start);
        let mut expected = Vec::with_capacity(count);
        for _ in 0..count {
            let payload = id.0.to_le_bytes();
            let tick: TickInput<'_> = [ParticipantInput::normal(ParticipantId(1), &payload)]
                .into_iter()
                .collect();
            assent.add_step(id, &tick).unwrap();
            expected.push(id);
            id = id.next();
        }

        let mut calls = 0;
        loop {
            let outcome = assent.update().unwrap();
            prop_assert!(outcome.applied <= budget);
            calls += 1;
            if outcome.is_caught_up() {
                break;
            }
            prop_assert_eq!(outcome.applied, budget);
        }

        prop_assert_eq!(calls, count.div_ceil(budget).max(1));
        prop_assert_eq!(assent.simulation().step_ids(), expected);
        prop_assert_eq!(assent.expected_step_id(), id);
        for tick in &assent.simulation().ticks {
            let sent = tick.step_id.0.to_le_bytes();
            prop_assert_eq!(tick.participants[0].payload.as_deref(), Some(&sent[..]));
        }
    }

    #[test]
    fn payload_bytes_survive_replay(
        payloads in prop::collection::vec(prop::collection::vec(any::<u8>(), 1..=16), 1..=8),
    ) {
        let mut assent = recorder(0, 1);
        let tick: TickInput<'_> = payloads
            .iter()
            .enumerate()
            .map(|(i, p)| ParticipantInput::normal(ParticipantId(i as u8), p))
            .collect();
        assent.add_step(StepId(0), &tick).unwrap();
        assent.update().unwrap();

        let recorded = &assent.simulation().ticks[0].participants;
        prop_assert_eq!(recorded.len(), payloads.len());
        for (r, p) in recorded.iter().zip(&payloads) {
            prop_assert_eq!(r.payload.as_ref(), Some(p));
        }
    }

    #[test]
    fn export_is_idempotent_between_updates(steps in 0u32..10) {
        let mut assent = recorder(50, 4);
        for id in 50..50 + steps {
            let tick: TickInput<'_> = [ParticipantInput::normal(ParticipantId(1), &[1])]
                .into_iter()
                .collect();
            assent.add_step(StepId(id), &tick).unwrap();
        }
        assent.update().unwrap();

        let first = assent.state().unwrap();
        let second = assent.state().unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.0, StepId(50 + steps.min(4)));
    }

    #[test]
    fn desync_never_advances(cursor in 0u32..1000, offset in 1u32..1000) {
        let mut assent = recorder(cursor, 8);
        let tick: TickInput<'_> = [ParticipantInput::normal(ParticipantId(1), &[1])]
            .into_iter()
            .collect();
        let received = StepId(cursor + offset);
        assent.add_step(received, &tick).unwrap();

        let before = assent.state().unwrap();
        prop_assert_eq!(
            assent.update(),
            Err(AssentError::Desync { expected: StepId(cursor), received })
        );
        prop_assert_eq!(assent.state().unwrap(), before);
        prop_assert!(assent.simulation().ticks.is_empty());
    }
}
