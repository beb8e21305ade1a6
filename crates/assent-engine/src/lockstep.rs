//! The authoritative step-application engine.
//!
//! [`Assent`] owns a step log, a deterministic simulation, and a replay
//! cursor. Producers append encoded ticks at explicit step ids; the
//! simulation loop calls [`update()`](Assent::update) once per frame to
//! apply a bounded batch of ready ticks in strict step order.
//!
//! # Ordering
//!
//! At every observable point the simulation's state is the result of
//! applying every tick with an id before the cursor, in order, each
//! exactly once. A record is only consumed from the log after its tick
//! has been applied: a record that fails validation stays at the head of
//! the log and the cursor does not move.
//!
//! # Ownership model
//!
//! `Assent` is [`Send`] when its simulation and log are. All mutating
//! methods take `&mut self`; nothing blocks and there is no internal
//! locking. Records arriving on another thread go through
//! [`step_channel`](assent_steps::step_channel) and are pulled in with
//! [`receive()`](Assent::receive).

use assent_codec::{decode, encode, CodecError, ParticipantStep};
use assent_core::{DeterministicSimulation, SimulationState, StepId, TickInput};
use assent_steps::{StepBuffer, StepInbox, StepLog, StepLogError};
use smallvec::SmallVec;
use tracing::{debug, trace, warn, Level};

use crate::config::{AssentConfig, ConfigError};
use crate::error::AssentError;
use crate::metrics::{AssentMetrics, UpdateOutcome};
use crate::translate::{to_participant_input, to_participant_step};

// Compile-time assertion: the default engine is Send for Send simulations.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check<S: DeterministicSimulation + Send>() {
        assert_send::<Assent<S>>();
    }
};

// ── Assent ─────────────────────────────────────────────────────────

/// Replays an ordered step log against a deterministic simulation.
///
/// Generic over the simulation `S` and the step log `L`. The default log
/// is a bounded in-memory [`StepBuffer`] sized from [`AssentConfig`].
///
/// # Example
///
/// ```
/// use assent_core::{
///     DeterministicSimulation, ParticipantId, ParticipantInput, SimulationState, StepId,
///     TickInput,
/// };
/// use assent_engine::{Assent, AssentConfig};
///
/// #[derive(Default)]
/// struct Clock(u32);
///
/// impl DeterministicSimulation for Clock {
///     fn tick(&mut self, _step_id: StepId, _input: &TickInput<'_>) {
///         self.0 += 1;
///     }
///     fn state(&self) -> SimulationState {
///         SimulationState::new(self.0.to_le_bytes().to_vec())
///     }
///     fn set_state(&mut self, state: &SimulationState) {
///         let mut buf = [0u8; 4];
///         buf.copy_from_slice(&state.as_bytes()[..4]);
///         self.0 = u32::from_le_bytes(buf);
///     }
/// }
///
/// let config = AssentConfig {
///     initial_step_id: StepId(100),
///     ..AssentConfig::default()
/// };
/// let initial = SimulationState::new(0u32.to_le_bytes().to_vec());
/// let mut assent = Assent::with_state(Clock::default(), config, &initial)?;
///
/// let tick: TickInput<'_> = [ParticipantInput::normal(ParticipantId(1), &[1])]
///     .into_iter()
///     .collect();
/// assent.add_step(StepId(100), &tick)?;
///
/// let outcome = assent.update()?;
/// assert_eq!(outcome.applied, 1);
/// assert_eq!(assent.expected_step_id(), StepId(101));
/// # Ok::<(), assent_engine::AssentError>(())
/// ```
pub struct Assent<S, L = StepBuffer> {
    simulation: S,
    steps: L,
    scratch: Box<[u8]>,
    step_id: StepId,
    initialized: bool,
    max_participants: usize,
    max_steps_per_update: usize,
    metrics: AssentMetrics,
}

impl<S: DeterministicSimulation> Assent<S, StepBuffer> {
    /// Create an engine whose state will be supplied later through
    /// [`set_state()`](Self::set_state).
    ///
    /// The step log holds up to `max_pending_steps` records of at most
    /// the worst-case combined size. Steps may be ingested before the
    /// state is set; `update()` and `state()` fail until it is.
    pub fn new(simulation: S, config: AssentConfig) -> Result<Self, AssentError> {
        config.validate()?;
        let steps = StepBuffer::new(config.max_pending_steps, config.combined_capacity());
        Self::with_log(simulation, steps, config)
    }

    /// Create an engine and import `state` at `config.initial_step_id`.
    pub fn with_state(
        simulation: S,
        config: AssentConfig,
        state: &SimulationState,
    ) -> Result<Self, AssentError> {
        let step_id = config.initial_step_id;
        let mut assent = Self::new(simulation, config)?;
        assent.set_state(state, step_id);
        Ok(assent)
    }
}

impl<S: DeterministicSimulation, L: StepLog> Assent<S, L> {
    /// Create an uninitialized engine reading from a caller-provided log.
    ///
    /// The log's own limits apply to writes in addition to the engine's
    /// scratch-buffer ceiling.
    pub fn with_log(simulation: S, steps: L, config: AssentConfig) -> Result<Self, AssentError> {
        config.validate()?;
        Ok(Self {
            simulation,
            steps,
            scratch: vec![0u8; config.combined_capacity()].into_boxed_slice(),
            step_id: config.initial_step_id,
            initialized: false,
            max_participants: config.max_participants,
            max_steps_per_update: config.max_steps_per_update,
            metrics: AssentMetrics::default(),
        })
    }

    // ── State ──────────────────────────────────────────────────────

    /// Import `state` into the simulation and move the cursor to `step_id`.
    ///
    /// Records in the log older than `step_id` can never be applied and
    /// are discarded. Marks the engine initialized.
    pub fn set_state(&mut self, state: &SimulationState, step_id: StepId) {
        self.simulation.set_state(state);
        self.step_id = step_id;
        self.initialized = true;
        let discarded = self.steps.discard_before(step_id);

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                %step_id,
                octets = state.len(),
                discarded,
                hash = format_args!("{:016X}", self.simulation.hash()),
                "state imported"
            );
        }
    }

    /// The cursor and the simulation's serialized state.
    ///
    /// The cursor is the id of the next tick to apply, so importing the
    /// returned pair elsewhere and replaying the same log from it yields
    /// the same state.
    pub fn state(&self) -> Result<(StepId, SimulationState), AssentError> {
        if !self.initialized {
            return Err(ConfigError::StateNotSet.into());
        }
        Ok((self.step_id, self.simulation.state()))
    }

    // ── Replay ─────────────────────────────────────────────────────

    /// Apply up to `max_steps_per_update` ready ticks, in order.
    ///
    /// Never blocks. An empty log is the normal caught-up state and
    /// returns with nothing applied. The simulation's `pre_ticks` hook
    /// runs once, before the first tick of a non-empty batch.
    ///
    /// # Errors
    ///
    /// - [`AssentError::Desync`] if the head of the log is not the
    ///   cursor's step.
    /// - [`AssentError::MalformedRecord`] if the head record exceeds the
    ///   scratch buffer or does not decode.
    /// - [`AssentError::Overflow`] if the head record has more
    ///   participants than configured.
    /// - [`AssentError::Config`] if no state has been set.
    ///
    /// On error, ticks applied earlier in the same call stay applied and
    /// the offending record stays at the head of the log.
    pub fn update(&mut self) -> Result<UpdateOutcome, AssentError> {
        if !self.initialized {
            return Err(ConfigError::StateNotSet.into());
        }

        let mut applied = 0;
        while applied < self.max_steps_per_update {
            let Some((step_id, record)) = self.steps.peek() else {
                break;
            };

            if step_id != self.step_id {
                self.metrics.desync_events += 1;
                warn!(expected = %self.step_id, received = %step_id, "step log out of sync with cursor");
                return Err(AssentError::Desync {
                    expected: self.step_id,
                    received: step_id,
                });
            }

            let octets = record.len();
            if octets > self.scratch.len() {
                self.metrics.malformed_events += 1;
                warn!(%step_id, octets, capacity = self.scratch.len(), "record exceeds scratch buffer");
                return Err(AssentError::MalformedRecord {
                    step_id,
                    source: CodecError::BufferTooSmall {
                        required: octets,
                        capacity: self.scratch.len(),
                    },
                });
            }
            self.scratch[..octets].copy_from_slice(record);

            let combined = match decode(&self.scratch[..octets]) {
                Ok(combined) => combined,
                Err(source) => {
                    self.metrics.malformed_events += 1;
                    warn!(%step_id, octets, error = %source, "malformed combined step");
                    return Err(AssentError::MalformedRecord { step_id, source });
                }
            };

            let participant_count = combined.participant_count();
            if participant_count > self.max_participants {
                self.metrics.overflow_events += 1;
                warn!(
                    %step_id,
                    participant_count,
                    max = self.max_participants,
                    "too many participants"
                );
                return Err(AssentError::Overflow {
                    step_id,
                    participant_count,
                    max_participants: self.max_participants,
                });
            }

            let input: TickInput<'_> = combined.iter().map(to_participant_input).collect();

            trace!(%step_id, octets, participants = participant_count, "applying step");
            for p in &input {
                trace!(
                    participant = %p.participant_id,
                    input_type = ?p.input_type,
                    octets = p.payload.map_or(0, <[u8]>::len),
                    "participant input"
                );
            }

            if applied == 0 {
                self.simulation.pre_ticks();
            }
            self.simulation.tick(step_id, &input);

            self.steps.pop();
            self.step_id = self.step_id.next();
            self.metrics.ticks_applied += 1;
            applied += 1;
        }

        self.metrics.updates += 1;
        let remaining = self.steps.remaining();
        if applied > 0 {
            debug!(applied, remaining, next = %self.step_id, "update applied steps");
        }

        Ok(UpdateOutcome {
            applied,
            next_step_id: self.step_id,
            remaining,
        })
    }

    // ── Ingestion ──────────────────────────────────────────────────

    /// Encode `input` and append it to the log under `step_id`.
    ///
    /// `step_id` is not checked against the cursor here; a gap or
    /// duplicate surfaces as [`AssentError::Desync`] when replay reaches
    /// it. Returns the encoded size in octets.
    ///
    /// # Panics
    ///
    /// Panics if any participant's payload presence disagrees with its
    /// input type (a `Normal` input without a non-empty payload, or a
    /// lifecycle input carrying one).
    pub fn add_step(&mut self, step_id: StepId, input: &TickInput<'_>) -> Result<usize, AssentError> {
        let participants: SmallVec<[ParticipantStep<'_>; 8]> =
            input.iter().map(to_participant_step).collect();

        let octets = match encode(&participants, &mut self.scratch) {
            Ok(octets) => octets,
            Err(err) => {
                self.metrics.encoding_rejections += 1;
                warn!(%step_id, participants = participants.len(), error = %err, "could not encode step");
                return Err(err.into());
            }
        };

        if let Err(err) = self.steps.write(step_id, &self.scratch[..octets]) {
            self.metrics.encoding_rejections += 1;
            return Err(err.into());
        }
        self.record_ingested(octets);
        Ok(octets)
    }

    /// Append a pre-encoded combined step to the log under `step_id`.
    ///
    /// The record is not decoded here; a malformed record surfaces as
    /// [`AssentError::MalformedRecord`] during replay.
    pub fn add_step_raw(&mut self, step_id: StepId, record: &[u8]) -> Result<(), AssentError> {
        if record.len() > self.scratch.len() {
            self.metrics.encoding_rejections += 1;
            return Err(CodecError::BufferTooSmall {
                required: record.len(),
                capacity: self.scratch.len(),
            }
            .into());
        }
        if let Err(err) = self.steps.write(step_id, record) {
            self.metrics.encoding_rejections += 1;
            return Err(err.into());
        }
        self.record_ingested(record.len());
        Ok(())
    }

    /// Ingest every step waiting in `inbox`, in arrival order.
    ///
    /// Stops at the first rejected step and returns the error. A step
    /// refused because the log is full stays in the inbox and is retried
    /// by the next call; any other rejected step is dropped. Returns the
    /// number of steps ingested.
    pub fn receive(&mut self, inbox: &mut StepInbox) -> Result<usize, AssentError> {
        let mut received = 0;
        let mut result = Ok(());
        while let Some(pending) = inbox.peek() {
            match self.add_step_raw(pending.step_id, &pending.record) {
                Ok(()) => {
                    inbox.try_next();
                    received += 1;
                }
                Err(err @ AssentError::Log(StepLogError::Full { .. })) => {
                    result = Err(err);
                    break;
                }
                Err(err) => {
                    inbox.try_next();
                    result = Err(err);
                    break;
                }
            }
        }
        if received > 0 {
            trace!(received, pending = self.steps.remaining(), held = inbox.len(), "steps received");
        }
        result.map(|()| received)
    }

    fn record_ingested(&mut self, octets: usize) {
        self.metrics.steps_ingested += 1;
        self.metrics.octets_ingested += octets as u64;
    }

    // ── Accessors ──────────────────────────────────────────────────

    /// The id of the next tick `update()` will apply.
    pub fn expected_step_id(&self) -> StepId {
        self.step_id
    }

    /// Whether a state has been imported.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Records waiting in the step log.
    pub fn remaining_steps(&self) -> usize {
        self.steps.remaining()
    }

    /// Size of the scratch buffer, the largest accepted record.
    pub fn scratch_capacity(&self) -> usize {
        self.scratch.len()
    }

    /// Maximum participants per tick.
    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    /// Maximum ticks applied per `update()` call.
    pub fn max_steps_per_update(&self) -> usize {
        self.max_steps_per_update
    }

    /// The simulation being driven.
    pub fn simulation(&self) -> &S {
        &self.simulation
    }

    /// The step log.
    pub fn steps(&self) -> &L {
        &self.steps
    }

    /// Cumulative counters.
    pub fn metrics(&self) -> &AssentMetrics {
        &self.metrics
    }

    /// Consume the engine, returning the simulation and the log.
    pub fn into_parts(self) -> (S, L) {
        (self.simulation, self.steps)
    }
}

impl<S, L: StepLog> std::fmt::Debug for Assent<S, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assent")
            .field("step_id", &self.step_id)
            .field("initialized", &self.initialized)
            .field("pending", &self.steps.remaining())
            .field("scratch_capacity", &self.scratch.len())
            .field("max_participants", &self.max_participants)
            .field("max_steps_per_update", &self.max_steps_per_update)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assent_codec::{encode, StepType};
    use assent_core::{ParticipantId, ParticipantInput, ParticipantInputType};
    use assent_steps::{step_channel, StepLogError};
    use assent_test_utils::{
        counter_state, horizontal_axis, normal_tick, status_tick, CounterSimulation,
        RecordingSimulation,
    };

    fn config_at(step_id: u32) -> AssentConfig {
        AssentConfig {
            max_participants: 16,
            max_steps_per_update: 15,
            max_payload_octets: 10,
            initial_step_id: StepId(step_id),
            ..AssentConfig::default()
        }
    }

    fn recorder_at(step_id: u32) -> Assent<RecordingSimulation> {
        Assent::with_state(
            RecordingSimulation::new(),
            config_at(step_id),
            &SimulationState::new(vec![0, 0, 0, 0]),
        )
        .unwrap()
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = AssentConfig {
            max_steps_per_update: 0,
            ..AssentConfig::default()
        };
        let err = Assent::new(CounterSimulation::new(), cfg).unwrap_err();
        assert_eq!(err, AssentError::Config(ConfigError::ZeroStepsPerUpdate));
    }

    #[test]
    fn scratch_sized_from_limits() {
        let assent = recorder_at(0);
        assert_eq!(assent.scratch_capacity(), 1 + 16 * 14);
    }

    #[test]
    fn single_tick_advances_cursor() {
        let mut assent =
            Assent::with_state(CounterSimulation::new(), config_at(100), &counter_state(0, 0))
                .unwrap();
        let payload = horizontal_axis(24);
        assent.add_step(StepId(100), &normal_tick([1], &payload)).unwrap();

        assert_eq!(assent.simulation().time, 0);
        let outcome = assent.update().unwrap();
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.next_step_id, StepId(101));
        assert!(outcome.is_caught_up());
        assert_eq!((assent.simulation().x, assent.simulation().time), (1, 1));
    }

    #[test]
    fn empty_log_is_caught_up() {
        let mut assent = recorder_at(5);
        let outcome = assent.update().unwrap();
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.next_step_id, StepId(5));
        assert_eq!(assent.simulation().pre_tick_calls, 0);
    }

    #[test]
    fn deferred_engine_requires_state() {
        let mut assent = Assent::new(RecordingSimulation::new(), config_at(0)).unwrap();
        assert!(!assent.is_initialized());
        assert_eq!(
            assent.update(),
            Err(AssentError::Config(ConfigError::StateNotSet))
        );
        assert_eq!(
            assent.state(),
            Err(AssentError::Config(ConfigError::StateNotSet))
        );

        assent.add_step(StepId(7), &normal_tick([1], &[1])).unwrap();
        assent.set_state(&SimulationState::new(vec![0, 0, 0, 0]), StepId(7));
        assert_eq!(assent.update().unwrap().applied, 1);
    }

    #[test]
    fn desync_leaves_record_in_log() {
        let mut assent = recorder_at(101);
        assent.add_step(StepId(105), &normal_tick([1], &[1])).unwrap();

        assert_eq!(
            assent.update(),
            Err(AssentError::Desync {
                expected: StepId(101),
                received: StepId(105)
            })
        );
        assert_eq!(assent.expected_step_id(), StepId(101));
        assert_eq!(assent.remaining_steps(), 1);
        assert!(assent.simulation().ticks.is_empty());
        assert_eq!(assent.simulation().pre_tick_calls, 0);
        assert_eq!(assent.metrics().desync_events, 1);
    }

    #[test]
    fn malformed_record_not_consumed() {
        let mut assent = recorder_at(0);
        assent.add_step_raw(StepId(0), &[1, 9, 7, 0, 0]).unwrap();

        let err = assent.update().unwrap_err();
        assert!(matches!(
            err,
            AssentError::MalformedRecord {
                step_id: StepId(0),
                source: CodecError::UnknownStepType { octet: 7, .. }
            }
        ));
        assert!(err.is_fatal());
        assert_eq!(assent.remaining_steps(), 1);
        assert_eq!(assent.expected_step_id(), StepId(0));
        assert_eq!(assent.simulation().pre_tick_calls, 0);
    }

    #[test]
    fn record_larger_than_scratch_is_malformed() {
        let cfg = AssentConfig {
            max_participants: 1,
            max_payload_octets: 4,
            ..AssentConfig::default()
        };
        let mut log = StepBuffer::new(8, 4096);
        log.write(StepId(0), &[0u8; 100]).unwrap();

        let mut assent = Assent::with_log(RecordingSimulation::new(), log, cfg).unwrap();
        assent.set_state(&SimulationState::new(vec![0, 0, 0, 0]), StepId(0));
        assert_eq!(assent.scratch_capacity(), 9);

        let expected = AssentError::MalformedRecord {
            step_id: StepId(0),
            source: CodecError::BufferTooSmall {
                required: 100,
                capacity: 9,
            },
        };
        let err = assent.update().unwrap_err();
        assert_eq!(err, expected);
        assert!(err.is_fatal());
        assert_eq!(assent.update(), Err(expected));
        assert_eq!(assent.remaining_steps(), 1);
        assert_eq!(assent.metrics().malformed_events, 2);
        assert_eq!(assent.simulation().pre_tick_calls, 0);
    }

    #[test]
    fn pre_ticks_once_per_batch() {
        let mut assent = recorder_at(0);
        for id in 0..3 {
            assent.add_step(StepId(id), &normal_tick([1], &[1])).unwrap();
        }
        assent.update().unwrap();
        assert_eq!(assent.simulation().pre_tick_calls, 1);
        assert_eq!(assent.simulation().ticks.len(), 3);

        assent.add_step(StepId(3), &normal_tick([1], &[1])).unwrap();
        assent.update().unwrap();
        assent.update().unwrap();
        assert_eq!(assent.simulation().pre_tick_calls, 2);
    }

    #[test]
    fn tick_receives_step_id() {
        let mut assent = recorder_at(u32::MAX);
        assent
            .add_step(StepId(u32::MAX), &normal_tick([1], &[1]))
            .unwrap();
        assent.add_step(StepId(0), &normal_tick([1], &[2])).unwrap();
        assent.update().unwrap();
        assert_eq!(
            assent.simulation().step_ids(),
            vec![StepId(u32::MAX), StepId(0)]
        );
        assert_eq!(assent.expected_step_id(), StepId(1));
    }

    #[test]
    fn add_step_returns_encoded_size() {
        let mut assent = recorder_at(0);
        let tick: TickInput<'_> = [
            ParticipantInput::normal(ParticipantId(1), &[1, 2, 3]),
            ParticipantInput::status(ParticipantId(2), ParticipantInputType::Joined),
        ]
        .into_iter()
        .collect();
        assert_eq!(assent.add_step(StepId(0), &tick).unwrap(), 1 + 4 + 3 + 4);
        assert_eq!(assent.metrics().steps_ingested, 1);
        assert_eq!(assent.metrics().octets_ingested, 12);
    }

    #[test]
    fn oversized_step_rejected_at_ingestion() {
        let cfg = AssentConfig {
            max_participants: 1,
            max_payload_octets: 4,
            ..AssentConfig::default()
        };
        let mut assent = Assent::new(RecordingSimulation::new(), cfg).unwrap();
        let payload = [0u8; 5];
        let err = assent
            .add_step(StepId(0), &normal_tick([1], &payload))
            .unwrap_err();
        assert!(matches!(
            err,
            AssentError::Encoding(CodecError::BufferTooSmall { .. })
        ));
        assert_eq!(assent.remaining_steps(), 0);

        let raw = [0u8; 10];
        assert!(matches!(
            assent.add_step_raw(StepId(0), &raw),
            Err(AssentError::Encoding(CodecError::BufferTooSmall {
                required: 10,
                capacity: 9
            }))
        ));
        assert_eq!(assent.metrics().encoding_rejections, 2);
    }

    #[test]
    fn log_rejection_surfaces_as_log_error() {
        let mut assent = recorder_at(0);
        assent.add_step(StepId(4), &normal_tick([1], &[1])).unwrap();
        assert!(matches!(
            assent.add_step(StepId(3), &normal_tick([1], &[1])),
            Err(AssentError::Log(StepLogError::OutOfOrder { .. }))
        ));
    }

    #[test]
    #[should_panic(expected = "payload presence contract")]
    fn add_step_panics_on_contract_violation() {
        let mut assent = recorder_at(0);
        let tick: TickInput<'_> = [ParticipantInput {
            participant_id: ParticipantId(1),
            input_type: ParticipantInputType::Left,
            payload: Some(&[1]),
        }]
        .into_iter()
        .collect();
        let _ = assent.add_step(StepId(0), &tick);
    }

    #[test]
    fn raw_and_encoded_steps_agree() {
        let mut assent = recorder_at(0);
        let mut buf = [0u8; 32];
        let steps = [ParticipantStep::new(ParticipantId(3), StepType::Normal, &[9, 9])];
        let n = encode(&steps, &mut buf).unwrap();
        assent.add_step_raw(StepId(0), &buf[..n]).unwrap();
        assent.update().unwrap();

        let recorded = &assent.simulation().ticks[0].participants[0];
        assert_eq!(recorded.participant_id, ParticipantId(3));
        assert_eq!(recorded.payload.as_deref(), Some(&[9u8, 9][..]));
    }

    #[test]
    fn set_state_discards_stale_records() {
        let mut assent = recorder_at(0);
        for id in 0..5 {
            assent.add_step(StepId(id), &normal_tick([1], &[1])).unwrap();
        }
        assent.set_state(&SimulationState::new(vec![3, 0, 0, 0]), StepId(3));
        assert_eq!(assent.remaining_steps(), 2);
        assert_eq!(assent.simulation().applied(), 3);

        let outcome = assent.update().unwrap();
        assert_eq!(outcome.applied, 2);
        assert_eq!(assent.simulation().step_ids(), vec![StepId(3), StepId(4)]);
    }

    #[test]
    fn state_reports_cursor() {
        let mut assent =
            Assent::with_state(CounterSimulation::new(), config_at(100), &counter_state(0, 0))
                .unwrap();
        let payload = horizontal_axis(24);
        assent.add_step(StepId(100), &normal_tick([1], &payload)).unwrap();
        assent.update().unwrap();
        assert_eq!(
            assent.state().unwrap(),
            (StepId(101), counter_state(1, 1))
        );
    }

    #[test]
    fn receive_drains_inbox() {
        let mut assent = recorder_at(0);
        let (tx, mut inbox) = step_channel(8);
        let mut buf = [0u8; 16];
        for id in 0..3u32 {
            let data = [id as u8 + 1];
            let steps = [ParticipantStep::new(ParticipantId(1), StepType::Normal, &data)];
            let n = encode(&steps, &mut buf).unwrap();
            tx.send(StepId(id), buf[..n].to_vec()).unwrap();
        }
        assert_eq!(assent.receive(&mut inbox).unwrap(), 3);
        assert!(inbox.is_empty());
        assert_eq!(assent.update().unwrap().applied, 3);
    }

    #[test]
    fn lifecycle_tick_has_no_payload() {
        let mut assent = recorder_at(0);
        assent
            .add_step(StepId(0), &status_tick(2, ParticipantInputType::WaitingForReJoin))
            .unwrap();
        assent.update().unwrap();
        let recorded = &assent.simulation().ticks[0].participants[0];
        assert_eq!(recorded.input_type, ParticipantInputType::WaitingForReJoin);
        assert_eq!(recorded.payload, None);
    }

    #[test]
    fn debug_shows_cursor() {
        let assent = recorder_at(0x2A);
        let debug = format!("{assent:?}");
        assert!(debug.contains("Assent"));
        assert!(debug.contains("initialized: true"));
    }

    #[test]
    fn into_parts_returns_simulation() {
        let mut assent = recorder_at(0);
        assent.add_step(StepId(0), &normal_tick([1], &[1])).unwrap();
        assent.update().unwrap();
        let (sim, log) = assent.into_parts();
        assert_eq!(sim.applied(), 1);
        assert!(log.is_empty());
    }
}
