//! The host-implemented simulation abstraction.

use crate::id::StepId;
use crate::input::TickInput;
use crate::state::{state_hash, SimulationState};

/// A deterministic state machine driven one tick at a time.
///
/// The output must be a pure function of the initial state and the
/// ordered sequence of [`TickInput`]s: two machines that import the same
/// state and replay the same step log must end up byte-identical.
///
/// Implementations must treat every lifecycle input type as a valid
/// tick. A `NoInputInTime` participant means "no action this tick", not
/// an error.
pub trait DeterministicSimulation {
    /// Advance the simulation by one tick.
    ///
    /// `step_id` identifies the tick being applied; it is informational
    /// and must not be needed to reproduce the result.
    fn tick(&mut self, step_id: StepId, input: &TickInput<'_>);

    /// Serialize the full current state.
    fn state(&self) -> SimulationState;

    /// Replace the full current state.
    fn set_state(&mut self, state: &SimulationState);

    /// Called once before the first tick of each non-empty update batch.
    ///
    /// Lets a host do once-per-batch bookkeeping (capturing a pre-tick
    /// hash, swapping render buffers) without paying for it every tick.
    fn pre_ticks(&mut self) {}

    /// Diagnostic hash of the current state, used only for logging.
    ///
    /// Defaults to FNV-1a over [`state()`](Self::state). Override when
    /// the simulation can hash itself without serializing.
    fn hash(&self) -> u64 {
        state_hash(&self.state())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::ParticipantId;
    use crate::input::ParticipantInput;

    struct Tally {
        ticks: u32,
    }

    impl DeterministicSimulation for Tally {
        fn tick(&mut self, _step_id: StepId, input: &TickInput<'_>) {
            self.ticks += input.len() as u32;
        }

        fn state(&self) -> SimulationState {
            SimulationState::new(self.ticks.to_le_bytes().to_vec())
        }

        fn set_state(&mut self, state: &SimulationState) {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&state.as_bytes()[..4]);
            self.ticks = u32::from_le_bytes(buf);
        }
    }

    #[test]
    fn default_hash_follows_state() {
        let mut sim = Tally { ticks: 0 };
        let before = sim.hash();
        let tick: TickInput<'_> = [ParticipantInput::normal(ParticipantId(1), &[1])]
            .into_iter()
            .collect();
        sim.tick(StepId(0), &tick);
        assert_ne!(before, sim.hash());
        assert_eq!(sim.hash(), state_hash(&sim.state()));
    }

    #[test]
    fn set_state_round_trips() {
        let mut sim = Tally { ticks: 0 };
        sim.set_state(&SimulationState::new(7u32.to_le_bytes().to_vec()));
        assert_eq!(sim.ticks, 7);
        sim.pre_ticks();
        assert_eq!(sim.state().as_bytes(), &7u32.to_le_bytes());
    }
}
