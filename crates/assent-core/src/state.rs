//! Opaque serialized simulation state and its diagnostic hash.

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

/// Full serialized state of a deterministic simulation.
///
/// The engine moves this in and out of the simulation but never
/// interprets the bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SimulationState(Vec<u8>);

impl SimulationState {
    /// Wrap serialized state bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// The serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Size of the serialized state in octets.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the serialized state is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume and return the serialized bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for SimulationState {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for SimulationState {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl AsRef<[u8]> for SimulationState {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// FNV-1a hash of a serialized state.
///
/// Not cryptographic; used for fast equality checks in logs when
/// comparing two machines replaying the same step log.
pub fn state_hash(state: &SimulationState) -> u64 {
    state
        .as_bytes()
        .iter()
        .fold(FNV_OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}
