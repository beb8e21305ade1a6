//! Binary encode/decode for combined steps.
//!
//! All integers are little-endian. Encoding writes into a caller-owned
//! fixed buffer and never allocates; decoding returns slices into the
//! source bytes.

use assent_core::ParticipantId;

use crate::error::CodecError;
use crate::types::{CombinedStep, ParticipantStep, StepType};
use crate::{HEADER_OCTETS, MAX_PARTICIPANTS, MAX_PAYLOAD_OCTETS, PARTICIPANT_HEADER_OCTETS};

// ── Primitive writer ────────────────────────────────────────────

/// Cursor over a fixed output buffer. Callers check the total size up
/// front, so individual writes cannot run past the end.
struct OctetWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> OctetWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn write_u8(&mut self, v: u8) {
        self.buf[self.pos] = v;
        self.pos += 1;
    }

    fn write_u16_le(&mut self, v: u16) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.buf[self.pos..self.pos + b.len()].copy_from_slice(b);
        self.pos += b.len();
    }
}

// ── Primitive reader ────────────────────────────────────────────

/// Bounds-checked cursor over a combined step.
struct OctetReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> OctetReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::Truncated {
                offset: self.pos,
                needed: len,
                available: self.remaining(),
            });
        }
        let out = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(out)
    }

    fn read_u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16_le(&mut self) -> Result<u16, CodecError> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }
}

// ── Validation ──────────────────────────────────────────────────

/// Tracks participant ids already seen in one step.
struct SeenParticipants([bool; 256]);

impl SeenParticipants {
    fn new() -> Self {
        Self([false; 256])
    }

    fn insert(&mut self, id: ParticipantId) -> Result<(), CodecError> {
        let slot = &mut self.0[id.0 as usize];
        if *slot {
            return Err(CodecError::DuplicateParticipant { participant_id: id });
        }
        *slot = true;
        Ok(())
    }
}

fn check_payload(
    participant_id: ParticipantId,
    step_type: StepType,
    size: usize,
) -> Result<(), CodecError> {
    let ok = match step_type {
        StepType::Normal => size > 0,
        _ => size == 0,
    };
    if ok {
        Ok(())
    } else {
        Err(CodecError::PayloadMismatch {
            participant_id,
            step_type,
            size,
        })
    }
}

// ── Sizing ──────────────────────────────────────────────────────

/// Worst-case size of a combined step.
///
/// `max_participants` participants, each carrying `max_payload_octets`.
/// Used once at construction to size scratch buffers.
///
/// # Examples
///
/// ```
/// assert_eq!(assent_codec::combined_capacity(16, 10), 1 + 16 * (4 + 10));
/// ```
pub fn combined_capacity(max_participants: usize, max_payload_octets: usize) -> usize {
    HEADER_OCTETS + max_participants * (PARTICIPANT_HEADER_OCTETS + max_payload_octets)
}

/// Exact encoded size of `participants`.
pub fn encoded_len(participants: &[ParticipantStep<'_>]) -> usize {
    HEADER_OCTETS
        + participants
            .iter()
            .map(|p| PARTICIPANT_HEADER_OCTETS + p.payload.len())
            .sum::<usize>()
}

// ── Encode / decode ─────────────────────────────────────────────

/// Encode a combined step into `dest`, returning the octets written.
///
/// Validates every entry before writing anything, so `dest` is left
/// untouched on error.
///
/// # Errors
///
/// [`CodecError::BufferTooSmall`] if the step does not fit in `dest`;
/// [`TooManyParticipants`](CodecError::TooManyParticipants),
/// [`PayloadTooLarge`](CodecError::PayloadTooLarge),
/// [`PayloadMismatch`](CodecError::PayloadMismatch) or
/// [`DuplicateParticipant`](CodecError::DuplicateParticipant) if the
/// step cannot be represented on the wire.
pub fn encode(participants: &[ParticipantStep<'_>], dest: &mut [u8]) -> Result<usize, CodecError> {
    if participants.len() > MAX_PARTICIPANTS {
        return Err(CodecError::TooManyParticipants {
            count: participants.len(),
        });
    }

    let mut seen = SeenParticipants::new();
    for p in participants {
        if p.payload.len() > MAX_PAYLOAD_OCTETS {
            return Err(CodecError::PayloadTooLarge {
                participant_id: p.participant_id,
                size: p.payload.len(),
            });
        }
        check_payload(p.participant_id, p.step_type, p.payload.len())?;
        seen.insert(p.participant_id)?;
    }

    let required = encoded_len(participants);
    if required > dest.len() {
        return Err(CodecError::BufferTooSmall {
            required,
            capacity: dest.len(),
        });
    }

    let mut w = OctetWriter::new(dest);
    w.write_u8(participants.len() as u8);
    for p in participants {
        w.write_u8(p.participant_id.0);
        w.write_u8(p.step_type.octet());
        w.write_u16_le(p.payload.len() as u16);
        w.write_bytes(p.payload);
    }
    debug_assert_eq!(w.pos, required);
    Ok(required)
}

/// Read only the participant count from a combined step header.
///
/// Lets a consumer reject an oversized step before decoding its body.
pub fn participant_count(bytes: &[u8]) -> Result<usize, CodecError> {
    OctetReader::new(bytes).read_u8().map(usize::from)
}

/// Decode a combined step into a zero-copy view over `bytes`.
///
/// The whole record must be consumed: trailing octets are an error.
pub fn decode(bytes: &[u8]) -> Result<CombinedStep<'_>, CodecError> {
    let mut r = OctetReader::new(bytes);
    let count = r.read_u8()? as usize;

    let mut step = CombinedStep::default();
    step.participants.reserve(count);
    let mut seen = SeenParticipants::new();

    for _ in 0..count {
        let participant_id = ParticipantId(r.read_u8()?);
        let octet = r.read_u8()?;
        let len = r.read_u16_le()? as usize;
        let payload = r.read_bytes(len)?;

        let step_type = StepType::from_octet(octet).ok_or(CodecError::UnknownStepType {
            participant_id,
            octet,
        })?;
        check_payload(participant_id, step_type, len)?;
        seen.insert(participant_id)?;

        step.participants
            .push(ParticipantStep::new(participant_id, step_type, payload));
    }

    if r.remaining() > 0 {
        return Err(CodecError::TrailingOctets {
            count: r.remaining(),
        });
    }

    Ok(step)
}
