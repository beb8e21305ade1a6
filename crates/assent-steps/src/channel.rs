//! Cross-thread hand-off of encoded steps.
//!
//! The step log is owned by the simulation thread. Records that arrive
//! on another thread (typically a network receiver) go through a
//! bounded channel: the receiver thread holds a cloneable
//! [`StepSender`], the simulation thread holds the [`StepInbox`] and
//! drains it into its log between frames. Neither side ever blocks.
//!
//! A step the log refuses because it is full stays at the front of the
//! inbox and is offered again on the next drain.

use assent_core::StepId;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::error::StepLogError;
use crate::log::StepLog;

/// An encoded step in transit between threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingStep {
    /// The id the record must be written under.
    pub step_id: StepId,
    /// The encoded combined step.
    pub record: Vec<u8>,
}

/// Create a bounded hand-off channel holding up to `capacity` steps.
///
/// # Panics
///
/// Panics if `capacity` is zero (a zero-capacity channel would require
/// the sender to block until the inbox is drained).
pub fn step_channel(capacity: usize) -> (StepSender, StepInbox) {
    assert!(capacity > 0, "step channel capacity must be at least 1");
    let (tx, rx) = crossbeam_channel::bounded(capacity);
    (StepSender { tx, capacity }, StepInbox { rx, held: None })
}

/// Producer side of a step hand-off channel. Cheap to clone.
#[derive(Clone, Debug)]
pub struct StepSender {
    tx: Sender<PendingStep>,
    capacity: usize,
}

impl StepSender {
    /// Queue an encoded step without blocking.
    ///
    /// # Errors
    ///
    /// [`StepLogError::Full`] if the inbox has not been drained fast
    /// enough; [`StepLogError::Disconnected`] if the inbox was dropped.
    pub fn send(&self, step_id: StepId, record: Vec<u8>) -> Result<(), StepLogError> {
        match self.tx.try_send(PendingStep { step_id, record }) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(StepLogError::Full {
                capacity: self.capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(StepLogError::Disconnected),
        }
    }
}

/// Consumer side of a step hand-off channel.
#[derive(Debug)]
pub struct StepInbox {
    rx: Receiver<PendingStep>,
    held: Option<PendingStep>,
}

impl StepInbox {
    /// The next pending step, without consuming it.
    ///
    /// Repeated calls return the same step until [`try_next()`](Self::try_next)
    /// takes it.
    pub fn peek(&mut self) -> Option<&PendingStep> {
        if self.held.is_none() {
            self.held = self.rx.try_recv().ok();
        }
        self.held.as_ref()
    }

    /// Take the next pending step, if one is waiting.
    ///
    /// Returns `None` both when the channel is empty and when every
    /// sender has been dropped.
    pub fn try_next(&mut self) -> Option<PendingStep> {
        self.held.take().or_else(|| self.rx.try_recv().ok())
    }

    /// Number of steps waiting, including one held by [`peek()`](Self::peek).
    pub fn len(&self) -> usize {
        self.rx.len() + usize::from(self.held.is_some())
    }

    /// Whether no steps are waiting.
    pub fn is_empty(&self) -> bool {
        self.held.is_none() && self.rx.is_empty()
    }

    /// Move every waiting step into `log`, in arrival order.
    ///
    /// Stops at the first write the log rejects and returns the error.
    /// On [`StepLogError::Full`] the step stays at the front of the inbox
    /// for the next drain; any other rejection drops it. Returns the
    /// number of steps written.
    pub fn drain_into<L: StepLog>(&mut self, log: &mut L) -> Result<usize, StepLogError> {
        let mut written = 0;
        while let Some(step) = self.peek() {
            match log.write(step.step_id, &step.record) {
                Ok(()) => {
                    self.held = None;
                    written += 1;
                }
                Err(err @ StepLogError::Full { .. }) => return Err(err),
                Err(err) => {
                    self.held = None;
                    return Err(err);
                }
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::StepBuffer;
    use std::thread;

    #[test]
    fn send_then_drain_preserves_order() {
        let (tx, mut inbox) = step_channel(8);
        tx.send(StepId(1), vec![1]).unwrap();
        tx.send(StepId(2), vec![2]).unwrap();
        assert_eq!(inbox.len(), 2);

        let mut log = StepBuffer::new(8, 8);
        assert_eq!(inbox.drain_into(&mut log).unwrap(), 2);
        assert!(inbox.is_empty());
        assert_eq!(log.pop(), Some(StepId(1)));
        assert_eq!(log.pop(), Some(StepId(2)));
    }

    #[test]
    fn full_channel_rejects_without_blocking() {
        let (tx, _inbox) = step_channel(1);
        tx.send(StepId(1), vec![1]).unwrap();
        assert_eq!(
            tx.send(StepId(2), vec![2]),
            Err(StepLogError::Full { capacity: 1 })
        );
    }

    #[test]
    fn dropped_inbox_disconnects_sender() {
        let (tx, inbox) = step_channel(1);
        drop(inbox);
        assert_eq!(tx.send(StepId(1), vec![1]), Err(StepLogError::Disconnected));
    }

    #[test]
    fn queued_steps_survive_dropped_senders() {
        let (tx, mut inbox) = step_channel(4);
        tx.send(StepId(1), vec![1]).unwrap();
        drop(tx);
        assert_eq!(
            inbox.try_next(),
            Some(PendingStep {
                step_id: StepId(1),
                record: vec![1]
            })
        );
        assert!(inbox.try_next().is_none());
    }

    #[test]
    fn drain_stops_at_rejected_write() {
        let (tx, mut inbox) = step_channel(8);
        tx.send(StepId(5), vec![1]).unwrap();
        tx.send(StepId(4), vec![1]).unwrap();
        tx.send(StepId(6), vec![1]).unwrap();

        let mut log = StepBuffer::new(8, 8);
        assert!(matches!(
            inbox.drain_into(&mut log),
            Err(StepLogError::OutOfOrder { .. })
        ));
        assert_eq!(log.remaining(), 1);
        assert_eq!(inbox.len(), 1);
    }

    #[test]
    fn full_log_holds_step_for_next_drain() {
        let (tx, mut inbox) = step_channel(8);
        for id in 0..4u32 {
            tx.send(StepId(id), vec![id as u8]).unwrap();
        }

        let mut log = StepBuffer::new(2, 8);
        assert_eq!(
            inbox.drain_into(&mut log),
            Err(StepLogError::Full { capacity: 2 })
        );
        assert_eq!(inbox.len(), 2);
        assert_eq!(inbox.peek().map(|p| p.step_id), Some(StepId(2)));

        log.pop();
        log.pop();
        assert_eq!(inbox.drain_into(&mut log).unwrap(), 2);
        assert!(inbox.is_empty());
        assert_eq!(log.pop(), Some(StepId(2)));
        assert_eq!(log.pop(), Some(StepId(3)));
    }

    #[test]
    fn peek_does_not_consume() {
        let (tx, mut inbox) = step_channel(4);
        tx.send(StepId(9), vec![1]).unwrap();
        assert_eq!(inbox.peek().map(|p| p.step_id), Some(StepId(9)));
        assert_eq!(inbox.peek().map(|p| p.step_id), Some(StepId(9)));
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox.try_next().map(|p| p.step_id), Some(StepId(9)));
        assert!(inbox.peek().is_none());
    }

    #[test]
    fn cross_thread_hand_off() {
        let (tx, mut inbox) = step_channel(64);
        let producer = thread::spawn(move || {
            for id in 0..32u32 {
                tx.send(StepId(id), id.to_le_bytes().to_vec()).unwrap();
            }
        });
        producer.join().unwrap();

        let mut log = StepBuffer::new(64, 8);
        assert_eq!(inbox.drain_into(&mut log).unwrap(), 32);
        for id in 0..32u32 {
            assert_eq!(log.peek().unwrap().1, &id.to_le_bytes()[..]);
            assert_eq!(log.pop(), Some(StepId(id)));
        }
    }
}
