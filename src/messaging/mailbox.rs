//! Mailbox: the blocking FIFO behind every [`Receiver`](super::Receiver).

use super::{Envelope, Message};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::trace;

/// Unbounded, blocking FIFO of [`Envelope`]s.
///
/// Any number of threads may push concurrently; pushes from one thread
/// are popped in the order they were made. There is no capacity limit,
/// so a consumer that falls behind lets the queue grow without bound.
pub struct Mailbox<M> {
    /// Producer side, cloned into every [`Sender`](super::Sender).
    tx: Sender<Envelope<M>>,
    /// Consumer side.
    rx: Receiver<Envelope<M>>,
}

impl<M: Message> Mailbox<M> {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Wrap `payload` in an envelope and append it. Never blocks.
    pub fn push<T: Into<M>>(&self, payload: T) {
        self.deliver(Envelope::Message(payload.into()));
    }

    /// Append a ready-made envelope, waking one blocked waiter.
    pub fn deliver(&self, envelope: Envelope<M>) {
        trace!(message = envelope.name(), "push");
        // `self.rx` lives as long as `self`, so the channel is connected.
        let _ = self.tx.send(envelope);
    }

    /// Block until an envelope is available, then remove and return it.
    ///
    /// There is no timeout: the calling thread sleeps until some sender
    /// pushes.
    pub fn wait_and_pop(&self) -> Envelope<M> {
        Self::pop_from(&self.rx)
    }

    /// Remove the head envelope without blocking.
    pub fn try_pop(&self) -> Option<Envelope<M>> {
        let envelope = self.rx.try_recv().ok()?;
        trace!(message = envelope.name(), "pop");
        Some(envelope)
    }

    /// Number of queued envelopes.
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Whether nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    pub(crate) fn writer(&self) -> Sender<Envelope<M>> {
        self.tx.clone()
    }

    pub(crate) fn reader(&self) -> Receiver<Envelope<M>> {
        self.rx.clone()
    }

    /// Blocking pop shared with [`Dispatcher`](super::Dispatcher).
    pub(crate) fn pop_from(rx: &Receiver<Envelope<M>>) -> Envelope<M> {
        // A disconnect means the owning mailbox is gone; nothing can
        // arrive any more, so treat it as the termination sentinel.
        let envelope = rx.recv().unwrap_or(Envelope::Close);
        trace!(message = envelope.name(), "pop");
        envelope
    }
}

impl<M: Message> Default for Mailbox<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> std::fmt::Debug for Mailbox<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailbox")
            .field("queued", &self.rx.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messaging::testing::{Number, Sample, Text};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn number(envelope: Envelope<Sample>) -> u32 {
        match envelope.into_message() {
            Some(Sample::Number(Number(n))) => n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn test_fifo_single_producer() {
        let mailbox = Mailbox::<Sample>::new();
        mailbox.push(Number(1));
        mailbox.push(Number(2));
        mailbox.push(Number(3));

        assert_eq!(mailbox.len(), 3);
        assert_eq!(number(mailbox.wait_and_pop()), 1);
        assert_eq!(number(mailbox.wait_and_pop()), 2);
        assert_eq!(number(mailbox.wait_and_pop()), 3);
        assert!(mailbox.is_empty());
    }

    #[test]
    fn test_try_pop_empty() {
        let mailbox = Mailbox::<Sample>::new();
        assert!(mailbox.try_pop().is_none());

        mailbox.push(Text("x".into()));
        assert!(mailbox.try_pop().is_some());
        assert!(mailbox.try_pop().is_none());
    }

    #[test]
    fn test_wait_blocks_until_push() {
        let mailbox = Arc::new(Mailbox::<Sample>::new());
        let producer = Arc::clone(&mailbox);

        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            producer.push(Number(42));
        });

        assert_eq!(number(mailbox.wait_and_pop()), 42);
        handle.join().unwrap();
    }

    #[test]
    fn test_concurrent_producers_keep_relative_order() {
        const PRODUCERS: u32 = 8;
        const PER_PRODUCER: u32 = 500;

        let mailbox = Arc::new(Mailbox::<Sample>::new());
        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let mailbox = Arc::clone(&mailbox);
                thread::spawn(move || {
                    for seq in 0..PER_PRODUCER {
                        mailbox.push(Number(producer * PER_PRODUCER + seq));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut last_seen = vec![None::<u32>; PRODUCERS as usize];
        let mut total = 0;
        while let Some(envelope) = mailbox.try_pop() {
            let value = number(envelope);
            let producer = (value / PER_PRODUCER) as usize;
            let seq = value % PER_PRODUCER;
            if let Some(previous) = last_seen[producer] {
                assert!(seq > previous, "producer {producer} reordered");
            }
            last_seen[producer] = Some(seq);
            total += 1;
        }

        assert_eq!(total, PRODUCERS * PER_PRODUCER);
        assert!(last_seen.iter().all(|seq| *seq == Some(PER_PRODUCER - 1)));
    }

    #[test]
    fn test_deliver_close() {
        let mailbox = Mailbox::<Sample>::new();
        mailbox.deliver(Envelope::Close);
        assert!(mailbox.wait_and_pop().is_close());
    }
}
