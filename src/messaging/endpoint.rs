//! Sender and Receiver: the two ends of an actor's mailbox.

use super::{Dispatcher, Envelope, Mailbox, Message};
use crossbeam_channel as channel;
use std::fmt;
use tracing::trace;

/// A copyable, possibly detached address of some [`Mailbox`].
///
/// A `Sender` never owns the mailbox it points at. Sending through a
/// detached sender, or to a mailbox whose [`Receiver`] has been dropped,
/// silently does nothing.
pub struct Sender<M> {
    target: Option<channel::Sender<Envelope<M>>>,
}

impl<M: Message> Sender<M> {
    /// A sender bound to no mailbox.
    pub const fn detached() -> Self {
        Self { target: None }
    }

    /// Whether this sender is bound to no mailbox.
    pub const fn is_detached(&self) -> bool {
        self.target.is_none()
    }

    /// Deliver `payload` to the target mailbox, if there is one.
    pub fn send<T: Into<M>>(&self, payload: T) {
        self.deliver(Envelope::Message(payload.into()));
    }

    /// Deliver the termination sentinel.
    pub fn close(&self) {
        self.deliver(Envelope::Close);
    }

    fn deliver(&self, envelope: Envelope<M>) {
        let Some(target) = &self.target else {
            trace!(message = envelope.name(), "send on detached sender dropped");
            return;
        };
        trace!(message = envelope.name(), "push");
        if let Err(channel::SendError(envelope)) = target.send(envelope) {
            trace!(message = envelope.name(), "receiver gone, message dropped");
        }
    }
}

impl<M> Clone for Sender<M> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
        }
    }
}

impl<M: Message> Default for Sender<M> {
    fn default() -> Self {
        Self::detached()
    }
}

impl<M> fmt::Debug for Sender<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sender")
            .field("detached", &self.target.is_none())
            .finish()
    }
}

/// Exclusive owner of one [`Mailbox`].
///
/// Hands out [`Sender`]s addressed to itself and starts dispatch cycles.
pub struct Receiver<M> {
    mailbox: Mailbox<M>,
}

impl<M: Message> Receiver<M> {
    /// Create a receiver with a fresh, empty mailbox.
    pub fn new() -> Self {
        Self {
            mailbox: Mailbox::new(),
        }
    }

    /// A sender addressed to this receiver's own mailbox.
    pub fn as_sender(&self) -> Sender<M> {
        Sender {
            target: Some(self.mailbox.writer()),
        }
    }

    /// Begin a dispatch cycle.
    ///
    /// Nothing is popped until [`Dispatcher::resolve`] is called.
    pub fn wait<'h, C>(&self) -> Dispatcher<'h, M, C> {
        Dispatcher::new(self.mailbox.reader())
    }

    /// The owned mailbox.
    pub const fn mailbox(&self) -> &Mailbox<M> {
        &self.mailbox
    }
}

impl<M: Message> Default for Receiver<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> fmt::Debug for Receiver<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Receiver")
            .field("mailbox", &self.mailbox)
            .finish()
    }
}

impl<M: Message> From<&Receiver<M>> for Sender<M> {
    fn from(receiver: &Receiver<M>) -> Self {
        receiver.as_sender()
    }
}
