//! Envelope: one queued message, or the termination sentinel.

use super::Message;

/// Payload type of the termination sentinel.
///
/// It carries no data and never reaches a typed handler. Deliver it with
/// [`Sender::close`](super::Sender::close).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CloseQueue;

/// A single entry in a [`Mailbox`](super::Mailbox).
#[derive(Debug)]
pub enum Envelope<M> {
    /// An application message.
    Message(M),
    /// The termination sentinel. Recognised by every dispatch chain.
    Close,
}

impl<M: Message> Envelope<M> {
    /// Whether this is the termination sentinel.
    #[inline]
    pub const fn is_close(&self) -> bool {
        matches!(self, Self::Close)
    }

    /// Name of the carried payload type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Message(message) => message.name(),
            Self::Close => "CloseQueue",
        }
    }

    /// Unwraps the application message, if any.
    pub fn into_message(self) -> Option<M> {
        match self {
            Self::Message(message) => Some(message),
            Self::Close => None,
        }
    }
}

impl<M> From<CloseQueue> for Envelope<M> {
    fn from(_: CloseQueue) -> Self {
        Self::Close
    }
}
