//! Dispatch chains: one blocking pop, matched against typed handlers.
//!
//! A [`Dispatcher`] is built per cycle with [`Receiver::wait`]. Each call to
//! [`Dispatcher::handle`] moves the builder and returns it with one more
//! `(payload type, handler)` binding. Nothing touches the mailbox until
//! [`Dispatcher::resolve`], which pops exactly one envelope and reports a
//! [`Dispatch`]:
//!
//! - the termination sentinel always yields [`Dispatch::Terminate`], before
//!   any binding is consulted;
//! - otherwise bindings are tried from the most recently added back to the
//!   first, and the first whose payload type matches runs;
//! - a message no binding accepts is discarded as [`Dispatch::Unmatched`].
//!
//! [`Receiver::wait`]: super::Receiver::wait

use super::{Envelope, Mailbox, Message, Payload};
use crate::error::Result;
use crossbeam_channel::Receiver;
use std::fmt;
use tracing::trace;

/// Outcome of resolving one dispatch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// A handler accepted the message and returned `Ok`.
    Handled,
    /// No binding accepted the message; it was dropped.
    Unmatched,
    /// The termination sentinel arrived.
    Terminate,
}

impl Dispatch {
    /// Whether the owning actor loop should exit.
    pub const fn is_terminate(self) -> bool {
        matches!(self, Self::Terminate)
    }
}

/// Result of offering a message to one binding.
enum Attempt<M> {
    Ran(Result<()>),
    Declined(M),
}

type Binding<'h, M, C> = Box<dyn FnOnce(&mut C, M) -> Attempt<M> + 'h>;

/// Builder for a single dispatch cycle.
///
/// `C` is the context handed to whichever handler wins, normally the actor
/// itself.
#[must_use = "a dispatcher pops nothing until `resolve` is called"]
pub struct Dispatcher<'h, M, C> {
    source: Receiver<Envelope<M>>,
    bindings: Vec<(&'static str, Binding<'h, M, C>)>,
}

impl<'h, M: Message, C> Dispatcher<'h, M, C> {
    pub(crate) const fn new(source: Receiver<Envelope<M>>) -> Self {
        Self {
            source,
            bindings: Vec::new(),
        }
    }

    /// Bind `handler` to payload type `T`.
    pub fn handle<T, F>(mut self, handler: F) -> Self
    where
        T: Payload<M> + 'h,
        C: 'h,
        F: FnOnce(&mut C, T) -> Result<()> + 'h,
    {
        let binding: Binding<'h, M, C> =
            Box::new(move |ctx: &mut C, message: M| match T::extract(message) {
                Ok(payload) => Attempt::Ran(handler(ctx, payload)),
                Err(message) => Attempt::Declined(message),
            });
        self.bindings.push((std::any::type_name::<T>(), binding));
        self
    }

    /// Number of bindings in the chain.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the chain has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Block for one envelope and dispatch it.
    ///
    /// Handler errors are returned as `Err`; the envelope is consumed either
    /// way.
    pub fn resolve(self, ctx: &mut C) -> Result<Dispatch> {
        let envelope = Mailbox::pop_from(&self.source);
        self.dispatch(envelope, ctx)
    }

    /// Like [`resolve`](Self::resolve), but returns `None` instead of
    /// blocking when the mailbox is empty.
    pub fn try_resolve(self, ctx: &mut C) -> Result<Option<Dispatch>> {
        let Ok(envelope) = self.source.try_recv() else {
            return Ok(None);
        };
        trace!(message = envelope.name(), "pop");
        self.dispatch(envelope, ctx).map(Some)
    }

    fn dispatch(self, envelope: Envelope<M>, ctx: &mut C) -> Result<Dispatch> {
        let mut message = match envelope {
            Envelope::Message(message) => message,
            Envelope::Close => {
                trace!("termination sentinel received");
                return Ok(Dispatch::Terminate);
            }
        };

        for (_, binding) in self.bindings.into_iter().rev() {
            match binding(&mut *ctx, message) {
                Attempt::Ran(result) => return result.map(|()| Dispatch::Handled),
                Attempt::Declined(returned) => message = returned,
            }
        }

        trace!(message = message.name(), "no handler bound, discarded");
        Ok(Dispatch::Unmatched)
    }
}

impl<M, C> fmt::Debug for Dispatcher<'_, M, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field(
                "bindings",
                &self.bindings.iter().map(|(name, _)| *name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
