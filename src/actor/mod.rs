//! Actor Model: thread-per-actor state machines for the teller.
//!
//! Each actor owns one [`Receiver`](crate::messaging::Receiver) and runs on
//! a dedicated thread. Actors only know each other through
//! [`Sender`](crate::messaging::Sender) handles:
//! - **Atm**: the terminal state machine, driven by keypad messages
//! - **Bank**: verifies PINs and keeps the balance
//! - **Interface**: renders display messages to the shared console
//! - **Keypad**: turns terminal key presses into terminal messages
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  CardInserted, DigitPressed  ┌──────────────┐
//! │ Keypad Thread│ ───────────────────────────▶ │              │
//! └──────────────┘                              │  Atm Thread  │
//!                                               │              │
//! ┌──────────────┐  VerifyPin, Withdraw, ...    │              │
//! │ Bank Thread  │ ◀─────────────────────────── │              │
//! │              │ ───────────────────────────▶ │              │
//! └──────────────┘  PinVerified, WithdrawOk     └──────────────┘
//!                                                      │
//!                                                      │ Display*, IssueMoney
//!                                                      ▼
//!                                               ┌──────────────┐
//!                                               │  Interface   │ ──▶ Console
//!                                               └──────────────┘
//! ```

mod atm;
mod bank;
mod interface;
mod keypad;
mod messages;
mod system;

pub use atm::{Atm, AtmState};
pub use bank::Bank;
pub use interface::Interface;
pub use keypad::{KeyAction, Keypad, KeypadActor};
pub use messages::*;
pub use system::AtmSystem;

use crate::error::{Error, Result};
use crate::messaging::Sender;
use std::thread::{self, JoinHandle};
use tracing::{error, info};

/// An actor that can be driven on its own thread.
pub trait Actor: Send + 'static {
    /// Short name, used for the thread name and in logs.
    const NAME: &'static str;

    /// Address of this actor's mailbox.
    fn sender(&self) -> Sender<AtmMessage>;

    /// Process messages until the termination sentinel arrives.
    fn run(&mut self) -> Result<()>;

    /// Ask the actor to stop after the messages already queued.
    fn done(&self) {
        self.sender().close();
    }
}

/// Handle to an actor running on its own thread.
pub struct ActorThread {
    name: &'static str,
    sender: Sender<AtmMessage>,
    handle: Option<JoinHandle<Result<()>>>,
}

impl ActorThread {
    /// Spawn `actor` on a new named thread.
    ///
    /// A failure returned from [`Actor::run`] is logged on that thread and
    /// ends it; peers are not told.
    pub fn spawn<A: Actor>(mut actor: A) -> Result<Self> {
        let sender = actor.sender();
        let handle = thread::Builder::new()
            .name(format!("teller-{}", A::NAME))
            .spawn(move || {
                info!(actor = A::NAME, "started");
                let result = actor.run();
                match &result {
                    Ok(()) => info!(actor = A::NAME, "stopped"),
                    Err(e) => error!(actor = A::NAME, error = %e, "actor failed"),
                }
                result
            })
            .map_err(|source| Error::Spawn {
                actor: A::NAME,
                source,
            })?;

        Ok(Self {
            name: A::NAME,
            sender,
            handle: Some(handle),
        })
    }

    /// Address of the actor's mailbox.
    pub fn sender(&self) -> Sender<AtmMessage> {
        self.sender.clone()
    }

    /// Send the termination sentinel.
    pub fn done(&self) {
        self.sender.close();
    }

    /// Whether the thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the thread to exit and return what `run` returned.
    pub fn join(mut self) -> Result<()> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| Error::ActorPanicked(self.name))?,
            None => Ok(()),
        }
    }
}

impl Drop for ActorThread {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.done();
        }
    }
}

impl std::fmt::Debug for ActorThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorThread")
            .field("name", &self.name)
            .field("finished", &self.is_finished())
            .finish()
    }
}
