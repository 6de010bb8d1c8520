//! # Teller
//!
//! A message-passing ATM built from thread-per-actor state machines.
//!
//! Teller is a small actor toolkit plus the teller machine that runs on
//! it. Actors share nothing; they talk through typed mailboxes and wait
//! for messages with an explicit handler chain.
//!
//! ## Core Concepts
//!
//! - **Closed message sets**: every actor family speaks one enum, declared
//!   with [`message_set!`]
//! - **Mailboxes**: unbounded FIFO queues, safe for many producers
//! - **Dispatchers**: wait for one message and run the newest handler
//!   whose type matches; unmatched messages are dropped
//! - **Termination sentinel**: [`Sender::close`] ends an actor's loop
//!   after everything queued before it
//!
//! ## Example
//!
//! ```rust,no_run
//! use teller::{AtmConfig, AtmSystem, CardInserted, Console, DigitPressed};
//!
//! let system = AtmSystem::start(&AtmConfig::default(), Console::stdout())?;
//! let terminal = system.terminal();
//! terminal.send(CardInserted::new("acc1234"));
//! for digit in "1937".chars() {
//!     terminal.send(DigitPressed { digit });
//! }
//! system.shutdown()?;
//! # Ok::<(), teller::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod config;
pub mod console;
pub mod error;
pub mod messaging;

// Re-exports for convenience
pub use actor::*;
pub use config::{AtmConfig, BankConfig, LoggingConfig, TerminalConfig};
pub use console::{Console, Transcript};
pub use error::{Error, Result};
pub use messaging::{
    CloseQueue, Dispatch, Dispatcher, Envelope, Mailbox, Message, Payload, Receiver, Sender,
};
