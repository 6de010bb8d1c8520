//! Messaging: typed mailboxes and per-cycle dispatch chains.
//!
//! Every actor owns one [`Receiver`], whose [`Mailbox`] is a blocking,
//! unbounded FIFO of [`Envelope`]s. Peers hold cheap [`Sender`] handles.
//! An actor consumes one envelope at a time by building a [`Dispatcher`]
//! chain and resolving it.
//!
//! # Architecture
//!
//! ```text
//!  Sender ──push──▶ ┌─────────┐
//!  Sender ──push──▶ │ Mailbox │ ──wait_and_pop──▶ Dispatcher ──▶ handler(ctx, T)
//!  Sender ──push──▶ └─────────┘        (one envelope per resolve)
//! ```
//!
//! Message protocols are closed enums declared with [`message_set!`], which
//! ties each payload struct to its variant so that `handle::<T>` can extract
//! it without any runtime type inspection.
//!
//! ```
//! use teller::message_set;
//! use teller::messaging::{Dispatch, Receiver};
//!
//! #[derive(Debug)]
//! pub struct Ping(u32);
//! #[derive(Debug)]
//! pub struct Pong;
//!
//! message_set! {
//!     #[derive(Debug)]
//!     pub enum Wire { Ping, Pong }
//! }
//!
//! let inbox = Receiver::<Wire>::new();
//! inbox.as_sender().send(Ping(7));
//!
//! let mut seen = 0;
//! let outcome = inbox
//!     .wait()
//!     .handle(|seen: &mut u32, ping: Ping| {
//!         *seen = ping.0;
//!         Ok(())
//!     })
//!     .handle(|_: &mut u32, _: Pong| Ok(()))
//!     .resolve(&mut seen)
//!     .unwrap();
//!
//! assert_eq!(outcome, Dispatch::Handled);
//! assert_eq!(seen, 7);
//! ```

mod dispatch;
mod endpoint;
mod envelope;
mod mailbox;

pub use dispatch::{Dispatch, Dispatcher};
pub use endpoint::{Receiver, Sender};
pub use envelope::{CloseQueue, Envelope};
pub use mailbox::Mailbox;

use std::fmt;

/// A closed set of payloads that can travel through a [`Mailbox`].
pub trait Message: Send + fmt::Debug + 'static {
    /// Name of the payload type this value carries.
    fn name(&self) -> &'static str;
}

/// Type-checked extraction of one payload type out of a message set.
///
/// Implemented by [`message_set!`] for every payload struct it lists.
pub trait Payload<M>: Sized {
    /// Returns the payload if `message` carries this type, or hands the
    /// message back untouched.
    fn extract(message: M) -> Result<Self, M>;
}

/// Declares a closed message enum with one tuple variant per payload struct.
///
/// Each variant has the same name as the struct it wraps. The macro
/// implements [`Message`] for the enum, plus `From<Payload>` and
/// [`Payload`] for every listed struct.
#[macro_export]
macro_rules! message_set {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant($variant),
            )*
        }

        impl $crate::messaging::Message for $name {
            fn name(&self) -> &'static str {
                match self {
                    $( Self::$variant(_) => stringify!($variant), )*
                }
            }
        }

        $(
            impl ::core::convert::From<$variant> for $name {
                fn from(payload: $variant) -> Self {
                    Self::$variant(payload)
                }
            }

            impl $crate::messaging::Payload<$name> for $variant {
                #[allow(unreachable_patterns)]
                fn extract(message: $name) -> ::core::result::Result<Self, $name> {
                    match message {
                        $name::$variant(payload) => ::core::result::Result::Ok(payload),
                        other => ::core::result::Result::Err(other),
                    }
                }
            }
        )*
    };
}

#[cfg(test)]
pub(crate) mod testing {
    //! A small message set shared by the messaging unit tests.

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Text(pub String);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Number(pub u32);

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Flag;

    crate::message_set! {
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Sample { Text, Number, Flag }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Flag, Number, Sample, Text};
    use super::*;

    #[test]
    fn test_message_name_reports_variant() {
        assert_eq!(Sample::from(Number(3)).name(), "Number");
        assert_eq!(Sample::from(Flag).name(), "Flag");
    }

    #[test]
    fn test_extract_matching_payload() {
        let message = Sample::from(Text("hi".into()));
        assert_eq!(Text::extract(message), Ok(Text("hi".into())));
    }

    #[test]
    fn test_extract_mismatch_returns_message() {
        let message = Sample::from(Number(9));
        assert_eq!(Flag::extract(message), Err(Sample::Number(Number(9))));
    }
}
