//! AtmSystem: wires the actors together and owns their threads.
//!
//! The system creates the bank, the interface and the terminal, hands the
//! terminal the addresses of the other two, and spawns all three. Shutdown
//! stops the terminal first so nothing new reaches the bank or interface,
//! then closes and joins those.

use super::{Actor, ActorThread, Atm, AtmMessage, Bank, Interface};
use crate::config::AtmConfig;
use crate::console::Console;
use crate::error::Result;
use crate::messaging::Sender;
use tracing::{info, warn};

/// Running set of teller actors.
#[derive(Debug)]
pub struct AtmSystem {
    atm: Option<ActorThread>,
    bank: Option<ActorThread>,
    interface: Option<ActorThread>,
}

impl AtmSystem {
    /// Spawn bank, interface and terminal threads.
    ///
    /// The interface prints to `console`.
    pub fn start(config: &AtmConfig, console: Console) -> Result<Self> {
        let bank = Bank::new(&config.bank);
        let interface = Interface::new(console, &config.terminal);
        let atm = Atm::new(bank.sender(), interface.sender(), &config.terminal);

        let bank = ActorThread::spawn(bank)?;
        let interface = ActorThread::spawn(interface)?;
        let atm = ActorThread::spawn(atm)?;
        info!("teller system started");

        Ok(Self {
            atm: Some(atm),
            bank: Some(bank),
            interface: Some(interface),
        })
    }

    /// Address of the terminal; keypad messages go here.
    pub fn terminal(&self) -> Sender<AtmMessage> {
        self.atm
            .as_ref()
            .map_or_else(Sender::detached, ActorThread::sender)
    }

    /// Stop every actor and wait for their threads.
    ///
    /// Returns the first failure any actor reported.
    pub fn shutdown(mut self) -> Result<()> {
        self.stop()
    }

    fn stop(&mut self) -> Result<()> {
        let mut first = Ok(());

        if let Some(atm) = self.atm.take() {
            atm.done();
            keep_first(&mut first, atm.join());
        }
        for thread in [self.bank.take(), self.interface.take()]
            .into_iter()
            .flatten()
        {
            thread.done();
            keep_first(&mut first, thread.join());
        }

        if first.is_ok() {
            info!("teller system stopped");
        }
        first
    }
}

fn keep_first(first: &mut Result<()>, result: Result<()>) {
    if let Err(e) = result {
        if first.is_ok() {
            *first = Err(e);
        } else {
            warn!(error = %e, "further actor failure during shutdown");
        }
    }
}

impl Drop for AtmSystem {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            warn!(error = %e, "actor failure while dropping teller system");
        }
    }
}
