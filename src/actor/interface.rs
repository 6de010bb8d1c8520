//! Interface: renders display messages as console lines.
//!
//! This actor owns nothing but a clone of the shared [`Console`]. It
//! receives display commands from the terminal and writes the matching
//! text under the console's output lock.

use super::messages::{
    AtmMessage, DisplayBalance, DisplayEnterCard, DisplayEnterPin, DisplayInsufficientFunds,
    DisplayPinIncorrectMessage, DisplayWithdrawalCancelled, DisplayWithdrawalOptions, EjectCard,
    IssueMoney,
};
use super::Actor;
use crate::config::TerminalConfig;
use crate::console::Console;
use crate::error::Result;
use crate::messaging::{Dispatch, Receiver, Sender};

/// The user-interface actor.
pub struct Interface {
    incoming: Receiver<AtmMessage>,
    console: Console,
    /// Amount offered in the withdrawal menu.
    quick_withdrawal: u32,
}

impl Interface {
    /// Create an interface printing to `console`.
    pub fn new(console: Console, config: &TerminalConfig) -> Self {
        Self {
            incoming: Receiver::new(),
            console,
            quick_withdrawal: config.quick_withdrawal,
        }
    }

    /// Render one display command.
    pub fn step(&mut self) -> Result<Dispatch> {
        self.incoming
            .wait()
            .handle(|ui: &mut Self, msg: IssueMoney| {
                ui.show(&[format!("Issuing {}", msg.amount).as_str()])
            })
            .handle(|ui: &mut Self, _: DisplayInsufficientFunds| ui.show(&["Insufficient funds"]))
            .handle(|ui: &mut Self, _: DisplayEnterPin| ui.show(&["Please enter your PIN(0-9)"]))
            .handle(|ui: &mut Self, _: DisplayEnterCard| ui.show(&["Please enter your card(I)"]))
            .handle(|ui: &mut Self, msg: DisplayBalance| {
                ui.show(&[format!("The balance of your account is {}", msg.amount).as_str()])
            })
            .handle(|ui: &mut Self, _: DisplayWithdrawalOptions| {
                let withdraw = format!("Withdraw {}? (w)", ui.quick_withdrawal);
                ui.show(&[withdraw.as_str(), "Display Balance? (b)", "Cancel? (c)"])
            })
            .handle(|ui: &mut Self, _: DisplayWithdrawalCancelled| {
                ui.show(&["Withdraw cancelled"])
            })
            .handle(|ui: &mut Self, _: DisplayPinIncorrectMessage| ui.show(&["PIN incorrect"]))
            .handle(|ui: &mut Self, _: EjectCard| ui.show(&["Ejecting card"]))
            .resolve(self)
    }

    fn show(&self, lines: &[&str]) -> Result<()> {
        self.console.write_lines(lines)?;
        Ok(())
    }
}

impl Actor for Interface {
    const NAME: &'static str = "interface";

    fn sender(&self) -> Sender<AtmMessage> {
        self.incoming.as_sender()
    }

    fn run(&mut self) -> Result<()> {
        loop {
            if self.step()?.is_terminate() {
                return Ok(());
            }
        }
    }
}
