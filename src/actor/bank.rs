//! Bank: verifies PINs and owns the balance.
//!
//! A single-state reactive loop. Every request carries the address to
//! reply to, so the bank never needs to know who its clients are.

use super::messages::{
    AtmMessage, Balance, CancelWithdrawal, GetBalance, PinIncorrect, PinVerified, VerifyPin,
    Withdraw, WithdrawDenied, WithdrawOk,
};
use super::Actor;
use crate::config::BankConfig;
use crate::error::Result;
use crate::messaging::{Dispatch, Receiver, Sender};
use std::collections::HashMap;
use tracing::{debug, trace};

/// The bank actor.
pub struct Bank {
    incoming: Receiver<AtmMessage>,
    balance: u32,
    pin: String,
    /// Last approved withdrawal per account, refundable until the next
    /// PIN verification for that account.
    approved: HashMap<String, u32>,
}

impl Bank {
    /// Create a bank holding `config.initial_balance`.
    pub fn new(config: &BankConfig) -> Self {
        Self {
            incoming: Receiver::new(),
            balance: config.initial_balance,
            pin: config.pin.clone(),
            approved: HashMap::new(),
        }
    }

    /// Current balance.
    pub const fn balance(&self) -> u32 {
        self.balance
    }

    /// Handle one request.
    pub fn step(&mut self) -> Result<Dispatch> {
        let outcome = self
            .incoming
            .wait()
            .handle(|bank: &mut Self, msg: VerifyPin| {
                bank.approved.remove(&msg.account);
                if msg.pin == bank.pin {
                    debug!(account = %msg.account, "pin verified");
                    msg.reply_to.send(PinVerified);
                } else {
                    debug!(account = %msg.account, "pin incorrect");
                    msg.reply_to.send(PinIncorrect);
                }
                Ok(())
            })
            .handle(|bank: &mut Self, msg: Withdraw| {
                if bank.balance >= msg.amount {
                    bank.balance -= msg.amount;
                    bank.approved.insert(msg.account.clone(), msg.amount);
                    debug!(account = %msg.account, amount = msg.amount, balance = bank.balance, "withdrawal approved");
                    msg.reply_to.send(WithdrawOk);
                } else {
                    debug!(account = %msg.account, amount = msg.amount, balance = bank.balance, "withdrawal denied");
                    msg.reply_to.send(WithdrawDenied);
                }
                Ok(())
            })
            .handle(|bank: &mut Self, msg: GetBalance| {
                msg.reply_to.send(Balance {
                    amount: bank.balance,
                });
                Ok(())
            })
            .handle(|bank: &mut Self, msg: CancelWithdrawal| {
                if bank.approved.get(&msg.account) == Some(&msg.amount) {
                    bank.approved.remove(&msg.account);
                    bank.balance = bank.balance.saturating_add(msg.amount);
                    debug!(account = %msg.account, amount = msg.amount, "withdrawal refunded");
                }
                Ok(())
            })
            .resolve(self)?;

        if outcome == Dispatch::Unmatched {
            trace!("bank ignored message");
        }
        Ok(outcome)
    }
}

impl Actor for Bank {
    const NAME: &'static str = "bank";

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
