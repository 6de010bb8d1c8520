//! Atm: the terminal state machine.
//!
//! The terminal is driven by keypad messages, asks the bank for decisions
//! and tells the interface what to show. Every [`Atm::step`] performs the
//! work of the current [`AtmState`]: usually a single dispatch cycle whose
//! handlers pick the next state.
//!
//! ```text
//! WaitingForCard ──CardInserted──▶ GettingPin ──4 digits──▶ VerifyingPin
//!       ▲                              │                      │    │
//!       │                           Cancel            PinIncorrect PinVerified
//!       │                              ▼                      │    ▼
//! DoneProcessing ◀─────────────────────┴──────────────────────┘ WaitForAction
//!       ▲                                                        │       │
//!       └──── WithdrawOk / WithdrawDenied ── ProcessWithdrawal ◀─┘       │
//!                                            ProcessBalance ◀────────────┘
//! ```

use super::messages::{
    AtmMessage, Balance, BalancePressed, CancelPressed, CancelWithdrawal, CardInserted,
    ClearLastPressed, DigitPressed, DisplayBalance, DisplayEnterCard, DisplayEnterPin,
    DisplayInsufficientFunds, DisplayPinIncorrectMessage, DisplayWithdrawalCancelled,
    DisplayWithdrawalOptions, EjectCard, GetBalance, IssueMoney, PinIncorrect, PinVerified,
    VerifyPin, Withdraw, WithdrawDenied, WithdrawOk, WithdrawPressed,
};
use super::Actor;
use crate::config::TerminalConfig;
use crate::error::Result;
use crate::messaging::{Dispatch, Receiver, Sender};
use tracing::{debug, trace};

/// States of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AtmState {
    /// Idle, prompting for a card.
    WaitingForCard,
    /// Collecting PIN digits.
    GettingPin,
    /// Waiting for the bank's PIN verdict.
    VerifyingPin,
    /// Showing the action menu.
    WaitForAction,
    /// Waiting for the bank's withdrawal verdict.
    ProcessWithdrawal,
    /// Waiting for the bank's balance reply.
    ProcessBalance,
    /// Ejecting the card; consumes no message.
    DoneProcessing,
}

/// The terminal actor.
pub struct Atm {
    incoming: Receiver<AtmMessage>,
    bank: Sender<AtmMessage>,
    interface: Sender<AtmMessage>,
    pin_length: usize,
    state: AtmState,
    account: String,
    pin: String,
    withdrawal_amount: u32,
}

impl Atm {
    /// Create a terminal wired to its bank and interface.
    pub fn new(
        bank: Sender<AtmMessage>,
        interface: Sender<AtmMessage>,
        config: &TerminalConfig,
    ) -> Self {
        Self {
            incoming: Receiver::new(),
            bank,
            interface,
            pin_length: config.pin_length,
            state: AtmState::WaitingForCard,
            account: String::new(),
            pin: String::new(),
            withdrawal_amount: 0,
        }
    }

    /// Current state.
    pub const fn state(&self) -> AtmState {
        self.state
    }

    /// Digits collected so far for the current card.
    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// Perform one unit of work for the current state.
    ///
    /// Every state except [`AtmState::DoneProcessing`] consumes exactly one
    /// message. An [`Dispatch::Unmatched`] message leaves the state
    /// unchanged; prompting states show their prompt again on the next step.
    pub fn step(&mut self) -> Result<Dispatch> {
        let from = self.state;
        let outcome = match from {
            AtmState::WaitingForCard => self.waiting_for_card(),
            AtmState::GettingPin => self.getting_pin(),
            AtmState::VerifyingPin => self.verifying_pin(),
            AtmState::WaitForAction => self.wait_for_action(),
            AtmState::ProcessWithdrawal => self.process_withdrawal(),
            AtmState::ProcessBalance => self.process_balance(),
            AtmState::DoneProcessing => Ok(self.done_processing()),
        }?;

        match outcome {
            Dispatch::Handled if self.state != from => {
                debug!(?from, to = ?self.state, "atm transition");
            }
            Dispatch::Handled => {}
            Dispatch::Unmatched => trace!(state = ?from, "atm ignored message"),
            Dispatch::Terminate => debug!(state = ?from, "atm terminating"),
        }
        Ok(outcome)
    }

    /// Show a state's prompt; sent every time the state waits.
    fn prompt(&self, message: impl Into<AtmMessage>) {
        self.interface.send(message);
    }

    fn waiting_for_card(&mut self) -> Result<Dispatch> {
        self.prompt(DisplayEnterCard);
        self.incoming
            .wait()
            .handle(|atm: &mut Self, msg: CardInserted| {
                atm.account = msg.account;
                atm.pin.clear();
                atm.interface.send(DisplayEnterPin);
                atm.state = AtmState::GettingPin;
                Ok(())
            })
            .resolve(self)
    }

    fn getting_pin(&mut self) -> Result<Dispatch> {
        self.incoming
            .wait()
            .handle(|atm: &mut Self, msg: DigitPressed| {
                atm.pin.push(msg.digit);
                if atm.pin.len() >= atm.pin_length {
                    atm.bank.send(VerifyPin {
                        account: atm.account.clone(),
                        pin: atm.pin.clone(),
                        reply_to: atm.incoming.as_sender(),
                    });
                    atm.state = AtmState::VerifyingPin;
                }
                Ok(())
            })
            .handle(|atm: &mut Self, _: ClearLastPressed| {
                atm.pin.pop();
                Ok(())
            })
            .handle(|atm: &mut Self, _: CancelPressed| {
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .resolve(self)
    }

    fn verifying_pin(&mut self) -> Result<Dispatch> {
        self.incoming
            .wait()
            .handle(|atm: &mut Self, _: PinVerified| {
                atm.state = AtmState::WaitForAction;
                Ok(())
            })
            .handle(|atm: &mut Self, _: PinIncorrect| {
                atm.interface.send(DisplayPinIncorrectMessage);
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .handle(|atm: &mut Self, _: CancelPressed| {
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .resolve(self)
    }

    fn wait_for_action(&mut self) -> Result<Dispatch> {
        self.prompt(DisplayWithdrawalOptions);
        self.incoming
            .wait()
            .handle(|atm: &mut Self, msg: WithdrawPressed| {
                atm.withdrawal_amount = msg.amount;
                atm.bank.send(Withdraw {
                    account: atm.account.clone(),
                    amount: msg.amount,
                    reply_to: atm.incoming.as_sender(),
                });
                atm.state = AtmState::ProcessWithdrawal;
                Ok(())
            })
            .handle(|atm: &mut Self, _: BalancePressed| {
                atm.bank.send(GetBalance {
                    account: atm.account.clone(),
                    reply_to: atm.incoming.as_sender(),
                });
                atm.state = AtmState::ProcessBalance;
                Ok(())
            })
            .handle(|atm: &mut Self, _: CancelPressed| {
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .resolve(self)
    }

    fn process_withdrawal(&mut self) -> Result<Dispatch> {
        self.incoming
            .wait()
            .handle(|atm: &mut Self, _: WithdrawOk| {
                atm.interface.send(IssueMoney {
                    amount: atm.withdrawal_amount,
                });
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .handle(|atm: &mut Self, _: WithdrawDenied| {
                atm.interface.send(DisplayInsufficientFunds);
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .handle(|atm: &mut Self, _: CancelPressed| {
                atm.bank.send(CancelWithdrawal {
                    account: atm.account.clone(),
                    amount: atm.withdrawal_amount,
                });
                atm.interface.send(DisplayWithdrawalCancelled);
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .resolve(self)
    }

    fn process_balance(&mut self) -> Result<Dispatch> {
        self.incoming
            .wait()
            .handle(|atm: &mut Self, msg: Balance| {
                atm.interface.send(DisplayBalance { amount: msg.amount });
                atm.state = AtmState::WaitForAction;
                Ok(())
            })
            .handle(|atm: &mut Self, _: CancelPressed| {
                atm.state = AtmState::DoneProcessing;
                Ok(())
            })
            .resolve(self)
    }

    fn done_processing(&mut self) -> Dispatch {
        self.interface.send(EjectCard);
        self.state = AtmState::WaitingForCard;
        Dispatch::Handled
    }
}

impl Actor for Atm {
    const NAME: &'static str = "atm";

    fn sender(&self) -> Sender<AtmMessage> {
        self.incoming.as_sender()
    }

    fn run(&mut self) -> Result<()> {
        self.state = AtmState::WaitingForCard;
        loop {
            if self.step()?.is_terminate() {
                return Ok(());
            }
        }
    }
}
