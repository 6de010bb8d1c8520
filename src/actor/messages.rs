//! Message types for actor communication.
//!
//! These structs define the protocol between the terminal, the bank and
//! the interface. All of them travel in one closed [`AtmMessage`] set, so
//! any actor may be addressed with any of them; each actor only binds the
//! ones legal in its current state.

use crate::message_set;
use crate::messaging::Sender;

/// Return address embedded in requests to the bank.
pub type ReplyTo = Sender<AtmMessage>;

// Keypad → terminal

/// A card was inserted for `account`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardInserted {
    /// Account number read from the card.
    pub account: String,
}

/// A digit key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitPressed {
    /// The digit character, `'0'..='9'`.
    pub digit: char,
}

/// The "clear last digit" key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearLastPressed;

/// The cancel key was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelPressed;

/// A withdrawal of `amount` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawPressed {
    /// Amount to withdraw.
    pub amount: u32,
}

/// A balance enquiry was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalancePressed;

// Bank → terminal

/// The withdrawal was approved and debited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawOk;

/// The withdrawal was refused for insufficient funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WithdrawDenied;

/// Current balance, in reply to [`GetBalance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    /// Balance after all processed withdrawals.
    pub amount: u32,
}

/// The PIN matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinVerified;

/// The PIN did not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinIncorrect;

// Terminal → bank

/// Check `pin` for `account`; reply with [`PinVerified`] or [`PinIncorrect`].
#[derive(Debug, Clone)]
pub struct VerifyPin {
    /// Account being accessed.
    pub account: String,
    /// Digits collected from the keypad.
    pub pin: String,
    /// Where to send the verdict.
    pub reply_to: ReplyTo,
}

/// Debit `amount`; reply with [`WithdrawOk`] or [`WithdrawDenied`].
#[derive(Debug, Clone)]
pub struct Withdraw {
    /// Account to debit.
    pub account: String,
    /// Amount requested.
    pub amount: u32,
    /// Where to send the verdict.
    pub reply_to: ReplyTo,
}

/// The customer cancelled a withdrawal that may already have been approved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelWithdrawal {
    /// Account of the cancelled withdrawal.
    pub account: String,
    /// Amount of the cancelled withdrawal.
    pub amount: u32,
}

/// Ask for the balance of `account`; reply with [`Balance`].
#[derive(Debug, Clone)]
pub struct GetBalance {
    /// Account being queried.
    pub account: String,
    /// Where to send the balance.
    pub reply_to: ReplyTo,
}

// Terminal → interface

/// Dispense `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IssueMoney {
    /// Amount dispensed.
    pub amount: u32,
}

/// Prompt for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEnterCard;

/// Prompt for PIN digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEnterPin;

/// Report a refused withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayInsufficientFunds;

/// Show the action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWithdrawalOptions;

/// Confirm a cancelled withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWithdrawalCancelled;

/// Report a wrong PIN.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPinIncorrectMessage;

/// Show the account balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayBalance {
    /// Balance to show.
    pub amount: u32,
}

/// Return the card to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EjectCard;

message_set! {
    /// Every message exchanged between the teller actors.
    #[derive(Debug, Clone)]
    pub enum AtmMessage {
        /// See [`CardInserted`].
        CardInserted,
        /// See [`DigitPressed`].
        DigitPressed,
        /// See [`ClearLastPressed`].
        ClearLastPressed,
        /// See [`CancelPressed`].
        CancelPressed,
        /// See [`WithdrawPressed`].
        WithdrawPressed,
        /// See [`BalancePressed`].
        BalancePressed,
        /// See [`WithdrawOk`].
        WithdrawOk,
        /// See [`WithdrawDenied`].
        WithdrawDenied,
        /// See [`Balance`].
        Balance,
        /// See [`PinVerified`].
        PinVerified,
        /// See [`PinIncorrect`].
        PinIncorrect,
        /// See [`VerifyPin`].
        VerifyPin,
        /// See [`Withdraw`].
        Withdraw,
        /// See [`CancelWithdrawal`].
        CancelWithdrawal,
        /// See [`GetBalance`].
        GetBalance,
        /// See [`IssueMoney`].
        IssueMoney,
        /// See [`DisplayEnterCard`].
        DisplayEnterCard,
        /// See [`DisplayEnterPin`].
        DisplayEnterPin,
        /// See [`DisplayInsufficientFunds`].
        DisplayInsufficientFunds,
        /// See [`DisplayWithdrawalOptions`].
        DisplayWithdrawalOptions,
        /// See [`DisplayWithdrawalCancelled`].
        DisplayWithdrawalCancelled,
        /// See [`DisplayPinIncorrectMessage`].
        DisplayPinIncorrectMessage,
        /// See [`DisplayBalance`].
        DisplayBalance,
        /// See [`EjectCard`].
        EjectCard,
    }
}

impl CardInserted {
    /// Card for `account`.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
        }
    }
}
