//! End-to-end teller sessions on real actor threads.
//!
//! Each test drives the terminal the way the keypad would and reads the
//! interface output back from an in-memory console.

use std::time::Duration;
use teller::{
    ActorThread, Atm, AtmConfig, AtmMessage, AtmSystem, BalancePressed, BankConfig, CancelPressed,
    CardInserted, Console, DigitPressed, Interface, Receiver, Sender, TerminalConfig, Transcript,
    WithdrawPressed,
};

const WAIT: Duration = Duration::from_secs(5);

const ENTER_CARD: &str = "Please enter your card(I)";
const ENTER_PIN: &str = "Please enter your PIN(0-9)";
const MENU: [&str; 3] = ["Withdraw 50? (w)", "Display Balance? (b)", "Cancel? (c)"];

/// Wait for exactly `expected` to have been printed, in order.
fn expect_lines(transcript: &Transcript, expected: &[&str]) {
    let lines = transcript.wait_for_lines(expected.len(), WAIT);
    assert_eq!(lines, expected);
}

fn enter_pin(terminal: &Sender<AtmMessage>, pin: &str) {
    for digit in pin.chars() {
        terminal.send(DigitPressed { digit });
    }
}

/// Card in, PIN typed; returns once the menu is shown.
fn sign_in(terminal: &Sender<AtmMessage>, transcript: &Transcript, before: &[&str]) -> Vec<String> {
    terminal.send(CardInserted::new("42"));
    enter_pin(terminal, "1937");

    let mut expected: Vec<&str> = before.to_vec();
    expected.extend([ENTER_PIN]);
    expected.extend(MENU);
    expect_lines(transcript, &expected);
    expected.into_iter().map(String::from).collect()
}

fn start(config: &AtmConfig) -> (AtmSystem, Transcript) {
    let (console, transcript) = Console::memory();
    let system = AtmSystem::start(config, console).unwrap();
    expect_lines(&transcript, &[ENTER_CARD]);
    (system, transcript)
}

#[test]
fn test_pin_success_shows_menu() {
    let (system, transcript) = start(&AtmConfig::default());
    let terminal = system.terminal();

    sign_in(&terminal, &transcript, &[ENTER_CARD]);

    assert!(system.shutdown().is_ok());
}

#[test]
fn test_withdrawal_approved() {
    let (system, transcript) = start(&AtmConfig::default());
    let terminal = system.terminal();

    let mut seen = sign_in(&terminal, &transcript, &[ENTER_CARD]);
    terminal.send(WithdrawPressed { amount: 50 });
    seen.extend(["Issuing 50", "Ejecting card", ENTER_CARD].map(String::from));
    let expected: Vec<&str> = seen.iter().map(String::as_str).collect();
    expect_lines(&transcript, &expected);

    // A second session sees the reduced balance.
    let mut seen = sign_in(&terminal, &transcript, &expected);
    terminal.send(BalancePressed);
    seen.push("The balance of your account is 149".to_string());
    seen.extend(MENU.map(String::from));
    let expected: Vec<&str> = seen.iter().map(String::as_str).collect();
    expect_lines(&transcript, &expected);

    assert!(system.shutdown().is_ok());
}

#[test]
fn test_withdrawal_denied() {
    let config = AtmConfig {
        terminal: TerminalConfig {
            quick_withdrawal: 250,
            ..TerminalConfig::default()
        },
        ..AtmConfig::default()
    };
    let (system, transcript) = start(&config);
    let terminal = system.terminal();

    terminal.send(CardInserted::new("42"));
    enter_pin(&terminal, "1937");
    let menu = ["Withdraw 250? (w)", "Display Balance? (b)", "Cancel? (c)"];
    let mut expected = vec![ENTER_CARD, ENTER_PIN];
    expected.extend(menu);
    expect_lines(&transcript, &expected);

    terminal.send(WithdrawPressed { amount: 250 });
    expected.extend(["Insufficient funds", "Ejecting card", ENTER_CARD]);
    expect_lines(&transcript, &expected);

    // Balance is untouched.
    terminal.send(CardInserted::new("42"));
    enter_pin(&terminal, "1937");
    expected.push(ENTER_PIN);
    expected.extend(menu);
    expect_lines(&transcript, &expected);
    terminal.send(BalancePressed);
    expected.push("The balance of your account is 199");
    expected.extend(menu);
    expect_lines(&transcript, &expected);

    assert!(system.shutdown().is_ok());
}

#[test]
fn test_cancel_while_entering_pin_never_reaches_bank() {
    let (console, transcript) = Console::memory();
    let bank: Receiver<AtmMessage> = Receiver::new();
    let interface = Interface::new(console, &TerminalConfig::default());
    let atm = Atm::new(
        bank.as_sender(),
        teller::Actor::sender(&interface),
        &TerminalConfig::default(),
    );
    let interface = ActorThread::spawn(interface).unwrap();
    let atm = ActorThread::spawn(atm).unwrap();
    let terminal = atm.sender();

    terminal.send(CardInserted::new("42"));
    terminal.send(DigitPressed { digit: '1' });
    terminal.send(DigitPressed { digit: '9' });
    terminal.send(CancelPressed);
    expect_lines(
        &transcript,
        &[ENTER_CARD, ENTER_PIN, "Ejecting card", ENTER_CARD],
    );

    atm.done();
    assert!(atm.join().is_ok());
    interface.done();
    assert!(interface.join().is_ok());
    assert!(bank.mailbox().is_empty());
}

#[test]
fn test_ignored_keys_show_prompts_again() {
    let (system, transcript) = start(&AtmConfig::default());
    let terminal = system.terminal();

    // A digit with no card in is dropped and the card prompt comes back.
    terminal.send(DigitPressed { digit: '5' });
    expect_lines(&transcript, &[ENTER_CARD, ENTER_CARD]);

    let mut seen = sign_in(&terminal, &transcript, &[ENTER_CARD, ENTER_CARD]);
    terminal.send(teller::ClearLastPressed);
    seen.extend(MENU.map(String::from));
    let expected: Vec<&str> = seen.iter().map(String::as_str).collect();
    expect_lines(&transcript, &expected);

    let mut seen: Vec<String> = expected.iter().map(|l| (*l).to_string()).collect();
    terminal.send(WithdrawPressed { amount: 50 });
    seen.extend(["Issuing 50", "Ejecting card", ENTER_CARD].map(String::from));
    let expected: Vec<&str> = seen.iter().map(String::as_str).collect();
    expect_lines(&transcript, &expected);

    assert!(system.shutdown().is_ok());
}

#[test]
fn test_wrong_pin_ejects_card() {
    let (system, transcript) = start(&AtmConfig::default());
    let terminal = system.terminal();

    terminal.send(CardInserted::new("42"));
    enter_pin(&terminal, "0000");
    expect_lines(
        &transcript,
        &[ENTER_CARD, ENTER_PIN, "PIN incorrect", "Ejecting card", ENTER_CARD],
    );

    assert!(system.shutdown().is_ok());
}

#[test]
fn test_configured_bank() {
    let config = AtmConfig {
        bank: BankConfig {
            initial_balance: 1000,
            pin: "24680".to_string(),
        },
        terminal: TerminalConfig {
            pin_length: 5,
            ..TerminalConfig::default()
        },
        ..AtmConfig::default()
    };
    let (system, transcript) = start(&config);
    let terminal = system.terminal();

    terminal.send(CardInserted::new("42"));
    enter_pin(&terminal, "24680");
    let mut expected = vec![ENTER_CARD, ENTER_PIN];
    expected.extend(MENU);
    expect_lines(&transcript, &expected);

    terminal.send(BalancePressed);
    expected.push("The balance of your account is 1000");
    expected.extend(MENU);
    expect_lines(&transcript, &expected);

    assert!(system.shutdown().is_ok());
}

#[test]
fn test_shutdown_while_idle_prints_nothing_more() {
    let (system, transcript) = start(&AtmConfig::default());
    assert!(system.shutdown().is_ok());
    assert_eq!(transcript.lines(), vec![ENTER_CARD]);
}
