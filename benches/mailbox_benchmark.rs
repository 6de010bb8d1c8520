//! Mailbox benchmark: Measure queue and dispatch overhead.
//!
//! Target: < 1µs per push/pop pair, dispatch within a few handler checks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::thread;
use teller::{
    AtmMessage, BalancePressed, CancelPressed, DigitPressed, Dispatch, EjectCard, Mailbox,
    Receiver, WithdrawPressed,
};

fn mailbox_push_pop(c: &mut Criterion) {
    let mailbox: Mailbox<AtmMessage> = Mailbox::new();

    c.bench_function("mailbox_push_pop", |b| {
        b.iter(|| {
            mailbox.push(DigitPressed {
                digit: black_box('7'),
            });
            black_box(mailbox.wait_and_pop())
        });
    });
}

fn mailbox_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("mailbox_burst");

    for size in [16_usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mailbox: Mailbox<AtmMessage> = Mailbox::new();
            b.iter(|| {
                for _ in 0..size {
                    mailbox.push(EjectCard);
                }
                for _ in 0..size {
                    black_box(mailbox.wait_and_pop());
                }
            });
        });
    }

    group.finish();
}

fn mailbox_cross_thread(c: &mut Criterion) {
    c.bench_function("mailbox_cross_thread_1000", |b| {
        b.iter(|| {
            let mailbox: Mailbox<AtmMessage> = Mailbox::new();
            thread::scope(|s| {
                s.spawn(|| {
                    for _ in 0..1000 {
                        mailbox.push(EjectCard);
                    }
                });
                for _ in 0..1000 {
                    black_box(mailbox.wait_and_pop());
                }
            });
        });
    });
}

fn dispatch_chain(c: &mut Criterion) {
    let incoming: Receiver<AtmMessage> = Receiver::new();
    let sender = incoming.as_sender();
    let mut hits = 0_u64;

    // The matching handler is bound first, so it is tried last.
    c.bench_function("dispatch_last_of_four", |b| {
        b.iter(|| {
            sender.send(DigitPressed { digit: '1' });
            let outcome = incoming
                .wait()
                .handle(|n: &mut u64, _: DigitPressed| {
                    *n += 1;
                    Ok(())
                })
                .handle(|_: &mut u64, _: CancelPressed| Ok(()))
                .handle(|_: &mut u64, _: BalancePressed| Ok(()))
                .handle(|_: &mut u64, _: WithdrawPressed| Ok(()))
                .resolve(&mut hits);
            black_box(outcome)
        });
    });

    c.bench_function("dispatch_unmatched", |b| {
        b.iter(|| {
            sender.send(EjectCard);
            let outcome = incoming
                .wait()
                .handle(|_: &mut u64, _: DigitPressed| Ok(()))
                .resolve(&mut hits);
            assert!(matches!(outcome, Ok(Dispatch::Unmatched)));
        });
    });

    black_box(hits);
}

criterion_group!(
    benches,
    mailbox_push_pop,
    mailbox_burst,
    mailbox_cross_thread,
    dispatch_chain,
);
criterion_main!(benches);
