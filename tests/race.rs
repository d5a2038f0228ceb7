use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use first_settled::prelude::*;
use first_settled::tuple::Winner2;
use first_settled::Operation;
use futures_lite::future::{block_on, poll_once};
use futures_time::task::sleep;
use futures_time::time::Duration;

struct TriggerCell<T> {
    value: Option<T>,
    waker: Option<Waker>,
}

/// Settles its paired [`Fired`] future on demand, letting tests step through
/// settlement order by hand.
struct Trigger<T> {
    cell: Rc<RefCell<TriggerCell<T>>>,
}

impl<T> Trigger<T> {
    fn fire(&self, value: T) {
        let mut cell = self.cell.borrow_mut();
        cell.value = Some(value);
        if let Some(waker) = cell.waker.take() {
            waker.wake();
        }
    }
}

struct Fired<T> {
    cell: Rc<RefCell<TriggerCell<T>>>,
}

impl<T> Future for Fired<T> {
    type Output = T;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let mut cell = self.cell.borrow_mut();
        match cell.value.take() {
            Some(value) => Poll::Ready(value),
            None => {
                cell.waker = Some(cx.waker().clone());
                Poll::Pending
            }
        }
    }
}

fn trigger<T>() -> (Trigger<T>, Fired<T>) {
    let cell = Rc::new(RefCell::new(TriggerCell {
        value: None,
        waker: None,
    }));
    (
        Trigger { cell: cell.clone() },
        Fired { cell },
    )
}

fn erased(fut: impl Future<Output = u32> + 'static) -> Operation<Pin<Box<dyn Future<Output = u32>>>> {
    Operation::new(Box::pin(fut) as Pin<Box<dyn Future<Output = u32>>>)
}

#[test]
fn fast_number_beats_slow_string() {
    block_on(async {
        let a = Operation::new(async {
            sleep(Duration::from_millis(100)).await;
            "slow"
        });
        let b = Operation::new(async {
            sleep(Duration::from_millis(10)).await;
            42
        });

        let winner = (a.clone(), b.clone()).race().await;
        assert_eq!(winner.index(), 1);
        match winner {
            Winner2::B(op) => assert_eq!(op.await, 42),
            Winner2::A(_) => panic!("the slow operation cannot win"),
        }

        // The loser was not cancelled; it settles on its own and yields its
        // own value to anyone still observing it.
        assert_eq!(a.await, "slow");
    });
}

#[test]
fn early_failure_beats_late_success() {
    block_on(async {
        let a = Operation::new(async {
            sleep(Duration::from_millis(5)).await;
            Err::<bool, String>("boom".to_string())
        });
        let b = Operation::new(async {
            sleep(Duration::from_millis(100)).await;
            Ok::<bool, String>(true)
        });

        let winner = (a, b).race().await;
        assert_eq!(winner.index(), 0);
        match winner {
            Winner2::A(op) => assert_eq!(op.await, Err("boom".to_string())),
            Winner2::B(_) => panic!("the late success cannot win"),
        }
    });
}

#[test]
fn zero_delay_wins_regardless_of_position() {
    block_on(async {
        let winner = (
            Operation::new(std::future::pending::<u8>()),
            Operation::new(std::future::ready("instant")),
        )
            .race()
            .await;
        assert_eq!(winner.index(), 1);

        let winner = (
            Operation::new(std::future::ready("instant")),
            Operation::new(std::future::pending::<u8>()),
        )
            .race()
            .await;
        assert_eq!(winner.index(), 0);
    });
}

#[test]
fn idempotent_once_settled() {
    block_on(async {
        let a = Operation::new(std::future::ready("a"));
        let b = Operation::new(std::future::ready("b"));

        // Settle in reverse positional order.
        b.settled().await;
        a.settled().await;

        for _ in 0..10 {
            let winner = [a.clone(), b.clone()].race().await;
            assert_eq!(winner.index(), 1, "the first settler wins every rerun");
        }
    });
}

#[test]
fn later_settlements_do_not_change_the_outcome() {
    block_on(async {
        let (ta, fa) = trigger::<u32>();
        let (tb, fb) = trigger::<u32>();
        let a = Operation::new(fa);
        let b = Operation::new(fb);

        let mut race = (a.clone(), b.clone()).race();
        assert!(poll_once(&mut race).await.is_none());

        tb.fire(7);
        let winner = poll_once(&mut race).await.expect("b has settled");
        assert_eq!(winner.index(), 1);
        match winner {
            Winner2::B(op) => assert_eq!(op.await, 7),
            Winner2::A(_) => panic!("a is still pending"),
        }

        // The other operation settles afterwards, unaffected.
        ta.fire(9);
        assert_eq!(a.await, 9);
    });
}

#[test]
fn simultaneous_readiness_breaks_ties_by_position() {
    block_on(async {
        let (ta, fa) = trigger::<u32>();
        let (tb, fb) = trigger::<u32>();
        let a = Operation::new(fa);
        let b = Operation::new(fb);

        let mut race = (a, b).race();
        assert!(poll_once(&mut race).await.is_none());

        // Both become ready between two polls of the race: they settle in
        // input order on the next poll, so the lower index wins.
        ta.fire(1);
        tb.fire(2);
        let winner = poll_once(&mut race).await.expect("both have settled");
        assert_eq!(winner.index(), 0);
    });
}

#[test]
fn winner_refers_to_an_original_input() {
    block_on(async {
        let ops = vec![
            erased(std::future::pending()),
            erased(std::future::pending()),
            erased(std::future::pending()),
            erased(std::future::ready(3)),
            erased(std::future::pending()),
        ];
        let winner = ops.clone().race().await;
        assert_eq!(winner.index(), 3);
        assert!(winner.operation().ptr_eq(&ops[3]));
        assert_eq!(winner.into_operation().await, 3);
    });
}
