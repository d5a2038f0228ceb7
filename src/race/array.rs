use super::observer::IndexObserver;
use super::winner::Winner;
use super::Race as RaceTrait;
use crate::operation::{Operation, Settlement, Settling};

use core::array;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

impl<F: Future, const N: usize> RaceTrait for [Operation<F>; N] {
    type Output = Winner<F>;
    type Future = Race<F, N>;

    fn race(self) -> Self::Future {
        assert!(N >= 2, "racing requires at least two operations");
        let observers = array::from_fn(|index| IndexObserver::new(index, self[index].settled()));
        Race {
            observers,
            operations: self,
            done: false,
        }
    }
}

/// A future which waits for the first of an array of operations to settle.
///
/// This `struct` is created by the [`race`] method on the [`Race`] trait. See
/// its documentation for more.
///
/// [`race`]: crate::Race::race
/// [`Race`]: crate::Race
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Race<F: Future, const N: usize> {
    observers: [IndexObserver<Settling<F>>; N],
    operations: [Operation<F>; N],
    done: bool,
}

impl<F: Future, const N: usize> fmt::Debug for Race<F, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Race")
            .field("operations", &self.operations)
            .field("done", &self.done)
            .finish()
    }
}

impl<F: Future, const N: usize> Future for Race<F, N> {
    type Output = Winner<F>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        // Operation handles are address-independent, so this future is
        // `Unpin` and the observers can be pinned on the spot.
        let this = self.get_mut();
        assert!(!this.done, "futures must not be polled after completing");

        // Poll every observer each pass, keeping all pending operations
        // driven. Among those found settled, the earliest settlement wins.
        let mut winner: Option<(Settlement, usize)> = None;
        for observer in this.observers.iter_mut() {
            if let Poll::Ready((index, settlement)) = Pin::new(observer).poll(cx) {
                if winner.map_or(true, |(best, _)| settlement < best) {
                    winner = Some((settlement, index));
                }
            }
        }

        match winner {
            Some((_, index)) => {
                this.done = true;
                Poll::Ready(Winner::new(index, this.operations[index].clone()))
            }
            None => Poll::Pending,
        }
    }
}
