use core::fmt;
use core::future::{Future, IntoFuture};
use core::pin::Pin;
use core::task::{ready, Context, Poll, Waker};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::task::Wake;

use smallvec::SmallVec;

/// Process-wide settlement counter. Stamps are unique, so two operations can
/// never settle "at the same time" as far as this crate is concerned.
static SETTLEMENT_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A token recording when an operation settled, relative to every other
/// operation in the process.
///
/// Tokens are unique and totally ordered: an operation which settled earlier
/// compares as less than one which settled later.
///
/// # Examples
///
/// ```rust
/// use first_settled::Operation;
/// use futures_lite::future::block_on;
/// use std::future;
///
/// block_on(async {
///     let a = Operation::new(future::ready(1));
///     let b = Operation::new(future::ready(2));
///     b.clone().await;
///     a.clone().await;
///     assert!(b.settlement().unwrap() < a.settlement().unwrap());
/// })
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Settlement(u64);

impl Settlement {
    fn next() -> Self {
        Self(SETTLEMENT_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// The wakers of every observer currently waiting on an operation.
///
/// This doubles as the waker handed to the underlying future: when the future
/// signals progress it cannot know which observer will pick the work back up,
/// so all of them are woken.
struct ObserverSet {
    wakers: Mutex<SmallVec<[Waker; 2]>>,
}

impl ObserverSet {
    fn new() -> Self {
        Self {
            wakers: Mutex::new(SmallVec::new()),
        }
    }

    fn register(&self, waker: &Waker) {
        let mut wakers = self.wakers.lock().unwrap();
        if !wakers.iter().any(|w| w.will_wake(waker)) {
            wakers.push(waker.clone());
        }
    }

    fn wake_all(&self) {
        // Swap the list out first; `wake` may grab arbitrary executor locks.
        let wakers = std::mem::take(&mut *self.wakers.lock().unwrap());
        for waker in wakers {
            waker.wake();
        }
    }
}

impl Wake for ObserverSet {
    fn wake(self: Arc<Self>) {
        self.wake_all();
    }

    fn wake_by_ref(self: &Arc<Self>) {
        self.wake_all();
    }
}

enum State<F: Future> {
    Pending(Pin<Box<F>>),
    Settled {
        output: F::Output,
        settlement: Settlement,
    },
}

struct Shared<F: Future> {
    state: Mutex<State<F>>,
    observers: Arc<ObserverSet>,
}

/// A shareable handle to an asynchronous operation which settles exactly once.
///
/// Cloning the handle does not clone the computation: all clones refer to the
/// same underlying operation, and the operation makes progress whenever *any*
/// of its handles is polled. Once the operation settles, every observer —
/// current and future — receives a clone of the same output, be it a value or
/// a `Result::Err`.
///
/// This is the input type of the [`Race`][crate::Race] trait: races operate on
/// handles so they can report *which* operation settled first and hand the
/// winning handle back, rather than racing values directly and losing track
/// of who produced them.
///
/// # Examples
///
/// ```rust
/// use first_settled::Operation;
/// use futures_lite::future::block_on;
///
/// block_on(async {
///     let op = Operation::new(async { 1 + 1 });
///     let observer = op.clone();
///     assert_eq!(op.await, 2);
///     assert_eq!(observer.await, 2);
/// })
/// ```
#[must_use = "operations make no progress unless a handle observing them is polled"]
pub struct Operation<F: Future> {
    shared: Arc<Shared<F>>,
}

impl<F: Future> Operation<F> {
    /// Wrap a computation into a shareable operation handle.
    pub fn new(future: impl IntoFuture<IntoFuture = F>) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State::Pending(Box::pin(future.into_future()))),
                observers: Arc::new(ObserverSet::new()),
            }),
        }
    }

    /// Returns `true` once the operation has produced its value or failure.
    pub fn is_settled(&self) -> bool {
        matches!(
            &*self.shared.state.lock().unwrap(),
            State::Settled { .. }
        )
    }

    /// Returns the settlement token, or `None` while the operation is still
    /// pending.
    pub fn settlement(&self) -> Option<Settlement> {
        match &*self.shared.state.lock().unwrap() {
            State::Settled { settlement, .. } => Some(*settlement),
            State::Pending(_) => None,
        }
    }

    /// Returns `true` if both handles refer to the same underlying operation.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }

    /// Wait for the operation to settle without observing its output.
    ///
    /// Unlike awaiting the handle itself this places no `Clone` bound on the
    /// output; it resolves to the operation's [`Settlement`] token.
    pub fn settled(&self) -> Settling<F> {
        Settling {
            operation: self.clone(),
        }
    }

    /// Drive the operation towards settlement on behalf of one observer.
    ///
    /// The observer's waker is registered before the underlying future is
    /// polled, so a wakeup raced from another observer cannot be missed.
    pub(crate) fn poll_settled(&self, cx: &mut Context<'_>) -> Poll<Settlement> {
        let mut state = self.shared.state.lock().unwrap();
        let output = match &mut *state {
            State::Settled { settlement, .. } => return Poll::Ready(*settlement),
            State::Pending(future) => {
                self.shared.observers.register(cx.waker());
                let waker = Waker::from(Arc::clone(&self.shared.observers));
                let mut driver_cx = Context::from_waker(&waker);
                match future.as_mut().poll(&mut driver_cx) {
                    Poll::Ready(output) => output,
                    Poll::Pending => return Poll::Pending,
                }
            }
        };

        let settlement = Settlement::next();
        *state = State::Settled { output, settlement };
        drop(state);
        self.shared.observers.wake_all();
        Poll::Ready(settlement)
    }
}

impl<F: Future> Clone for Operation<F> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<F: Future> fmt::Debug for Operation<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Operation")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<F: Future> Future for Operation<F>
where
    F::Output: Clone,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        ready!(self.poll_settled(cx));
        match &*self.shared.state.lock().unwrap() {
            State::Settled { output, .. } => Poll::Ready(output.clone()),
            State::Pending(_) => unreachable!("operation reported settled while pending"),
        }
    }
}

/// A future which resolves once an operation has settled.
///
/// This `struct` is created by the [`settled`][Operation::settled] method on
/// [`Operation`]. It yields the operation's [`Settlement`] token and never
/// touches the output, which is what lets races observe settlement order
/// without collapsing differently-typed outputs into one.
#[must_use = "futures do nothing unless you `.await` or poll them"]
pub struct Settling<F: Future> {
    operation: Operation<F>,
}

impl<F: Future> Settling<F> {
    /// The operation being observed.
    pub fn operation(&self) -> &Operation<F> {
        &self.operation
    }
}

impl<F: Future> fmt::Debug for Settling<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settling")
            .field("operation", &self.operation)
            .finish()
    }
}

impl<F: Future> Future for Settling<F> {
    type Output = Settlement;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.operation.poll_settled(cx)
    }
}
