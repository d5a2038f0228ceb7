use core::future::Future;

pub(crate) mod array;
pub(crate) mod observer;
pub(crate) mod tuple;
pub(crate) mod vec;
pub(crate) mod winner;

pub use winner::Winner;

/// Wait for the first operation to settle and learn which one it was.
///
/// Races two or more [`Operation`][crate::Operation] handles against each
/// other and resolves as soon as any of them settles — with a value *or* a
/// failure. The outcome identifies the winner by position and carries a
/// handle to that same original operation, so its output keeps its own type
/// and its failure, if any, surfaces through its own completion path.
///
/// Racing operations directly for their values would collapse differently-
/// typed outputs into one and lose track of who produced the result. This
/// trait instead races index-only derived observers and looks the winner up
/// in the input, so nothing about the operations themselves is merged.
///
/// Losing operations are not cancelled. They keep progressing through any
/// handle still observing them and settle on their own.
///
/// # Panics
///
/// Racing requires at least two operations: array and vector races panic
/// when given fewer, and tuple races below arity two do not exist.
///
/// # Tie-break
///
/// Settlement order is recorded with unique, totally-ordered tokens, so two
/// operations never truly tie. Operations that become ready between two
/// polls of the race future are driven in input order on the next poll and
/// settle in that order: wall-clock ties go to the lower index.
///
/// # Examples
///
/// Differently-typed operations race as tuples; the winner enum preserves
/// each position's own output type:
///
/// ```rust
/// use first_settled::prelude::*;
/// use first_settled::tuple::Winner2;
/// use first_settled::Operation;
/// use futures_lite::future::block_on;
/// use std::future;
///
/// block_on(async {
///     let slow = Operation::new(future::pending::<&str>());
///     let fast = Operation::new(future::ready(42));
///
///     match (slow, fast).race().await {
///         Winner2::B(op) => assert_eq!(op.await, 42),
///         Winner2::A(_) => unreachable!("a pending operation cannot win"),
///     }
/// })
/// ```
///
/// Similarly-typed operations race as arrays or vectors; the outcome reports
/// the winning index and hands back the original handle:
///
/// ```rust
/// use first_settled::prelude::*;
/// use first_settled::Operation;
/// use futures_lite::future::block_on;
/// use std::future;
///
/// block_on(async {
///     let ops = vec![
///         Operation::new(future::ready("hello")),
///         Operation::new(future::ready("world")),
///     ];
///     let winner = ops.race().await;
///     assert_eq!(winner.index(), 0);
///     assert_eq!(winner.into_operation().await, "hello");
/// })
/// ```
pub trait Race {
    /// The outcome identifying the winning operation.
    type Output;

    /// The [`Future`] implementation returned by this method.
    type Future: Future<Output = Self::Output>;

    /// Wait for the first operation to settle.
    ///
    /// Resolves once any input operation settles, to an outcome naming the
    /// winner's position and carrying a handle to that original operation.
    fn race(self) -> Self::Future;
}
