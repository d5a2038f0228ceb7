use core::fmt;
use core::future::Future;

use crate::operation::Operation;

/// The outcome of racing a homogeneous collection of operations.
///
/// Identifies the winning operation by its position in the input and carries
/// a handle to that same operation — not a copy of its value — so the output
/// (or failure) can be observed through the operation's own completion path.
///
/// This `struct` is created by racing arrays or vectors of operations with
/// the [`Race`][crate::Race] trait. See its documentation for more.
///
/// # Examples
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
///     let winner = ops.clone().race().await;
///     assert!(winner.operation().ptr_eq(&ops[winner.index()]));
/// })
/// ```
#[must_use = "a race outcome reports which operation won; drop it only on purpose"]
pub struct Winner<F: Future> {
    index: usize,
    operation: Operation<F>,
}

impl<F: Future> Winner<F> {
    pub(crate) fn new(index: usize, operation: Operation<F>) -> Self {
        Self { index, operation }
    }

    /// The position of the winning operation in the input collection.
    pub fn index(&self) -> usize {
        self.index
    }

    /// A handle to the winning operation.
    pub fn operation(&self) -> &Operation<F> {
        &self.operation
    }

    /// Consume the outcome, returning the winning operation's handle.
    pub fn into_operation(self) -> Operation<F> {
        self.operation
    }

    /// Consume the outcome, returning the winning position and handle.
    pub fn into_parts(self) -> (usize, Operation<F>) {
        (self.index, self.operation)
    }
}

impl<F: Future> fmt::Debug for Winner<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Winner")
            .field("index", &self.index)
            .field("operation", &self.operation)
            .finish()
    }
}
