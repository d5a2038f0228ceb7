//! Identity-preserving racing for async Rust.
//!
//! Racing futures for their values answers "what finished first?" but not
//! "*who* finished first?" — and when the contenders produce different types,
//! the naive approach collapses them into one merged output and the answer is
//! lost for good. This crate races [`Operation`] handles instead: each input
//! is wrapped in a derived observer that yields only its position, the
//! observers are raced on *settlement* (completion with a value or a
//! failure alike), and the winning position is used to hand back the original
//! operation. The caller learns exactly which operand won and observes its
//! output — or its failure — through the operation's own completion path.
//!
//! # Operations
//!
//! This library provides the following operations on arrays, vecs, and tuples
//! of [`Operation`] handles:
//!
//! - [`Race`]: Wait for the first operation to settle and learn which one it
//!   was. Tuples race heterogeneously: the outcome is an enum with one
//!   variant per position, preserving each operand's own output type.
//!
//! # Examples
//!
//! ```rust
//! use first_settled::prelude::*;
//! use first_settled::tuple::Winner2;
//! use first_settled::Operation;
//! use futures_lite::future::block_on;
//! use std::future;
//!
//! block_on(async {
//!     let slow = Operation::new(future::pending::<&str>());
//!     let fast = Operation::new(future::ready(42));
//!
//!     let winner = (slow.clone(), fast).race().await;
//!     assert_eq!(winner.index(), 1);
//!     match winner {
//!         Winner2::B(op) => assert_eq!(op.await, 42),
//!         Winner2::A(_) => unreachable!(),
//!     }
//!     // `slow` is still running and still observable.
//!     assert!(!slow.is_settled());
//! })
//! ```
//!
//! # Limitations
//!
//! Losing operations are not cancelled: the race only observes settlement
//! order, it does not own the operations. Whoever holds the remaining
//! handles decides whether to keep observing them or drop them. Timeouts and
//! retries are likewise out of scope; compose them from operations if you
//! need them.

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations, nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]
#![allow(non_snake_case)]

mod operation;
mod race;
mod utils;

pub use operation::{Operation, Settlement, Settling};
pub use race::{Race, Winner};

/// The first-settled prelude.
pub mod prelude {
    pub use super::Race as _;
}

/// Outcome and future types for racing heterogeneous tuples of operations.
pub mod tuple {
    pub use crate::race::tuple::{
        Race10, Race11, Race12, Race2, Race3, Race4, Race5, Race6, Race7, Race8, Race9, Winner10,
        Winner11, Winner12, Winner2, Winner3, Winner4, Winner5, Winner6, Winner7, Winner8, Winner9,
    };
}

/// Future types for racing fixed-length arrays of operations.
pub mod array {
    pub use crate::race::array::Race;
}

/// Future types for racing vectors of operations.
pub mod vec {
    pub use crate::race::vec::Race;
}
