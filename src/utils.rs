//! Helper macros for the tuple race implementations.

/// Generate the polling body for one position of a tuple race. Tuples have no
/// positional indexing at the macro level, so each field gets an `if` guard
/// comparing the loop index against its position in the `Indexes` enum.
///
/// `Settling` fields are `Unpin`, which is what allows pinning them in place
/// with the safe constructor here.
macro_rules! gen_conditions {
    ($i:expr, $this:expr, $cx:expr, $(($F_index:expr; $F:ident, { $($arms:pat => $body:expr,)* }))*) => {
        $(
            if $i == $F_index {
                match core::future::Future::poll(
                    core::pin::Pin::new(&mut $this.$F),
                    $cx,
                ) {
                    $($arms => $body,)*
                }
            }
        )*
    }
}
pub(crate) use gen_conditions;

/// Count the number of elements in a tuple of idents.
macro_rules! tuple_len {
    (@count_one $F:ident) => (1);
    ($($F:ident,)*) => (0 $(+ crate::utils::tuple_len!(@count_one $F))*);
}
pub(crate) use tuple_len;
