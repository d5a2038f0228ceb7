use super::Race as RaceTrait;
use crate::operation::{Operation, Settlement, Settling};
use crate::utils;

use core::fmt::{self, Debug};
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll};

macro_rules! impl_race_tuple {
    ($StructName:ident $WinnerName:ident $($F:ident)+) => {
        /// The outcome of racing differently-typed operations.
        ///
        /// One variant per input position, each carrying a handle to the
        /// original operation at that position. The winner's output keeps its
        /// own type; nothing is merged into a common union.
        #[must_use = "a race outcome reports which operation won; drop it only on purpose"]
        #[allow(non_snake_case)]
        pub enum $WinnerName<$($F),*>
        where $(
            $F: Future,
        )* {
            $(
                /// The operation at this position settled first.
                $F(Operation<$F>),
            )*
        }

        impl<$($F),*> $WinnerName<$($F),*>
        where $(
            $F: Future,
        )* {
            /// The position of the winning operation in the input tuple.
            pub fn index(&self) -> usize {
                #[repr(usize)]
                enum Indexes { $($F),* }
                match self {
                    $(Self::$F(_) => Indexes::$F as usize,)*
                }
            }
        }

        impl<$($F),*> Debug for $WinnerName<$($F),*>
        where $(
            $F: Future,
        )* {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("Winner").field("index", &self.index()).finish()
            }
        }

        /// A future which waits for the first of a tuple of operations to
        /// settle.
        ///
        /// This `struct` is created by the [`race`] method on the [`Race`]
        /// trait. See its documentation for more.
        ///
        /// [`race`]: crate::Race::race
        /// [`Race`]: crate::Race
        #[must_use = "futures do nothing unless you `.await` or poll them"]
        #[allow(non_snake_case)]
        pub struct $StructName<$($F),*>
        where $(
            $F: Future,
        )* {
            done: bool,
            $($F: Settling<$F>,)*
        }

        impl<$($F),*> Debug for $StructName<$($F),*>
        where $(
            $F: Future,
        )* {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple("Race")
                    $(.field(&self.$F))*
                    .finish()
            }
        }

        impl<$($F),*> RaceTrait for ($(Operation<$F>,)*)
        where $(
            $F: Future,
        )* {
            type Output = $WinnerName<$($F),*>;
            type Future = $StructName<$($F),*>;

            fn race(self) -> Self::Future {
                let ($($F,)*): ($(Operation<$F>,)*) = self;
                $StructName {
                    done: false,
                    $($F: $F.settled(),)*
                }
            }
        }

        impl<$($F),*> Future for $StructName<$($F),*>
        where $(
            $F: Future,
        )* {
            type Output = $WinnerName<$($F),*>;

            fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
                // `Settling` handles are address-independent, so the whole
                // future is `Unpin`.
                let this = self.get_mut();
                assert!(!this.done, "futures must not be polled after completing");

                #[repr(usize)]
                enum Indexes { $($F),* }

                const LEN: usize = utils::tuple_len!($($F,)*);

                // Poll every observer each pass, keeping all pending
                // operations driven. Among those found settled, the earliest
                // settlement wins.
                let mut winner: Option<(Settlement, usize)> = None;
                for index in 0..LEN {
                    utils::gen_conditions!(index, this, cx, $((Indexes::$F as usize; $F, {
                        Poll::Ready(settlement) => {
                            if winner.map_or(true, |(best, _)| settlement < best) {
                                winner = Some((settlement, index));
                            }
                        },
                        Poll::Pending => {},
                    }))*);
                }

                if let Some((_, index)) = winner {
                    this.done = true;
                    $(
                        if index == Indexes::$F as usize {
                            return Poll::Ready($WinnerName::$F(this.$F.operation().clone()));
                        }
                    )*
                    unreachable!("winning index out of range");
                }
                Poll::Pending
            }
        }
    };
}

impl_race_tuple! { Race2 Winner2 A B }
impl_race_tuple! { Race3 Winner3 A B C }
impl_race_tuple! { Race4 Winner4 A B C D }
impl_race_tuple! { Race5 Winner5 A B C D E }
impl_race_tuple! { Race6 Winner6 A B C D E F }
impl_race_tuple! { Race7 Winner7 A B C D E F G }
impl_race_tuple! { Race8 Winner8 A B C D E F G H }
impl_race_tuple! { Race9 Winner9 A B C D E F G H I }
impl_race_tuple! { Race10 Winner10 A B C D E F G H I J }
impl_race_tuple! { Race11 Winner11 A B C D E F G H I J K }
impl_race_tuple! { Race12 Winner12 A B C D E F G H I J K L }
