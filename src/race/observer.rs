use core::future::Future;
use core::pin::Pin;
use core::task::{ready, Context, Poll};

use pin_project::pin_project;

/// A derived observer which tags an inner settlement future with the position
/// of the operation it watches.
///
/// Races never poll operations for their values; they poll these observers,
/// which yield only the position (plus whatever the settlement future itself
/// reports). The winning position is then used to look the original operation
/// back up, which is what keeps differently-typed outputs from collapsing
/// into one.
#[pin_project]
pub(crate) struct IndexObserver<Ob> {
    index: usize,
    #[pin]
    observed: Ob,
}

impl<Ob> IndexObserver<Ob> {
    pub(crate) fn new(index: usize, observed: Ob) -> Self {
        Self { index, observed }
    }
}

impl<Ob: Future> Future for IndexObserver<Ob> {
    type Output = (usize, Ob::Output);

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let output = ready!(this.observed.poll(cx));
        Poll::Ready((*this.index, output))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use futures_lite::future::block_on;
    use std::future;

    #[test]
    fn yields_position_alongside_inner_output() {
        block_on(async {
            let observer = IndexObserver::new(3, future::ready("ignored"));
            assert_eq!(observer.await, (3, "ignored"));
        });
    }
}
