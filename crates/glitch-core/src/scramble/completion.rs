#![forbid(unsafe_code)]

//! Completion signals for scramble plans.
//!
//! Every [`ScrambleEngine::set_text`](super::ScrambleEngine::set_text) call
//! returns a [`Completion`]. It resolves once, when every slot of that plan
//! has settled. A plan that is superseded or cancelled never resolves its
//! completion: awaiting it stays pending forever, and [`Completion::status`]
//! reports [`CompletionStatus::Superseded`].

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

/// Observable state of a [`Completion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionStatus {
    /// The plan is still advancing.
    Pending,
    /// Every slot settled.
    Complete,
    /// The plan was replaced or cancelled before settling.
    Superseded,
}

impl CompletionStatus {
    /// Whether the plan ran to completion.
    #[inline]
    #[must_use]
    pub fn is_complete(self) -> bool {
        self == Self::Complete
    }
}

/// Engine-side half: resolving consumes it, so it can fire at most once.
#[derive(Debug)]
pub(crate) struct Resolver {
    sender: oneshot::Sender<()>,
}

impl Resolver {
    pub(crate) fn resolve(self) {
        // The caller may have dropped its Completion; nothing to notify then.
        let _ = self.sender.send(());
    }
}

/// Awaitable signal that a scramble plan settled.
#[derive(Debug)]
#[must_use = "a Completion does nothing unless polled or inspected"]
pub struct Completion {
    receiver: oneshot::Receiver<()>,
    status: CompletionStatus,
}

impl Completion {
    pub(crate) fn channel() -> (Resolver, Self) {
        let (sender, receiver) = oneshot::channel();
        (
            Resolver { sender },
            Self {
                receiver,
                status: CompletionStatus::Pending,
            },
        )
    }

    /// Current status without blocking.
    pub fn status(&mut self) -> CompletionStatus {
        if self.status == CompletionStatus::Pending {
            self.status = match self.receiver.try_recv() {
                Ok(Some(())) => CompletionStatus::Complete,
                Ok(None) => CompletionStatus::Pending,
                Err(oneshot::Canceled) => CompletionStatus::Superseded,
            };
        }
        self.status
    }

    /// Shorthand for `status().is_complete()`.
    pub fn is_complete(&mut self) -> bool {
        self.status().is_complete()
    }
}

impl Future for Completion {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        match self.status {
            CompletionStatus::Complete => return Poll::Ready(()),
            CompletionStatus::Superseded => return Poll::Pending,
            CompletionStatus::Pending => {}
        }
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(())) => {
                self.status = CompletionStatus::Complete;
                Poll::Ready(())
            }
            Poll::Ready(Err(oneshot::Canceled)) => {
                // Superseded plans never resolve.
                self.status = CompletionStatus::Superseded;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}
