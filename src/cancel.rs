//! Cooperative cancellation of in-flight probes.

use tokio::sync::watch;

/// Owner side: cancels every [`CancelToken`] cloned from it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

/// Observer side, handed to probes.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelHandle {
    /// A handle that is not cancelled.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        CancelHandle { tx }
    }

    /// A new token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            rx: self.tx.subscribe(),
        }
    }

    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Re-arm after a cancellation so new probes can run.
    pub fn reset(&self) {
        self.tx.send_replace(false);
    }

    /// True once [`cancel`](CancelHandle::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        CancelHandle::new()
    }
}

impl CancelToken {
    /// True if the owning handle has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is signalled. Never resolves if the handle
    /// is dropped without cancelling.
    pub async fn cancelled(&mut self) {
        let closed = self.rx.wait_for(|c| *c).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
