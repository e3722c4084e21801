// Poll Session Cancellation Token
//
// A cancelled session transitions to a discarded state: it stops issuing
// queries at the next scheduled point and invokes NO terminal callback.

use tokio::sync::watch;

/// Cancellation signal held by a running session
#[derive(Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Wait for the cancellation signal
    pub async fn wait(&mut self) {
        let _ = self.rx.changed().await;
    }
}

/// Cancellation handle kept by the session owner
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation to the session
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a cancellation channel
pub fn cancel_channel() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_observes_cancellation() {
        let (handle, token) = cancel_channel();
        assert!(!token.is_cancelled());

        handle.cancel();
        assert!(token.is_cancelled());
    }

    #[test]
    fn wait_returns_after_cancel() {
        let (handle, mut token) = cancel_channel();
        handle.cancel();
        tokio_test::block_on(token.wait());
        assert!(token.is_cancelled());
    }
}
