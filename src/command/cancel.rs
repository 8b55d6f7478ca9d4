use std::sync::{Arc, Mutex};
use tokio::sync::watch;

/// Cooperative cancellation handle for in-flight requests.
///
/// Cloning yields handles to the same token. Commands race the transport
/// future against [`CancelToken::cancelled`] with a biased select, so a
/// token cancelled concurrently with a completing response always wins.
#[derive(Debug, Clone)]
pub struct CancelToken {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        CancelToken {
            sender: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once the token is cancelled; pending forever otherwise.
    pub async fn cancelled(&self) {
        let mut receiver = self.sender.subscribe();
        loop {
            if *receiver.borrow_and_update() {
                return;
            }
            if receiver.changed().await.is_err() {
                // all senders gone without cancelling; stay pending
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        CancelToken::new()
    }
}

/// Enforces at most one in-flight load per list view: beginning a new load
/// cancels whatever the previous one was still doing.
#[derive(Debug, Default)]
pub struct Reloader {
    active: Mutex<Option<CancelToken>>,
}

impl Reloader {
    pub fn new() -> Self {
        Reloader::default()
    }

    /// Cancel the previous load (if any) and hand out the token for the
    /// next one.
    pub fn begin(&self) -> CancelToken {
        let token = CancelToken::new();
        let previous = self
            .active
            .lock()
            .unwrap()
            .replace(token.clone());
        if let Some(previous) = previous {
            previous.cancel();
        }
        token
    }

    /// Cancel the current load without starting a new one (view unmounted).
    pub fn stop(&self) {
        if let Some(token) = self.active.lock().unwrap().take() {
            token.cancel();
        }
    }
}
