use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use recipes_common::Action;

/// Sends [`Action::Logout`] when the session expires. At most one timer is
/// outstanding; setting a new one cancels the old.
pub struct LogoutTimer {
    sender: UnboundedSender<Action>,
    handle: Option<JoinHandle<()>>,
}

impl LogoutTimer {
    pub fn new(sender: UnboundedSender<Action>) -> Self {
        Self { sender, handle: None }
    }

    pub fn set(&mut self, after: Duration) {
        self.clear();
        let sender = self.sender.clone();
        tracing::debug!(secs = after.as_secs(), "logout timer set");
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let _ = sender.send(Action::Logout);
        }));
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().map_or(false, |h| !h.is_finished())
    }
}

impl Drop for LogoutTimer {
    fn drop(&mut self) {
        self.clear();
    }
}
