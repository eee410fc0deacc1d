use crate::watcher::WatchedEvent;
use tokio::sync::mpsc;

/// Watcher is the callback a client registers to hear about connection state changes and changes
/// to nodes it has watched. A registration fires at most once; to keep watching, register again.
pub trait Watcher: Send + Sync {
    fn process(&self, event: WatchedEvent);
}

/// Any closure over a `WatchedEvent` can be used as a watcher.
impl<F> Watcher for F
where
    F: Fn(WatchedEvent) + Send + Sync,
{
    fn process(&self, event: WatchedEvent) {
        self(event)
    }
}

pub fn channel_watcher() -> (ChannelWatcher, WatchedEventStream) {
    let (tx, rx) = mpsc::unbounded_channel();

    (ChannelWatcher { sender: tx }, WatchedEventStream { receiver: rx })
}

/// ChannelWatcher hands events to an async consumer in the order `process()` was called.
pub struct ChannelWatcher {
    sender: mpsc::UnboundedSender<WatchedEvent>,
}

impl Watcher for ChannelWatcher {
    fn process(&self, event: WatchedEvent) {
        // Consumer went away. Nobody is left to tell.
        let _ = self.sender.send(event);
    }
}

pub struct WatchedEventStream {
    receiver: mpsc::UnboundedReceiver<WatchedEvent>,
}

impl WatchedEventStream {
    /// `next()` returns the next delivered event, or None once every `ChannelWatcher` is gone and
    /// all delivered events were consumed.
    pub async fn next(&mut self) -> Option<WatchedEvent> {
        self.receiver.recv().await
    }

    /// `try_next()` returns an already delivered event without waiting.
    pub fn try_next(&mut self) -> Option<WatchedEvent> {
        self.receiver.try_recv().ok()
    }
}
