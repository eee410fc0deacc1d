mod event;
mod watch_manager;
mod watcher;

pub use event::EventType;
pub use event::KeeperState;
pub use event::WatchedEvent;
pub use event::WatcherEvent;
pub use watch_manager::WatchManager;
pub use watcher::channel_watcher;
pub use watcher::ChannelWatcher;
pub use watcher::WatchedEventStream;
pub use watcher::Watcher;
