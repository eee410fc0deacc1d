//! The request pipeline of a follower replica in a quorum-replicated coordination service, and the
//! watch notification contract shared with clients.
mod conversion;
mod processor;
mod request;
mod server;
mod watcher;

pub use conversion::InvalidValueError;

pub use processor::request_queue;
pub use processor::ExceptionHandler;
pub use processor::FollowerProcessorOptions;
pub use processor::FollowerRequestProcessor;
pub use processor::FollowerRequestProcessorConfig;
pub use processor::FollowerRequestProcessorTask;
pub use processor::LoggingExceptionHandler;
pub use processor::ProcessorCreationError;
pub use processor::ProcessorError;
pub use processor::ProcessorState;
pub use processor::ProcessorStateListener;
pub use processor::QueuedRequest;
pub use processor::RequestProcessor;
pub use processor::RequestQueue;
pub use processor::RequestQueueReceiver;

pub use request::OpCode;
pub use request::Request;
pub use request::Zxid;

pub use server::Follower;
pub use server::LeaderChannel;
pub use server::LeaderChannelError;
pub use server::LeaderPacket;
pub use server::LeaderPacketStream;
pub use server::PacketKind;
pub use server::UNASSIGNED_ZXID;
pub use server::PendingSyncError;
pub use server::PendingSyncs;
pub use server::ServerContext;

pub use watcher::channel_watcher;
pub use watcher::ChannelWatcher;
pub use watcher::EventType;
pub use watcher::KeeperState;
pub use watcher::WatchManager;
pub use watcher::WatchedEvent;
pub use watcher::WatchedEventStream;
pub use watcher::Watcher;
pub use watcher::WatcherEvent;

// `crate::{root_mod}` only declares and exports. Every `mod` stays private; anything public leaves
// through a `pub use` here, so modules can be reorganized without changing the API.
