mod api;
mod exception_handler;
mod follower_request_processor;
mod options;
mod queue;
mod state_listener;

#[cfg(test)]
mod test_utils;

pub use api::ProcessorCreationError;
pub use api::ProcessorError;
pub use api::RequestProcessor;
pub use exception_handler::ExceptionHandler;
pub use exception_handler::LoggingExceptionHandler;
pub use follower_request_processor::FollowerRequestProcessor;
pub use follower_request_processor::FollowerRequestProcessorConfig;
pub use follower_request_processor::FollowerRequestProcessorTask;
pub use options::FollowerProcessorOptions;
pub use queue::request_queue;
pub use queue::QueuedRequest;
pub use queue::RequestQueue;
pub use queue::RequestQueueReceiver;
pub use state_listener::ProcessorState;
pub use state_listener::ProcessorStateListener;
