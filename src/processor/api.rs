use crate::request::Request;
use crate::server::{LeaderChannelError, PendingSyncError};
use std::sync::Arc;

/// RequestProcessor is one stage of a replica's request pipeline. Stages are chained at startup:
/// each one does its own work and hands the request to the next stage it was built with.
#[async_trait::async_trait]
pub trait RequestProcessor: Send + Sync {
    async fn process_request(&self, request: Arc<Request>) -> Result<(), ProcessorError>;

    /// `shutdown()` asks the stage to stop once the work already handed to it is done.
    async fn shutdown(&self);
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessorError {
    #[error("Stage is shutting down and accepts no more requests")]
    ShuttingDown,

    #[error("Stage worker has exited")]
    WorkerExited,

    #[error("Failed to forward request to the leader: {0}")]
    Leader(#[from] LeaderChannelError),

    #[error("Failed to track pending sync: {0}")]
    PendingSync(#[from] PendingSyncError),

    #[error("Next stage failed: {0}")]
    NextStage(Box<ProcessorError>),

    #[error("Stage failure: {0}")]
    Stage(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessorCreationError {
    #[error("Illegal options for configuring processor: {0}")]
    IllegalOptions(String),
}
