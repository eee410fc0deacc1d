use crate::processor::options::{FollowerProcessorOptions, FollowerProcessorOptionsValidated};
use crate::processor::state_listener::{self, ProcessorStateNotifier};
use crate::processor::{
    request_queue, ExceptionHandler, ProcessorCreationError, ProcessorError, ProcessorState, ProcessorStateListener,
    QueuedRequest, RequestProcessor, RequestQueue, RequestQueueReceiver,
};
use crate::request::Request;
use crate::server::ServerContext;
use std::convert::TryFrom;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub struct FollowerRequestProcessorConfig {
    pub logger: slog::Logger,
    pub server_context: Arc<ServerContext>,
    pub next_processor: Arc<dyn RequestProcessor>,
    pub exception_handler: Arc<dyn ExceptionHandler>,
    pub options: FollowerProcessorOptions,
}

/// FollowerRequestProcessor is the first stage of a follower's pipeline. Every request is handed
/// to the next local stage, and requests that need a global order are then shipped to the leader.
/// Sync requests are also recorded as pending, so the leader's answer can be matched up with them.
///
/// This is the producer-side handle. The work happens in `FollowerRequestProcessorTask::run()`.
pub struct FollowerRequestProcessor {
    logger: slog::Logger,
    name: String,
    queue: RequestQueue,
    state_listener: ProcessorStateListener,
}

pub struct FollowerRequestProcessorTask {
    logger: slog::Logger,
    name: String,
    queue: RequestQueueReceiver,
    server_context: Arc<ServerContext>,
    next_processor: Arc<dyn RequestProcessor>,
    exception_handler: Arc<dyn ExceptionHandler>,
    state_notifier: ProcessorStateNotifier,
}

impl FollowerRequestProcessor {
    pub fn new(
        config: FollowerRequestProcessorConfig,
    ) -> Result<(Self, FollowerRequestProcessorTask), ProcessorCreationError> {
        let options = FollowerProcessorOptionsValidated::try_from(config.options)
            .map_err(|e| ProcessorCreationError::IllegalOptions(e.to_string()))?;

        let logger = config.logger.new(slog::o!("Stage" => options.name.clone()));
        let (queue, queue_receiver) = request_queue(options.queue_capacity);
        let (state_notifier, state_listener) = state_listener::new(ProcessorState::Running);

        let processor = FollowerRequestProcessor {
            logger: logger.clone(),
            name: options.name.clone(),
            queue,
            state_listener,
        };
        let task = FollowerRequestProcessorTask {
            logger,
            name: options.name,
            queue: queue_receiver,
            server_context: config.server_context,
            next_processor: config.next_processor,
            exception_handler: config.exception_handler,
            state_notifier,
        };

        Ok((processor, task))
    }

    /// `spawn()` creates the stage and starts its worker on the current tokio runtime.
    pub fn spawn(config: FollowerRequestProcessorConfig) -> Result<(Self, JoinHandle<()>), ProcessorCreationError> {
        let (processor, task) = Self::new(config)?;
        let join_handle = tokio::spawn(task.run());

        Ok((processor, join_handle))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state_listener(&self) -> ProcessorStateListener {
        self.state_listener.clone()
    }
}

#[async_trait::async_trait]
impl RequestProcessor for FollowerRequestProcessor {
    async fn process_request(&self, request: Arc<Request>) -> Result<(), ProcessorError> {
        self.queue.put(request).await
    }

    async fn shutdown(&self) {
        if self.queue.put_request_of_death().await {
            slog::info!(self.logger, "Shutting down");
        }
    }
}

impl FollowerRequestProcessorTask {
    pub async fn run(mut self) {
        match self.run_loop().await {
            Ok(()) => self.state_notifier.notify_new_state(ProcessorState::Finished),
            Err(e) => {
                self.exception_handler.handle_exception(&self.name, &e);
                self.state_notifier
                    .notify_new_state(ProcessorState::Failed(e.to_string()));
            }
        }

        slog::info!(self.logger, "FollowerRequestProcessor exited loop!");
    }

    async fn run_loop(&mut self) -> Result<(), ProcessorError> {
        while let Some(queued) = self.queue.take().await {
            let request = match queued {
                QueuedRequest::Work(request) => request,
                QueuedRequest::RequestOfDeath => {
                    // Everything queued before us has been forwarded, so the next stage can stop too.
                    self.next_processor.shutdown().await;
                    return Ok(());
                }
            };

            slog::trace!(self.logger, "F {:?}", request);
            self.handle_request(request).await?;
        }

        slog::info!(self.logger, "Request queue closed by all producers");
        self.next_processor.shutdown().await;
        Ok(())
    }

    async fn handle_request(&self, request: Arc<Request>) -> Result<(), ProcessorError> {
        // Queue the request locally before the leader sees it, so that the next stage is ready for
        // the leader's response.
        self.next_processor
            .process_request(request.clone())
            .await
            .map_err(|e| ProcessorError::NextStage(Box::new(e)))?;

        let op_code = request.op_code();
        if op_code.is_sync() {
            // The leader may answer as soon as it has the sync, so it has to be pending first.
            let pending_syncs = self.server_context.pending_syncs();
            pending_syncs.add(request.clone())?;
            if let Err(e) = self.server_context.follower().request(request.clone()).await {
                // Never reached the leader, so no answer will ever drain it.
                pending_syncs.remove(&request);
                return Err(e.into());
            }
        } else if op_code.is_leader_bound() {
            self.server_context.follower().request(request).await?;
        }

        Ok(())
    }
}
