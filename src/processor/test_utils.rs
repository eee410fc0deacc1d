use crate::processor::{
    ExceptionHandler, FollowerProcessorOptions, FollowerRequestProcessorConfig, ProcessorError, RequestProcessor,
};
use crate::request::{OpCode, Request};
use crate::server::{Follower, LeaderChannelError, ServerContext};
use bytes::Bytes;
use std::future::Future;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

pub(crate) fn request(cxid: i32, op_code: OpCode) -> Arc<Request> {
    Arc::new(Request::new(0x100, cxid, op_code, Bytes::from(format!("/node-{}", cxid))))
}

pub(crate) async fn with_sanity_timeout<F: Future>(future: F) -> F::Output {
    tokio::time::timeout(Duration::from_secs(5), future)
        .await
        .expect("Unexpected timeout")
}

/// Hop is one thing the stage under test did to its collaborators, in the order it did them.
#[derive(Clone, Debug)]
pub(crate) enum Hop {
    NextStage(Arc<Request>),
    Leader {
        request: Arc<Request>,
        was_pending_sync: bool,
    },
    NextStageShutdown,
}

impl Hop {
    pub(crate) fn is_leader_hop_for(&self, expected: &Arc<Request>) -> bool {
        matches!(self, Hop::Leader { request, .. } if Arc::ptr_eq(request, expected))
    }
}

impl PartialEq for Hop {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Hop::NextStage(a), Hop::NextStage(b)) => Arc::ptr_eq(a, b),
            (
                Hop::Leader {
                    request: a,
                    was_pending_sync: pa,
                },
                Hop::Leader {
                    request: b,
                    was_pending_sync: pb,
                },
            ) => Arc::ptr_eq(a, b) && pa == pb,
            (Hop::NextStageShutdown, Hop::NextStageShutdown) => true,
            _ => false,
        }
    }
}

type Trace = Arc<Mutex<Vec<Hop>>>;

pub(crate) struct RecordingProcessor {
    trace: Trace,
    fail_on: Mutex<Option<OpCode>>,
}

impl RecordingProcessor {
    pub(crate) fn fail_on(&self, op_code: OpCode) {
        self.fail_on.lock().unwrap().replace(op_code);
    }
}

#[async_trait::async_trait]
impl RequestProcessor for RecordingProcessor {
    async fn process_request(&self, request: Arc<Request>) -> Result<(), ProcessorError> {
        if *self.fail_on.lock().unwrap() == Some(request.op_code()) {
            return Err(ProcessorError::Stage(format!("refusing {:?}", request)));
        }
        self.trace.lock().unwrap().push(Hop::NextStage(request));
        Ok(())
    }

    async fn shutdown(&self) {
        self.trace.lock().unwrap().push(Hop::NextStageShutdown);
    }
}

pub(crate) struct RecordingFollower {
    trace: Trace,
    context: Weak<ServerContext>,
    failure: Mutex<Option<LeaderChannelError>>,
}

impl RecordingFollower {
    pub(crate) fn fail_with(&self, error: LeaderChannelError) {
        self.failure.lock().unwrap().replace(error);
    }
}

#[async_trait::async_trait]
impl Follower for RecordingFollower {
    async fn request(&self, request: Arc<Request>) -> Result<(), LeaderChannelError> {
        if let Some(error) = *self.failure.lock().unwrap() {
            return Err(error);
        }
        let was_pending_sync = self
            .context
            .upgrade()
            .map(|context| context.pending_syncs().contains(&request))
            .unwrap_or(false);
        self.trace.lock().unwrap().push(Hop::Leader {
            request,
            was_pending_sync,
        });
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct RecordingExceptionHandler {
    errors: Mutex<Vec<(String, String)>>,
}

impl RecordingExceptionHandler {
    pub(crate) fn errors(&self) -> Vec<(String, String)> {
        self.errors.lock().unwrap().clone()
    }
}

impl ExceptionHandler for RecordingExceptionHandler {
    fn handle_exception(&self, stage_name: &str, error: &ProcessorError) {
        self.errors
            .lock()
            .unwrap()
            .push((stage_name.to_string(), error.to_string()));
    }
}

/// RecordingPipeline wires a stage under test to recording collaborators that share one trace.
pub(crate) struct RecordingPipeline {
    pub(crate) logger: slog::Logger,
    pub(crate) context: Arc<ServerContext>,
    pub(crate) next_stage: Arc<RecordingProcessor>,
    pub(crate) leader: Arc<RecordingFollower>,
    pub(crate) exception_handler: Arc<RecordingExceptionHandler>,
    trace: Trace,
}

pub(crate) fn recording_pipeline() -> RecordingPipeline {
    let logger = slog::Logger::root(slog::Discard, slog::o!());
    let trace: Trace = Arc::new(Mutex::new(vec![]));

    let mut leader = None;
    let context = Arc::new_cyclic(|weak_context| {
        let follower = Arc::new(RecordingFollower {
            trace: trace.clone(),
            context: weak_context.clone(),
            failure: Mutex::new(None),
        });
        leader = Some(follower.clone());
        ServerContext::new(logger.clone(), follower)
    });

    RecordingPipeline {
        logger,
        context,
        next_stage: Arc::new(RecordingProcessor {
            trace: trace.clone(),
            fail_on: Mutex::new(None),
        }),
        leader: leader.expect("Follower is created with the context"),
        exception_handler: Arc::new(RecordingExceptionHandler::default()),
        trace,
    }
}

impl RecordingPipeline {
    pub(crate) fn config(&self, options: FollowerProcessorOptions) -> FollowerRequestProcessorConfig {
        FollowerRequestProcessorConfig {
            logger: self.logger.clone(),
            server_context: self.context.clone(),
            next_processor: self.next_stage.clone(),
            exception_handler: self.exception_handler.clone(),
            options,
        }
    }

    pub(crate) fn hops(&self) -> Vec<Hop> {
        self.trace.lock().unwrap().clone()
    }

    pub(crate) fn next_stage_requests(&self) -> Vec<Arc<Request>> {
        self.hops()
            .into_iter()
            .filter_map(|hop| match hop {
                Hop::NextStage(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn leader_requests(&self) -> Vec<Arc<Request>> {
        self.hops()
            .into_iter()
            .filter_map(|hop| match hop {
                Hop::Leader { request, .. } => Some(request),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn next_stage_shutdowns(&self) -> usize {
        self.hops()
            .iter()
            .filter(|hop| **hop == Hop::NextStageShutdown)
            .count()
    }
}
