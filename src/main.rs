use bytes::Bytes;
use quorum_follower::{
    FollowerProcessorOptions, FollowerRequestProcessor, FollowerRequestProcessorConfig, LeaderChannel,
    LoggingExceptionHandler, OpCode, ProcessorError, Request, RequestProcessor, ServerContext,
};
use slog::Drain;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let logger = create_root_logger_for_stdout("id-1".to_string());

    let (leader_channel, mut leader_packets) = LeaderChannel::new(logger.new(slog::o!("Role" => "Follower")), 16);
    let context = Arc::new(ServerContext::new(logger.clone(), Arc::new(leader_channel)));

    let (processor, worker) = FollowerRequestProcessor::spawn(FollowerRequestProcessorConfig {
        logger: logger.clone(),
        server_context: context.clone(),
        next_processor: Arc::new(LocalStage { logger: logger.clone() }),
        exception_handler: Arc::new(LoggingExceptionHandler::new(logger.clone())),
        options: FollowerProcessorOptions {
            name: Some("FollowerRequestProcessor:1".to_string()),
            queue_capacity: Some(64),
        },
    })?;

    // Stand-in for the leader: acknowledge syncs as they arrive. Exits once the context, and with
    // it the channel, is dropped.
    let leader_logger = logger.new(slog::o!("Role" => "Leader"));
    let leader_context = Arc::downgrade(&context);
    let leader = tokio::spawn(async move {
        while let Some(packet) = leader_packets.next().await {
            slog::info!(leader_logger, "Received {:?} from session 0x{:x}", packet.op_code, packet.session_id);
            if packet.op_code == OpCode::Sync {
                if let Some(context) = leader_context.upgrade() {
                    context.complete_sync();
                }
            }
        }
    });

    let session_id = 0x1000_0000_0001;
    let ops = [
        (OpCode::CreateSession, ""),
        (OpCode::Create, "/app"),
        (OpCode::GetData, "/app"),
        (OpCode::Sync, "/app"),
        (OpCode::GetChildren, "/"),
        (OpCode::CloseSession, ""),
    ];
    for (cxid, (op_code, path)) in ops.iter().enumerate() {
        let request = Request::new(session_id, cxid as i32, *op_code, Bytes::from(path.to_string()));
        processor.process_request(Arc::new(request)).await?;
    }

    processor.shutdown().await;
    worker.await?;
    drop(processor);
    drop(context);
    leader.await?;

    Ok(())
}

/// Stands in for the local stages that follow the follower stage.
struct LocalStage {
    logger: slog::Logger,
}

#[async_trait::async_trait]
impl RequestProcessor for LocalStage {
    async fn process_request(&self, request: Arc<Request>) -> Result<(), ProcessorError> {
        slog::info!(self.logger, "Staged {:?}", request);
        Ok(())
    }

    async fn shutdown(&self) {
        slog::info!(self.logger, "Local stage shutting down");
    }
}

fn create_root_logger_for_stdout(replica_id: String) -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).use_file_location().build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!("ReplicaId" => replica_id))
}
