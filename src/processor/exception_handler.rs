use crate::processor::ProcessorError;

/// ExceptionHandler is told when a stage's worker dies from an error. The worker does not retry;
/// the handler is where a replica notices it has stopped making progress.
pub trait ExceptionHandler: Send + Sync {
    fn handle_exception(&self, stage_name: &str, error: &ProcessorError);
}

pub struct LoggingExceptionHandler {
    logger: slog::Logger,
}

impl LoggingExceptionHandler {
    pub fn new(logger: slog::Logger) -> Self {
        LoggingExceptionHandler { logger }
    }
}

impl ExceptionHandler for LoggingExceptionHandler {
    fn handle_exception(&self, stage_name: &str, error: &ProcessorError) {
        slog::error!(
            self.logger,
            "Severe unrecoverable error, from stage {}: {}",
            stage_name,
            error
        );
    }
}
