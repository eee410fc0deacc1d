use crate::request::Request;
use crate::server::{Follower, PendingSyncs};
use std::sync::Arc;

/// ServerContext is the state one follower replica shares between its pipeline stages and the
/// code handling leader replies. It lives as long as the replica is connected to a leader.
pub struct ServerContext {
    logger: slog::Logger,
    pending_syncs: PendingSyncs,
    follower: Arc<dyn Follower>,
}

impl ServerContext {
    pub fn new(logger: slog::Logger, follower: Arc<dyn Follower>) -> Self {
        ServerContext {
            logger,
            pending_syncs: PendingSyncs::new(),
            follower,
        }
    }

    pub fn pending_syncs(&self) -> &PendingSyncs {
        &self.pending_syncs
    }

    pub fn follower(&self) -> &Arc<dyn Follower> {
        &self.follower
    }

    /// `complete_sync()` is called when the leader answers a sync. The leader sees this follower's
    /// syncs over one ordered link, so the answer belongs to the oldest pending one.
    pub fn complete_sync(&self) -> Option<Arc<Request>> {
        match self.pending_syncs.take_oldest() {
            Some(request) => {
                slog::debug!(self.logger, "Sync completed: {:?}", request);
                Some(request)
            }
            None => {
                slog::warn!(self.logger, "Not expecting a sync.");
                None
            }
        }
    }
}
