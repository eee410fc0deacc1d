use crate::request::{OpCode, Request};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum LeaderChannelError {
    #[error("Replication channel to the leader is closed")]
    Disconnected,
}

/// Follower is this replica's link to the leader. `request()` hands a state-changing (or sync)
/// request over to be globally ordered. It fails, and never drops the request silently, if the
/// link is gone.
#[async_trait::async_trait]
pub trait Follower: Send + Sync {
    async fn request(&self, request: Arc<Request>) -> Result<(), LeaderChannelError>;
}

/// Kind of frame on the link to the leader.
#[repr(i32)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PacketKind {
    Request = 1,
}

/// Forwarded requests carry no zxid yet; the leader assigns one when it orders the request.
pub const UNASSIGNED_ZXID: i64 = -1;

/// LeaderPacket is a client request as shipped to the leader.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LeaderPacket {
    pub kind: PacketKind,
    pub zxid: i64,
    pub session_id: i64,
    pub cxid: i32,
    pub op_code: OpCode,
    pub payload: Bytes,
}

impl From<&Request> for LeaderPacket {
    fn from(request: &Request) -> Self {
        LeaderPacket {
            kind: PacketKind::Request,
            zxid: UNASSIGNED_ZXID,
            session_id: request.session_id(),
            cxid: request.cxid(),
            op_code: request.op_code(),
            payload: request.payload().clone(),
        }
    }
}

/// LeaderChannel is a `Follower` that writes packets into a bounded queue drained by the
/// replication link. A full queue makes `request()` wait.
pub struct LeaderChannel {
    logger: slog::Logger,
    sender: mpsc::Sender<LeaderPacket>,
}

impl LeaderChannel {
    pub fn new(logger: slog::Logger, buffer_size: usize) -> (Self, LeaderPacketStream) {
        let (tx, rx) = mpsc::channel(buffer_size);

        (
            LeaderChannel { logger, sender: tx },
            LeaderPacketStream { receiver: rx },
        )
    }
}

#[async_trait::async_trait]
impl Follower for LeaderChannel {
    async fn request(&self, request: Arc<Request>) -> Result<(), LeaderChannelError> {
        slog::trace!(self.logger, "Sending to leader: {:?}", request);
        self.sender
            .send(LeaderPacket::from(request.as_ref()))
            .await
            .map_err(|_| LeaderChannelError::Disconnected)
    }
}

/// The replication link's end of a `LeaderChannel`.
pub struct LeaderPacketStream {
    receiver: mpsc::Receiver<LeaderPacket>,
}

impl LeaderPacketStream {
    pub async fn next(&mut self) -> Option<LeaderPacket> {
        self.receiver.recv().await
    }

    /// Closing the stream disconnects the follower; later `request()` calls fail.
    pub fn close(&mut self) {
        self.receiver.close();
    }
}
