mod follower;
mod pending_syncs;
mod server_context;

pub use follower::Follower;
pub use follower::LeaderChannel;
pub use follower::LeaderChannelError;
pub use follower::LeaderPacket;
pub use follower::LeaderPacketStream;
pub use follower::PacketKind;
pub use follower::UNASSIGNED_ZXID;
pub use pending_syncs::PendingSyncError;
pub use pending_syncs::PendingSyncs;
pub use server_context::ServerContext;
