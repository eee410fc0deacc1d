use crate::conversion::InvalidValueError;
use std::convert::TryFrom;

/// KeeperState is the state of the client's connection to the ensemble at the time of an event.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum KeeperState {
    /// Never generated by the server.
    Unknown = -1,
    /// Not connected to any server in the ensemble.
    Disconnected = 0,
    /// Never generated by the server.
    NoSyncConnected = 1,
    /// Connected to a server in the ensemble.
    SyncConnected = 3,
    AuthFailed = 4,
    /// Connected to a server that has lost contact with the quorum. Only reads are allowed from
    /// here on, and only read-only clients ever see this state.
    ConnectedReadOnly = 5,
    /// The client may now act with its SASL-authorized permissions.
    SaslAuthenticated = 6,
    /// The ensemble has expired this session. It can't be revived; the client has to open a new
    /// session.
    Expired = -112,
}

impl KeeperState {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for KeeperState {
    type Error = InvalidValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(KeeperState::Unknown),
            0 => Ok(KeeperState::Disconnected),
            1 => Ok(KeeperState::NoSyncConnected),
            3 => Ok(KeeperState::SyncConnected),
            4 => Ok(KeeperState::AuthFailed),
            5 => Ok(KeeperState::ConnectedReadOnly),
            6 => Ok(KeeperState::SaslAuthenticated),
            -112 => Ok(KeeperState::Expired),
            _ => Err(InvalidValueError {
                target: "KeeperState",
                value,
            }),
        }
    }
}

/// EventType is the kind of change that happened to a watched node.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum EventType {
    /// Accompanies connection state changes, which aren't about any node.
    None = -1,
    NodeCreated = 1,
    NodeDeleted = 2,
    NodeDataChanged = 3,
    NodeChildrenChanged = 4,
}

impl EventType {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for EventType {
    type Error = InvalidValueError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(EventType::None),
            1 => Ok(EventType::NodeCreated),
            2 => Ok(EventType::NodeDeleted),
            3 => Ok(EventType::NodeDataChanged),
            4 => Ok(EventType::NodeChildrenChanged),
            _ => Err(InvalidValueError {
                target: "EventType",
                value,
            }),
        }
    }
}

/// WatchedEvent is what a `Watcher` receives: the connection state, what happened, and the node
/// it happened to (absent for pure connection state changes).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WatchedEvent {
    state: KeeperState,
    event_type: EventType,
    path: Option<String>,
}

impl WatchedEvent {
    pub fn new(event_type: EventType, state: KeeperState, path: Option<String>) -> Self {
        WatchedEvent {
            state,
            event_type,
            path,
        }
    }

    /// A notification about the connection only.
    pub fn state_change(state: KeeperState) -> Self {
        Self::new(EventType::None, state, None)
    }

    pub fn state(&self) -> KeeperState {
        self.state
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// `to_wire()` converts to the raw form sent to clients. An absent path goes out as "".
    pub fn to_wire(&self) -> WatcherEvent {
        WatcherEvent {
            event_type: self.event_type.as_i32(),
            state: self.state.as_i32(),
            path: self.path.clone().unwrap_or_default(),
        }
    }
}

/// WatcherEvent is a watch notification as laid out on the wire, before its integers are checked.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WatcherEvent {
    pub event_type: i32,
    pub state: i32,
    pub path: String,
}

impl TryFrom<WatcherEvent> for WatchedEvent {
    type Error = InvalidValueError;

    fn try_from(wire: WatcherEvent) -> Result<Self, Self::Error> {
        let state = KeeperState::try_from(wire.state)?;
        let event_type = EventType::try_from(wire.event_type)?;
        let path = if wire.path.is_empty() { None } else { Some(wire.path) };

        Ok(WatchedEvent::new(event_type, state, path))
    }
}
