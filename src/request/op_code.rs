use crate::conversion::InvalidValueError;
use std::convert::TryFrom;

/// OpCode is the operation kind of a client request, with the integer used for it on the wire.
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum OpCode {
    Notification = 0,
    Create = 1,
    Delete = 2,
    Exists = 3,
    GetData = 4,
    SetData = 5,
    GetAcl = 6,
    SetAcl = 7,
    GetChildren = 8,
    Sync = 9,
    Ping = 11,
    GetChildren2 = 12,
    Check = 13,
    Multi = 14,
    Auth = 100,
    SetWatches = 101,
    Sasl = 102,
    CreateSession = -10,
    CloseSession = -11,
    Error = -1,
}

impl OpCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// `is_leader_bound()` returns true for the operations a follower must ship to the leader to get
    /// a global order: every state change, session lifecycle, and sync.
    pub fn is_leader_bound(self) -> bool {
        match self {
            OpCode::Sync
            | OpCode::Create
            | OpCode::Delete
            | OpCode::SetData
            | OpCode::SetAcl
            | OpCode::CreateSession
            | OpCode::CloseSession
            | OpCode::Multi => true,
            _ => false,
        }
    }

    pub fn is_sync(self) -> bool {
        self == OpCode::Sync
    }
}

impl From<OpCode> for i32 {
    fn from(op: OpCode) -> Self {
        op.as_i32()
    }
}

impl TryFrom<i32> for OpCode {
    type Error = InvalidValueError;

    fn try_from(value: i32) -> Result<Self, InvalidValueError> {
        let op = match value {
            0 => OpCode::Notification,
            1 => OpCode::Create,
            2 => OpCode::Delete,
            3 => OpCode::Exists,
            4 => OpCode::GetData,
            5 => OpCode::SetData,
            6 => OpCode::GetAcl,
            7 => OpCode::SetAcl,
            8 => OpCode::GetChildren,
            9 => OpCode::Sync,
            11 => OpCode::Ping,
            12 => OpCode::GetChildren2,
            13 => OpCode::Check,
            14 => OpCode::Multi,
            100 => OpCode::Auth,
            101 => OpCode::SetWatches,
            102 => OpCode::Sasl,
            -10 => OpCode::CreateSession,
            -11 => OpCode::CloseSession,
            -1 => OpCode::Error,
            _ => {
                return Err(InvalidValueError {
                    target: "OpCode",
                    value,
                })
            }
        };

        Ok(op)
    }
}
