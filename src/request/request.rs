use crate::request::shared_option::SharedOption;
use crate::request::OpCode;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::fmt;

/// Zxid is the transaction id the leader assigns to a request once it has been globally ordered.
#[derive(Copy, Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Zxid(i64);

impl Zxid {
    pub fn new(zxid: i64) -> Self {
        Zxid(zxid)
    }

    pub fn from_epoch_and_counter(epoch: u32, counter: u32) -> Self {
        Zxid(((epoch as i64) << 32) | counter as i64)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    pub fn epoch(&self) -> u32 {
        (self.0 >> 32) as u32
    }

    pub fn counter(&self) -> u32 {
        (self.0 & 0xffff_ffff) as u32
    }
}

impl fmt::Debug for Zxid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

/// Request is a single client operation moving through the pipeline. It is shared between stages
/// as `Arc<Request>`, and two requests are "the same" only if they are the same allocation. The
/// only fields a stage may fill in after creation are the assigned zxid and the response.
pub struct Request {
    session_id: i64,
    cxid: i32,
    op_code: OpCode,
    payload: Bytes,
    create_time: DateTime<Utc>,
    zxid: SharedOption<Zxid>,
    response: SharedOption<Bytes>,
}

impl Request {
    pub fn new(session_id: i64, cxid: i32, op_code: OpCode, payload: Bytes) -> Self {
        Request {
            session_id,
            cxid,
            op_code,
            payload,
            create_time: Utc::now(),
            zxid: SharedOption::new(),
            response: SharedOption::new(),
        }
    }

    pub fn session_id(&self) -> i64 {
        self.session_id
    }

    pub fn cxid(&self) -> i32 {
        self.cxid
    }

    pub fn op_code(&self) -> OpCode {
        self.op_code
    }

    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    pub fn zxid(&self) -> Option<Zxid> {
        self.zxid.get()
    }

    /// `assign_zxid()` records the transaction id once. Returns false, leaving the original id in
    /// place, if one was already assigned.
    pub fn assign_zxid(&self, zxid: Zxid) -> bool {
        self.zxid.set_if_empty(zxid)
    }

    pub fn response(&self) -> Option<Bytes> {
        self.response.get()
    }

    pub fn set_response(&self, response: Bytes) {
        self.response.replace(response);
    }
}

impl fmt::Debug for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sessionid:0x{:x} cxid:0x{:x} type:{:?}",
            self.session_id, self.cxid, self.op_code
        )?;
        match self.zxid() {
            Some(zxid) => write!(f, " zxid:{:?}", zxid),
            None => write!(f, " zxid:none"),
        }
    }
}
