mod op_code;
mod request;
mod shared_option;

pub use op_code::OpCode;
pub use request::Request;
pub use request::Zxid;
