/// InvalidValueError is returned when a raw wire integer does not name any member of a closed
/// enumeration. There is never a fallback value; a stray integer means the peers disagree on the
/// protocol.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("Invalid integer value {value} for conversion to {target}")]
pub struct InvalidValueError {
    pub target: &'static str,
    pub value: i32,
}
