use thiserror::Error;

pub type Result<T> = std::result::Result<T, NexStarError>;

#[derive(Debug, Error)]
pub enum NexStarError {
    #[cfg(feature = "serial")]
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The reply did not have the length the command calls for.
    /// Both lengths include the `#` terminator.
    #[error("unexpected reply length: expected {expected} bytes, got {actual}")]
    UnexpectedLength { expected: usize, actual: usize },

    #[error("unknown model code: {0}")]
    UnknownModel(u8),

    #[error("coordinate out of range: {0}")]
    InvalidCoordinate(f64),

    #[error("invalid {field} for mount clock: {value}")]
    InvalidTime { field: &'static str, value: i32 },

    #[error("mount time is not a valid calendar date")]
    InvalidDateTime,

    #[error("unexpected response to {0}")]
    UnexpectedResponse(&'static str),

    #[error("transport lock poisoned by a panicked caller")]
    LockPoisoned,
}
