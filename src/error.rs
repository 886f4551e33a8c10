use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Precondition violations reported before any work is done.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("threshold {threshold} is outside [1, {sequences}]")]
    ThresholdOutOfRange { threshold: usize, sequences: usize },

    #[error("radix width of {bits} bits is outside [1, {max}]")]
    InvalidRadix { bits: u32, max: u32 },

    #[error("pattern of length {len} does not fit a {width}-bit register")]
    PatternTooLong { len: usize, width: u32 },

    #[error("pattern is empty")]
    EmptyPattern,

    #[error("scratch buffer holds {buffer} elements but input holds {input}")]
    BufferMismatch { input: usize, buffer: usize },
}
