use thiserror::Error;

/// Key derivation error
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The iteration count was zero
    #[error("iteration count must be at least 1")]
    InvalidIterationCount,
    /// The requested key needs more than 2^32 - 1 PRF blocks
    #[error("requested key length exceeds (2^32 - 1) * HashLen")]
    OutputTooLong,
}
