//! Error types for the sum-check crate
//!
//! `InvalidLength`, `DimensionMismatch` and `InvalidClaim` signal caller misuse.
//! `SumCheckFailed` and `FinalCheckFailed` are the error form of a verifier
//! rejection, produced only when a caller asks for one via `Verdict::into_result`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SumCheckError {
    #[error("evaluation table length {0} is not a power of two")]
    InvalidLength(usize),

    #[error("dimension mismatch: expected {expected} variables, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("claimed sum does not match the sum of the polynomial over the hypercube")]
    InvalidClaim,

    #[error("round {round} consistency check failed: g(0) + g(1) != running claim")]
    SumCheckFailed { round: usize },

    #[error("final claim does not match the oracle evaluation")]
    FinalCheckFailed,

    #[error("{call} is not valid while the protocol is {state}")]
    UnexpectedCall {
        call: &'static str,
        state: &'static str,
    },

    #[error("verifier already rejected this run; start a fresh run with new randomness")]
    AlreadyRejected,

    #[error("transcript mismatch: {0}")]
    TranscriptMismatch(String),
}

pub type Result<T> = std::result::Result<T, SumCheckError>;
