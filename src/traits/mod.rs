//! Trait abstractions at the boundary between the sum-check core and the
//! layer that owns the summed polynomial (typically a circuit).

pub mod oracle;

pub use oracle::{EvaluationOracle, FnOracle};
