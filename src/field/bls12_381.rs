//! BLS12-381 scalar field
//!
//! At ~2^255 elements the per-round cheating probability of a degree-1 round
//! message is negligible.

pub use ark_bls12_381::Fr;
